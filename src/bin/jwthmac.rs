//! Command-line front end for issuing and inspecting tokens
//!
//! ```not_rust
//! JWTHMAC_SIGNING_KEY=s3cr3t jwthmac encode --user user-42 --scope read --scope write
//! JWTHMAC_SIGNING_KEY=s3cr3t jwthmac decode <token>
//! ```

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use jwthmac::SigningConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "jwthmac", version, about = "Issue and verify HS256 scope tokens")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// TOML file with `signing_key`, `issuer` and `expiry_ms`
    #[arg(long, env = "JWTHMAC_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Shared HMAC secret
    #[arg(long, env = "JWTHMAC_SIGNING_KEY", hide_env_values = true, global = true)]
    signing_key: Option<String>,

    /// Value written to the `iss` claim
    #[arg(long, env = "JWTHMAC_ISSUER", global = true)]
    issuer: Option<String>,

    /// Token lifetime in milliseconds
    #[arg(long, env = "JWTHMAC_EXPIRY_MS", global = true)]
    expiry_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Issue a token and print it
    Encode {
        /// Subject user identifier
        #[arg(long)]
        user: String,

        /// Granted scope; repeat for several, order is kept
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },

    /// Verify a token and print its user and scopes
    Decode {
        /// The token to verify
        token: String,
    },
}

const DEFAULT_ISSUER: &str = "jwthmac";
const DEFAULT_EXPIRY_MS: u64 = 15 * 60 * 1000;

impl ConfigArgs {
    /// Flags and environment override the config file; the file overrides defaults
    fn resolve(self) -> anyhow::Result<SigningConfig> {
        let file = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let parsed: SigningConfig =
                    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
                Some(parsed)
            }
            None => None,
        };

        let signing_key = match (self.signing_key, &file) {
            (Some(key), _) => key.into(),
            (None, Some(file)) => file.signing_key.clone(),
            (None, None) => bail!("no signing key: pass --signing-key or set JWTHMAC_SIGNING_KEY"),
        };
        if signing_key.is_empty() {
            bail!("signing key must not be empty");
        }

        let issuer = self
            .issuer
            .or_else(|| file.as_ref().map(|f| f.issuer.clone()))
            .unwrap_or_else(|| DEFAULT_ISSUER.to_string());

        let expiry_ms = self
            .expiry_ms
            .or_else(|| file.as_ref().map(|f| f.expiry_ms))
            .unwrap_or(DEFAULT_EXPIRY_MS);
        if expiry_ms == 0 {
            bail!("expiry must be a positive number of milliseconds");
        }

        Ok(SigningConfig {
            signing_key,
            issuer,
            expiry_ms,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config.resolve()?;
    tracing::debug!(issuer = %config.issuer, expiry_ms = config.expiry_ms, "configuration loaded");

    match cli.command {
        Command::Encode { user, scopes } => {
            let token = jwthmac::encode(&config, &user, &scopes).context("encoding token")?;
            println!("{token}");
        }
        Command::Decode { token } => {
            let (scopes, user) = jwthmac::decode(&config, token.trim()).context("token rejected")?;
            println!("user: {user}");
            for scope in scopes {
                println!("scope: {scope}");
            }
        }
    }

    Ok(())
}

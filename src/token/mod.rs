// Internal modules
mod parsed;
mod verified;

// The verifier moves a token through these states; nothing reads claims
// from a token that has not passed algorithm pinning and the MAC check.
pub use parsed::{ParsedToken, SEGMENT_SEPARATOR};
pub use verified::VerifiedToken;

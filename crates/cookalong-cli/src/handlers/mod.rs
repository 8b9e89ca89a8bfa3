//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Drive the session engine
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain playback logic; that lives in
//! `cookalong-session`.

pub mod inspect;
pub mod run;

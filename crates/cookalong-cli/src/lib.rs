//! Command-line interface for cookalong.
//!
//! This crate is the composition root: it wires the session engine to the
//! terminal with simulated player and speech adapters so a full cook-along
//! can be driven from stdin. Command dispatch routes to handlers which
//! delegate to the session runtime.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod sim;
pub mod source;

// Re-export primary types for convenient access
pub use commands::{Commands, LocaleArg};
pub use parser::Cli;
pub use sim::{ConsoleSpeaker, SimPlayer, SimSpeech};
pub use source::FileRecipeSource;

//! Error types for the playback engine.

use thiserror::Error;

/// Errors produced by the recipe session controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A session needs at least one step to play.
    #[error("Cannot start a session on a recipe with no steps")]
    EmptyRecipe,

    /// `start_listening` was called while already listening.
    #[error("Speech recognition is already active")]
    AlreadyListening,

    /// `stop_listening` was called while not listening.
    #[error("Speech recognition is not active")]
    NotListening,
}

//! Error types for recipe document loading and validation.

use thiserror::Error;

/// Errors arising while loading or validating a recipe document.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// The document could not be read from its source.
    #[error("Failed to read recipe document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or does not match the expected shape.
    #[error("Failed to parse recipe document: {0}")]
    Json(#[from] serde_json::Error),

    /// A timestamp field was not in `MM:SS` or `HH:MM:SS` form.
    #[error("Invalid timestamp {value:?}: expected MM:SS or HH:MM:SS")]
    InvalidTimestamp {
        /// The offending text as it appeared in the document.
        value: String,
    },

    /// The recipe has no steps; a playable session needs at least one.
    #[error("Recipe has no steps")]
    EmptyRecipe,

    /// A verification confidence fell outside the `[0, 1]` range.
    #[error("Step {step_id}: confidence {value} is outside [0, 1]")]
    InvalidConfidence {
        /// Identifier of the offending step.
        step_id: String,
        /// The out-of-range confidence value.
        value: f32,
    },

    /// A step window ends before it starts.
    #[error("Step {step_id}: end_time precedes start_time")]
    WindowOutOfOrder {
        /// Identifier of the offending step.
        step_id: String,
    },
}

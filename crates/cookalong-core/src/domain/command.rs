//! Playback commands shared by the interpreter and direct UI actions.

use serde::{Deserialize, Serialize};

/// A playback command.
///
/// Produced by the command interpreter from a final transcript, or directly
/// by a UI action. Commands are dispatched immediately and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Advance to the following step.
    Next,
    /// Return to the preceding step.
    Previous,
    /// Replay the current step's video window.
    Repeat,
    /// Start the countdown timer for the current step.
    StartTimer,
    /// Stop the running countdown timer.
    Stop,
}

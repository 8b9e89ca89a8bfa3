//! Playback state store.
//!
//! The session controller owns one [`StepCursor`] and assembles
//! [`PlaybackState`] snapshots on demand. Nothing here is shared or global;
//! the state is threaded by reference through the controller's methods.

use serde::Serialize;

/// Read-only snapshot of the session's playback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    /// Index of the active step.
    pub current_step: usize,
    /// Whether the countdown timer is running.
    pub is_timer_running: bool,
    /// Seconds left on the countdown.
    pub timer_secs_remaining: u32,
    /// Whether speech recognition is active.
    pub is_listening: bool,
    /// Whether verification metadata is shown alongside instructions.
    pub show_explainability: bool,
}

/// Bounded step index over a fixed, non-empty step list.
///
/// The index can never leave `[0, count)`: navigation clamps at both ends
/// and out-of-range jumps are ignored.
#[derive(Debug)]
pub struct StepCursor {
    index: usize,
    count: usize,
}

impl StepCursor {
    /// Create a cursor over `count` steps, positioned at step 0.
    pub const fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// Index of the active step.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of steps the cursor ranges over.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Move forward one step. Returns `false` when already on the last step.
    pub const fn advance(&mut self) -> bool {
        if self.index + 1 < self.count {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move back one step. Returns `false` when already on the first step.
    pub const fn retreat(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to an arbitrary step. Out-of-range targets and jumps to the
    /// current step are ignored and return `false`.
    pub const fn jump(&mut self, target: usize) -> bool {
        if target < self.count && target != self.index {
            self.index = target;
            true
        } else {
            false
        }
    }

    /// Return to step 0.
    pub const fn reset(&mut self) {
        self.index = 0;
    }
}

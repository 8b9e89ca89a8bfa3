//! Video loop controller.
//!
//! Keeps the external player inside the active step's `[start, end]` window
//! using two mechanisms at once: the player's `Ended` event (covers windows
//! that run to the end of the video) and interval polling of the playback
//! position (covers mid-video windows where no `Ended` ever fires). Neither
//! alone works across player backends, so both are kept.

use std::sync::Arc;

use cookalong_core::ports::{PlayerEvent, PlayerPort};
use cookalong_core::{Step, Timestamp};

/// The window the player is being held to, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LoopWindow {
    start: f64,
    end: Option<f64>,
}

/// Holds the player inside the active step's video window.
pub struct VideoLoopController {
    player: Arc<dyn PlayerPort>,
    window: Option<LoopWindow>,
    looping: bool,
    online: bool,
    /// Set after the boundary seek is issued; cleared once a sample lands
    /// back inside the window. Stops a burst of past-the-edge samples from
    /// issuing a seek each.
    wrap_issued: bool,
}

impl VideoLoopController {
    /// Create a controller that is online and looping.
    pub fn new(player: Arc<dyn PlayerPort>) -> Self {
        Self {
            player,
            window: None,
            looping: true,
            online: true,
            wrap_issued: false,
        }
    }

    /// Whether player operations are currently allowed.
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Whether active polling is worthwhile right now: online, looping, and
    /// the active window has a far edge to police.
    pub fn wants_polling(&self) -> bool {
        self.online && self.looping && self.window.is_some_and(|w| w.end.is_some())
    }

    /// Enable or disable looping at the window edge.
    pub const fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Swap the loop window for a new step and restart playback from its
    /// start. The runtime guarantees the old step's polling never overlaps
    /// the new window.
    pub fn retarget(&mut self, step: &Step) {
        self.window = Some(LoopWindow {
            start: step.start_time.as_f64(),
            end: step.end_time.map(Timestamp::as_f64),
        });
        self.wrap_issued = false;
        tracing::debug!(
            step_id = %step.step_id,
            start = %step.start_time,
            end = ?step.end_time.map(|t| t.to_string()),
            "Loop window retargeted"
        );
        if self.online {
            self.player.seek(step.start_time.as_f64());
            self.player.play();
        }
    }

    /// Replay the active window from its start.
    pub fn replay(&mut self) {
        if let Some(window) = self.window {
            self.wrap_issued = false;
            if self.online {
                self.player.seek(window.start);
                self.player.play();
            }
        }
    }

    /// Sample the player position and wrap exactly once when it crosses the
    /// window's far edge. A failed sample is skipped, not an error.
    pub fn poll(&mut self) {
        if !self.online || !self.looping {
            return;
        }
        let Some(window) = self.window else { return };
        let Some(end) = window.end else { return };
        match self.player.current_position() {
            Ok(position) => {
                if position >= end {
                    if !self.wrap_issued {
                        self.wrap_issued = true;
                        tracing::debug!(position, end, "Window edge crossed, wrapping");
                        self.player.seek(window.start);
                        self.player.play();
                    }
                } else {
                    self.wrap_issued = false;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Position sample failed, skipping");
            }
        }
    }

    /// React to a player event.
    pub fn handle_player_event(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::Ready => {
                // Commands sent before the player was ready were lost;
                // re-establish the active window.
                if self.online {
                    if let Some(window) = self.window {
                        self.player.seek(window.start);
                        self.player.play();
                    }
                }
            }
            PlayerEvent::Ended => {
                if self.online && self.looping {
                    if let Some(window) = self.window {
                        self.wrap_issued = false;
                        self.player.seek(window.start);
                        self.player.play();
                    }
                }
            }
            PlayerEvent::StateChange(state) => {
                tracing::debug!(?state, "Player state changed");
            }
            PlayerEvent::Error(message) => {
                tracing::warn!(message = %message, "Player reported an error");
            }
        }
    }

    /// Suspend or resume player operations with connectivity.
    ///
    /// Offline, no port call is made at all; the step text stays usable on
    /// its own. Coming back online re-establishes the active window.
    pub fn set_online(&mut self, online: bool) {
        if self.online == online {
            return;
        }
        self.online = online;
        tracing::info!(online, "Video loop connectivity changed");
        if online {
            if let Some(window) = self.window {
                self.wrap_issued = false;
                self.player.seek(window.start);
                self.player.play();
            }
        }
    }

    /// Tear down the underlying player.
    pub fn shutdown(&self) {
        self.player.destroy();
    }
}

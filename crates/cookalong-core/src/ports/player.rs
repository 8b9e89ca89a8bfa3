//! Video player port.
//!
//! Abstraction over the embedded video player. All driving calls are
//! fire-and-forget; completion and state changes come back as
//! [`PlayerEvent`]s on a channel owned by the runtime. The engine never
//! assumes a driving call took effect synchronously.

use thiserror::Error;

/// Coarse playback state reported by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Actively playing.
    Playing,
    /// Paused by the engine or the user.
    Paused,
    /// Stalled while fetching data.
    Buffering,
}

/// Events emitted by a player adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The player finished initialising and accepts commands.
    Ready,
    /// Playback state changed.
    StateChange(PlayerState),
    /// Playback reached the end of the video.
    Ended,
    /// The player failed; the message is adapter-specific.
    Error(String),
}

/// The player could not service a position sample.
#[derive(Debug, Error)]
pub enum PlayerUnavailable {
    /// The player has not reported [`PlayerEvent::Ready`] yet.
    #[error("Player is not ready")]
    NotReady,

    /// The backend rejected the request.
    #[error("Player backend error: {0}")]
    Backend(String),
}

/// Port for driving an external video player.
pub trait PlayerPort: Send + Sync {
    /// Begin or resume playback.
    fn play(&self);

    /// Pause playback.
    fn pause(&self);

    /// Seek to an absolute position in seconds.
    fn seek(&self, secs: f64);

    /// Sample the current playback position in seconds.
    ///
    /// Unlike the driving calls this returns a value. A failed sample is
    /// reported as [`PlayerUnavailable`]; the caller decides whether to skip
    /// the sample or degrade.
    fn current_position(&self) -> Result<f64, PlayerUnavailable>;

    /// Tear the player down and release its resources.
    fn destroy(&self);
}

//! Port traits the playback engine drives.
//!
//! # Design Rules
//!
//! - Ports are minimal and intent-based: they name what the engine needs,
//!   not how an adapter provides it.
//! - Driving calls are synchronous fire-and-forget. Command handlers run to
//!   completion and must never suspend mid-mutation, so nothing here returns
//!   a future except document loading.
//! - Results come back as events on channels owned by the runtime, never as
//!   return values of driving calls.

pub mod feedback;
pub mod player;
pub mod recipe_source;
pub mod speech;

pub use feedback::{NoopSpeaker, SpeakerPort};
pub use player::{PlayerEvent, PlayerPort, PlayerState, PlayerUnavailable};
pub use recipe_source::RecipeSource;
pub use speech::{SpeechEvent, SpeechPort};

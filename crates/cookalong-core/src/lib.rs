//! Core domain types and port definitions for cookalong.
//!
//! This crate carries the recipe document model, the playback vocabulary
//! (commands and locales), and the port traits the playback engine drives.
//! Engine logic lives in `cookalong-session`; adapters live at the
//! composition root.
//!
//! # Design Rules
//!
//! - Ports are minimal and intent-based: they name what the engine needs
//!   from a capability, never how an adapter provides it.
//! - Domain types are plain serde structs mirroring the recipe document
//!   produced by the video analysis pipeline. No engine state lives here.
//! - This crate stays free of adapter dependencies (no player SDKs, no
//!   speech backends, no terminal crates).

pub mod domain;
pub mod error;
pub mod locale;
pub mod ports;

pub use domain::command::Command;
pub use domain::recipe::{
    BilingualText, Recipe, Step, TimerConfig, VerificationStatus, VisualVerification,
};
pub use domain::timestamp::Timestamp;
pub use error::RecipeError;
pub use locale::Locale;

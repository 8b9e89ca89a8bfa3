//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use cookalong_core::Locale;

/// Available commands for the cook-along playback tool.
///
/// Each command operates on a recipe file produced by the analysis
/// pipeline: a JSON document with timed, bilingual steps.
#[derive(Subcommand)]
pub enum Commands {
    /// Print a recipe file's steps, windows, and verification notes
    Inspect {
        /// Path to the recipe JSON file
        file: PathBuf,
        /// Emit the validated recipe as pretty-printed JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an interactive cook-along session against a recipe file
    Run {
        /// Path to the recipe JSON file
        file: PathBuf,
        /// Language for instructions and spoken confirmations
        #[arg(short, long, value_enum, default_value_t = LocaleArg::En)]
        locale: LocaleArg,
        /// Start in degraded offline mode (text navigation only)
        #[arg(long)]
        offline: bool,
        /// Seconds for timers on steps that do not declare a duration
        #[arg(long, default_value_t = 60)]
        default_timer_secs: u32,
    },
}

/// Locale choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    /// English
    En,
    /// Cantonese
    Yue,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Self::English,
            LocaleArg::Yue => Self::Cantonese,
        }
    }
}

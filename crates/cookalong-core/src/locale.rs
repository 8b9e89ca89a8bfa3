//! Locales supported by the playback engine.
//!
//! The locale selects both the phrase table used to interpret spoken
//! commands and the canned readback lines spoken in response. The Cantonese
//! lines keep the document's colloquial register (sentence-final particles),
//! matching the voice of the recipe text itself.

use serde::{Deserialize, Serialize};

use crate::domain::command::Command;
use crate::domain::recipe::BilingualText;

/// A supported interaction language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English phrases and readback.
    #[default]
    English,
    /// Written Cantonese phrases and readback.
    Cantonese,
}

impl Locale {
    /// Spoken confirmation for a successfully executed command.
    pub const fn confirmation(self, command: Command) -> &'static str {
        match (self, command) {
            (Self::English, Command::Next) => "OK, next step.",
            (Self::English, Command::Previous) => "Going back one step.",
            (Self::English, Command::Repeat) => "Let's watch that again.",
            (Self::English, Command::StartTimer) => "Timer started.",
            (Self::English, Command::Stop) => "Stopped.",
            (Self::Cantonese, Command::Next) => "好，下一步啦！",
            (Self::Cantonese, Command::Previous) => "返上一步喇。",
            (Self::Cantonese, Command::Repeat) => "再睇多次啦！",
            (Self::Cantonese, Command::StartTimer) => "開始計時喇！",
            (Self::Cantonese, Command::Stop) => "停咗喇。",
        }
    }

    /// Readback spoken when a countdown reaches zero.
    pub const fn times_up(self) -> &'static str {
        match self {
            Self::English => "Time's up!",
            Self::Cantonese => "時間到啦！",
        }
    }

    /// Select this locale's rendering of a bilingual text.
    pub fn text(self, bilingual: &BilingualText) -> &str {
        match self {
            Self::English => &bilingual.en,
            Self::Cantonese => &bilingual.yue,
        }
    }
}

//! Spoken command interpretation.
//!
//! Turns a final transcript into at most one [`Command`] by case-insensitive
//! substring matching against the active locale's phrase table. Cooks speak
//! in full sentences with wet hands and a wok hissing behind them, so the
//! matcher looks for trigger phrases anywhere in the utterance instead of
//! demanding exact commands.

use cookalong_core::{Command, Locale};

/// Commands are tried in this fixed order and the first phrase match wins.
const COMMAND_ORDER: [Command; 5] = [
    Command::Next,
    Command::Previous,
    Command::Repeat,
    Command::StartTimer,
    Command::Stop,
];

/// Interprets final transcripts against per-locale phrase tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandInterpreter;

impl CommandInterpreter {
    /// Create a new interpreter.
    pub const fn new() -> Self {
        Self
    }

    /// Map a transcript to a command, if any trigger phrase matches.
    ///
    /// Matching is case-insensitive substring containment over the trimmed
    /// input. The table order is fixed (`Next`, `Previous`, `Repeat`,
    /// `StartTimer`, `Stop`) and the first match wins; utterances matching
    /// several rows resolve to the earliest one. Unmatched text returns
    /// `None` and has no side effects.
    pub fn interpret(&self, text: &str, locale: Locale) -> Option<Command> {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }
        COMMAND_ORDER.into_iter().find(|&command| {
            phrases(locale, command)
                .iter()
                .any(|phrase| normalized.contains(phrase))
        })
    }
}

/// Trigger phrases per locale and command.
///
/// No row carries a bare "timer", so "stop the timer" falls through the
/// `StartTimer` row and resolves to `Stop`.
const fn phrases(locale: Locale, command: Command) -> &'static [&'static str] {
    match (locale, command) {
        (Locale::English, Command::Next) => &["next", "continue", "go on"],
        (Locale::English, Command::Previous) => &["previous", "back", "last step"],
        (Locale::English, Command::Repeat) => &["repeat", "again", "one more time"],
        (Locale::English, Command::StartTimer) => {
            &["start timer", "start the timer", "set a timer", "set timer"]
        }
        (Locale::English, Command::Stop) => &["stop", "pause", "halt"],
        (Locale::Cantonese, Command::Next) => &["下一步", "跟住", "下個步驟"],
        (Locale::Cantonese, Command::Previous) => &["上一步", "返轉頭", "退返"],
        (Locale::Cantonese, Command::Repeat) => &["再嚟一次", "重複", "再播"],
        (Locale::Cantonese, Command::StartTimer) => &["開始計時", "計時", "較鐘"],
        (Locale::Cantonese, Command::Stop) => &["停", "暫停"],
    }
}

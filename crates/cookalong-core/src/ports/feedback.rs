//! Spoken feedback port.

use crate::locale::Locale;

/// Port for speaking short confirmation lines back to the cook.
///
/// `speak` is fire-and-forget: the engine never waits for synthesis and
/// never consumes a result. A slow or missing speaker must not stall a
/// state transition.
///
/// # Implementations
///
/// - [`NoopSpeaker`] for tests and headless runs
/// - Adapter-specific implementations (TTS backends, terminal echo)
pub trait SpeakerPort: Send + Sync {
    /// Speak one line in the given locale.
    fn speak(&self, text: &str, locale: Locale);
}

/// A speaker that discards everything, for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpeaker;

impl NoopSpeaker {
    /// Create a new no-op speaker.
    pub const fn new() -> Self {
        Self
    }
}

impl SpeakerPort for NoopSpeaker {
    fn speak(&self, _text: &str, _locale: Locale) {
        // Intentionally do nothing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_noop_speaker() {
        let speaker = NoopSpeaker::new();
        speaker.speak("Time's up!", Locale::English);
    }

    #[test]
    fn test_arc_speaker() {
        let speaker: Arc<dyn SpeakerPort> = Arc::new(NoopSpeaker::new());
        speaker.speak("好，下一步啦！", Locale::Cantonese);
    }
}

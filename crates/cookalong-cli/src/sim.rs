//! Simulated adapters for terminal sessions.
//!
//! No real video player or microphone exists in a terminal, so `run` wires
//! the session to simulations: a player that advances a position on the
//! wall clock, a speech port that only logs (transcripts are typed with
//! `say`), and a speaker that prints instead of synthesising.

use std::sync::Mutex;
use std::time::Instant;

use cookalong_core::Locale;
use cookalong_core::ports::{PlayerPort, PlayerUnavailable, SpeakerPort, SpeechPort};

#[derive(Debug)]
struct PlayheadClock {
    anchor: Instant,
    position: f64,
    playing: bool,
}

impl PlayheadClock {
    fn current(&self) -> f64 {
        if self.playing {
            self.position + self.anchor.elapsed().as_secs_f64()
        } else {
            self.position
        }
    }
}

/// A player whose playhead advances with wall-clock time while playing.
///
/// Seeks and pauses fold the elapsed time into the stored position, so the
/// reported position behaves like a real transport without any media.
#[derive(Debug)]
pub struct SimPlayer {
    clock: Mutex<PlayheadClock>,
}

impl SimPlayer {
    /// Create a paused player at position zero.
    pub fn new() -> Self {
        Self {
            clock: Mutex::new(PlayheadClock {
                anchor: Instant::now(),
                position: 0.0,
                playing: false,
            }),
        }
    }
}

impl Default for SimPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerPort for SimPlayer {
    fn play(&self) {
        let mut clock = self.clock.lock().unwrap();
        if !clock.playing {
            clock.anchor = Instant::now();
            clock.playing = true;
        }
    }

    fn pause(&self) {
        let mut clock = self.clock.lock().unwrap();
        clock.position = clock.current();
        clock.playing = false;
    }

    fn seek(&self, secs: f64) {
        let mut clock = self.clock.lock().unwrap();
        clock.position = secs;
        clock.anchor = Instant::now();
    }

    fn current_position(&self) -> Result<f64, PlayerUnavailable> {
        Ok(self.clock.lock().unwrap().current())
    }

    fn destroy(&self) {
        tracing::debug!("Simulated player destroyed");
    }
}

/// A speech port with no microphone behind it.
///
/// Start and stop only flip the logged state; transcripts come from the
/// terminal via the `say` command instead.
#[derive(Debug, Default)]
pub struct SimSpeech;

impl SpeechPort for SimSpeech {
    fn start_listening(&self) {
        tracing::info!("Listening (type `say <words>` to speak)");
    }

    fn stop_listening(&self) {
        tracing::info!("Stopped listening");
    }
}

/// A speaker that prints spoken lines to the terminal.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

impl SpeakerPort for ConsoleSpeaker {
    fn speak(&self, text: &str, locale: Locale) {
        let tag = match locale {
            Locale::English => "voice",
            Locale::Cantonese => "voice/yue",
        };
        println!("[{tag}] {text}");
    }
}

//! Recipe session controller.
//!
//! Owns the playback state for one loaded recipe and reconciles every input
//! source against it: direct commands, interpreted speech, timer ticks,
//! player events, and connectivity changes. Emits [`SessionEvent`]s via a
//! channel for the UI layer to consume.
//!
//! Invariant: crossing steps (by voice or by direct navigation) stops an
//! in-flight countdown. A stale countdown overlapping an unrelated step is
//! worse than asking the cook to restart it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use cookalong_core::ports::{PlayerEvent, PlayerPort, SpeakerPort, SpeechEvent, SpeechPort};
use cookalong_core::{Command, Locale, Recipe, Step};

use crate::command::CommandInterpreter;
use crate::error::SessionError;
use crate::state::{PlaybackState, StepCursor};
use crate::timer::{CountdownTimer, TimerTick};
use crate::video_loop::VideoLoopController;

/// Countdown used when a step declares a timer without a duration.
pub const DEFAULT_TIMER_SECS: u32 = 60;

/// Default cadence for active position polling.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// ── Events emitted by the session ──────────────────────────────────

/// Events emitted by the session to the UI / application layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The active step changed.
    StepChanged {
        /// Index of the newly active step.
        index: usize,
    },

    /// The current step's window was replayed on request.
    ReplayRequested {
        /// Index of the replayed step.
        index: usize,
    },

    /// The countdown timer started.
    TimerStarted {
        /// Full duration of the countdown.
        duration_secs: u32,
    },

    /// The countdown decremented.
    TimerTick {
        /// Seconds left on the clock.
        remaining_secs: u32,
    },

    /// The countdown reached zero.
    TimerFinished,

    /// Speech recognition turned on or off.
    ListeningChanged(bool),

    /// Connectivity changed; `online = false` means degraded mode.
    ConnectivityChanged {
        /// Whether player operations are allowed again.
        online: bool,
    },

    /// A capability reported a failure. Informational; the session keeps
    /// running on whatever still works.
    Error(String),
}

// ── Session configuration ──────────────────────────────────────────

/// Configuration for a recipe session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interaction language for interpretation and readback.
    pub locale: Locale,

    /// Countdown used when a step declares a timer without a duration.
    pub default_timer_secs: u32,

    /// Cadence for active position polling.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            locale: Locale::English,
            default_timer_secs: DEFAULT_TIMER_SECS,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

// ── Recipe session ─────────────────────────────────────────────────

/// The playback session for one loaded recipe.
///
/// All mutation goes through `&mut self` methods that run to completion, so
/// the state is always internally consistent between calls. The runtime
/// serialises those calls onto a single task.
pub struct RecipeSession {
    /// The loaded document. Immutable for the session's lifetime.
    recipe: Arc<Recipe>,

    /// Bounded step index.
    cursor: StepCursor,

    /// Countdown timer.
    timer: CountdownTimer,

    /// Keeps the player inside the active step's window.
    video: VideoLoopController,

    /// Transcript-to-command matching.
    interpreter: CommandInterpreter,

    /// Spoken confirmations and readback.
    speaker: Arc<dyn SpeakerPort>,

    /// Speech recognition capability.
    speech: Arc<dyn SpeechPort>,

    /// Whether speech recognition is active.
    is_listening: bool,

    /// Whether verification metadata is surfaced with instructions.
    show_explainability: bool,

    /// Whether player operations are allowed.
    online: bool,

    /// Session configuration.
    config: SessionConfig,

    /// Event sender channel.
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl RecipeSession {
    /// Create a session positioned on step 0 with the timer stopped and
    /// listening off, and start playback of the first step's window.
    ///
    /// Returns the session and a receiver for [`SessionEvent`]s.
    pub fn new(
        recipe: Arc<Recipe>,
        player: Arc<dyn PlayerPort>,
        speech: Arc<dyn SpeechPort>,
        speaker: Arc<dyn SpeakerPort>,
        config: SessionConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>), SessionError> {
        if recipe.steps.is_empty() {
            return Err(SessionError::EmptyRecipe);
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let cursor = StepCursor::new(recipe.steps.len());
        let mut video = VideoLoopController::new(player);
        video.retarget(&recipe.steps[0]);

        tracing::info!(
            title = %recipe.title.en,
            steps = recipe.steps.len(),
            locale = ?config.locale,
            "Session started"
        );

        let session = Self {
            recipe,
            cursor,
            timer: CountdownTimer::new(),
            video,
            interpreter: CommandInterpreter::new(),
            speaker,
            speech,
            is_listening: false,
            show_explainability: false,
            online: true,
            config,
            event_tx,
        };

        Ok((session, event_rx))
    }

    // ── State access ───────────────────────────────────────────────

    /// Snapshot the current playback state.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_step: self.cursor.index(),
            is_timer_running: self.timer.is_running(),
            timer_secs_remaining: self.timer.remaining_secs(),
            is_listening: self.is_listening,
            show_explainability: self.show_explainability,
        }
    }

    /// The active step.
    pub fn current_step(&self) -> &Step {
        &self.recipe.steps[self.cursor.index()]
    }

    /// The loaded recipe document.
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    /// Session configuration.
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the countdown timer is running.
    pub const fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Whether active position polling is worthwhile right now.
    pub fn wants_polling(&self) -> bool {
        self.video.wants_polling()
    }

    // ── Navigation ─────────────────────────────────────────────────

    /// Advance to the following step. Idempotent on the last step.
    pub fn next(&mut self) {
        if self.cursor.advance() {
            self.after_step_change();
        }
    }

    /// Return to the preceding step. Idempotent on the first step.
    pub fn previous(&mut self) {
        if self.cursor.retreat() {
            self.after_step_change();
        }
    }

    /// Jump to a step by index. Out-of-range targets are ignored.
    pub fn go_to(&mut self, index: usize) {
        if self.cursor.jump(index) {
            self.after_step_change();
        }
    }

    fn after_step_change(&mut self) {
        // Crossing steps stops an in-flight countdown.
        if self.timer.is_running() {
            self.timer.stop();
        }
        let index = self.cursor.index();
        let step = &self.recipe.steps[index];
        tracing::debug!(index, step_id = %step.step_id, "Step changed");
        self.video.retarget(step);
        self.emit(SessionEvent::StepChanged { index });
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Execute a playback command and speak its confirmation.
    ///
    /// Confirmation is fire-and-forget and spoken even when the command was
    /// a boundary no-op: the cook asked, the cook gets an answer.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::Next => self.next(),
            Command::Previous => self.previous(),
            Command::Repeat => self.replay(),
            Command::StartTimer => self.start_timer(),
            Command::Stop => self.stop_timer(),
        }
        self.speak(self.config.locale.confirmation(command));
    }

    /// Replay the current step's window without changing any state.
    pub fn replay(&mut self) {
        self.video.replay();
        self.emit(SessionEvent::ReplayRequested {
            index: self.cursor.index(),
        });
    }

    // ── Timer ──────────────────────────────────────────────────────

    /// Start the countdown from the step's declared duration.
    ///
    /// Steps that declare a timer without a duration, and explicit requests
    /// on steps with no timer at all, use the configured default.
    pub fn start_timer(&mut self) {
        let step = &self.recipe.steps[self.cursor.index()];
        let duration = step
            .timer
            .duration_secs
            .unwrap_or(self.config.default_timer_secs);
        self.timer.start(duration);
        tracing::debug!(step_id = %step.step_id, duration, "Timer started");
        self.emit(SessionEvent::TimerStarted {
            duration_secs: duration,
        });
    }

    /// Stop the countdown, keeping the remaining seconds visible.
    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    /// Advance the countdown by one second.
    ///
    /// Called by the runtime's one second interval; a tick while the timer
    /// is idle is a no-op. The tick that reaches zero speaks the "time's up"
    /// readback exactly once.
    pub fn tick_timer(&mut self) {
        match self.timer.tick() {
            TimerTick::Idle => {}
            TimerTick::Running(remaining_secs) => {
                self.emit(SessionEvent::TimerTick { remaining_secs });
            }
            TimerTick::Finished => {
                tracing::info!("Countdown finished");
                self.speak(self.config.locale.times_up());
                self.emit(SessionEvent::TimerFinished);
            }
        }
    }

    // ── Listening lifecycle ────────────────────────────────────────

    /// Begin a speech recognition session.
    pub fn start_listening(&mut self) -> Result<(), SessionError> {
        if self.is_listening {
            return Err(SessionError::AlreadyListening);
        }
        tracing::info!("Listening started");
        self.is_listening = true;
        self.speech.start_listening();
        self.emit(SessionEvent::ListeningChanged(true));
        Ok(())
    }

    /// End the speech recognition session, aborting recognition at the port.
    pub fn stop_listening(&mut self) -> Result<(), SessionError> {
        if !self.is_listening {
            return Err(SessionError::NotListening);
        }
        tracing::info!("Listening stopped");
        self.is_listening = false;
        self.speech.stop_listening();
        self.emit(SessionEvent::ListeningChanged(false));
        Ok(())
    }

    /// React to a speech recognition event.
    ///
    /// Only final transcripts are interpreted; partials are display-only.
    /// Errors and adapter-side session end clear the listening flag without
    /// touching the rest of the playback state.
    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Partial(_) => {}
            SpeechEvent::Final(text) => self.handle_transcript(&text),
            SpeechEvent::Error(message) => {
                tracing::warn!(message = %message, "Speech recognition failed");
                self.clear_listening();
                self.emit(SessionEvent::Error(message));
            }
            SpeechEvent::End => self.clear_listening(),
        }
    }

    /// Interpret a final transcript and dispatch the matched command.
    ///
    /// Unmatched speech is ignored with no side effects; mid-cooking chatter
    /// must never move the session.
    pub fn handle_transcript(&mut self, text: &str) {
        if !self.is_listening {
            return;
        }
        if let Some(command) = self.interpreter.interpret(text, self.config.locale) {
            tracing::debug!(?command, transcript = text, "Transcript matched");
            self.dispatch(command);
        } else {
            tracing::debug!(transcript = text, "Transcript matched no command");
        }
    }

    fn clear_listening(&mut self) {
        if self.is_listening {
            self.is_listening = false;
            self.emit(SessionEvent::ListeningChanged(false));
        }
    }

    // ── Explainability & connectivity ──────────────────────────────

    /// Flip whether verification metadata is surfaced with instructions.
    /// Returns the new value.
    pub const fn toggle_explainability(&mut self) -> bool {
        self.show_explainability = !self.show_explainability;
        self.show_explainability
    }

    /// Update connectivity. Offline suspends all player traffic; the step
    /// text stays available. Restoration re-enters the active window.
    pub fn set_online(&mut self, online: bool) {
        if self.online == online {
            return;
        }
        self.online = online;
        self.video.set_online(online);
        self.emit(SessionEvent::ConnectivityChanged { online });
    }

    // ── Player plumbing ────────────────────────────────────────────

    /// Sample the player position once; part of the runtime's poll arm.
    pub fn poll_video(&mut self) {
        self.video.poll();
    }

    /// React to a player event.
    pub fn handle_player_event(&mut self, event: &PlayerEvent) {
        self.video.handle_player_event(event);
        if let PlayerEvent::Error(message) = event {
            self.emit(SessionEvent::Error(message.clone()));
        }
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn speak(&self, line: &str) {
        self.speaker.speak(line, self.config.locale);
    }

    /// Emit a session event (best-effort; a dropped receiver is logged and
    /// ignored).
    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("Session event receiver dropped");
        }
    }
}

impl Drop for RecipeSession {
    fn drop(&mut self) {
        if self.is_listening {
            self.speech.stop_listening();
        }
        self.video.shutdown();
    }
}

//! Session runtime event loop.
//!
//! Drives a [`RecipeSession`] from a single tokio task: UI commands, timer
//! ticks, loop polling, player events, speech events, and connectivity
//! changes are all serviced by one `select!` loop. Each arm runs to
//! completion before the next event is dispatched, so playback state
//! mutations are atomic without locks, and no two polling passes can ever
//! overlap across a step change.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

use cookalong_core::Command;
use cookalong_core::ports::{PlayerEvent, SpeechEvent};

use crate::session::RecipeSession;

/// Instructions accepted by the runtime from the UI side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Execute a playback command as if it had been spoken.
    Dispatch(Command),
    /// Jump to a step by index.
    GoTo(usize),
    /// Begin speech recognition.
    StartListening,
    /// End speech recognition.
    StopListening,
    /// Flip the explainability display.
    ToggleExplainability,
}

/// Single-task event loop around a [`RecipeSession`].
pub struct SessionRuntime {
    session: RecipeSession,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    player_events: mpsc::UnboundedReceiver<PlayerEvent>,
    speech_events: mpsc::UnboundedReceiver<SpeechEvent>,
    connectivity: watch::Receiver<bool>,
    cancel: CancellationToken,
}

impl SessionRuntime {
    /// Bundle a session with the channels that feed it.
    pub const fn new(
        session: RecipeSession,
        commands: mpsc::UnboundedReceiver<SessionCommand>,
        player_events: mpsc::UnboundedReceiver<PlayerEvent>,
        speech_events: mpsc::UnboundedReceiver<SpeechEvent>,
        connectivity: watch::Receiver<bool>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            session,
            commands,
            player_events,
            speech_events,
            connectivity,
            cancel,
        }
    }

    /// Run the loop until cancellation or until the command channel closes.
    ///
    /// Timer ticks fire at a steady one second cadence and are no-ops while
    /// the countdown is idle. The poll arm is gated off whenever the video
    /// loop has no edge to police; both intervals skip missed ticks rather
    /// than bursting to catch up.
    pub async fn run(self) {
        let Self {
            mut session,
            mut commands,
            mut player_events,
            mut speech_events,
            mut connectivity,
            cancel,
        } = self;

        let mut timer_ticks = interval(Duration::from_secs(1));
        timer_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll_ticks = interval(session.config().poll_interval);
        poll_ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut player_open = true;
        let mut speech_open = true;
        let mut connectivity_open = true;

        tracing::info!("Session runtime started");

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!("Session runtime cancelled");
                    break;
                }

                command = commands.recv() => {
                    match command {
                        Some(command) => handle_command(&mut session, command),
                        None => {
                            tracing::info!("Command channel closed, shutting down");
                            break;
                        }
                    }
                }

                _ = timer_ticks.tick() => {
                    session.tick_timer();
                }

                _ = poll_ticks.tick(), if session.wants_polling() => {
                    session.poll_video();
                }

                event = player_events.recv(), if player_open => {
                    match event {
                        Some(event) => session.handle_player_event(&event),
                        None => player_open = false,
                    }
                }

                event = speech_events.recv(), if speech_open => {
                    match event {
                        Some(event) => session.handle_speech_event(event),
                        None => speech_open = false,
                    }
                }

                changed = connectivity.changed(), if connectivity_open => {
                    match changed {
                        Ok(()) => {
                            let online = *connectivity.borrow_and_update();
                            session.set_online(online);
                        }
                        Err(_) => connectivity_open = false,
                    }
                }
            }
        }

        tracing::info!("Session runtime stopped");
    }
}

fn handle_command(session: &mut RecipeSession, command: SessionCommand) {
    match command {
        SessionCommand::Dispatch(command) => session.dispatch(command),
        SessionCommand::GoTo(index) => session.go_to(index),
        SessionCommand::StartListening => {
            if let Err(e) = session.start_listening() {
                tracing::debug!(error = %e, "Ignoring listening request");
            }
        }
        SessionCommand::StopListening => {
            if let Err(e) = session.stop_listening() {
                tracing::debug!(error = %e, "Ignoring listening request");
            }
        }
        SessionCommand::ToggleExplainability => {
            session.toggle_explainability();
        }
    }
}

//! Integration tests for the `SessionRuntime` event loop.
//!
//! These tests run the real loop on the tokio runtime with fake ports and
//! short intervals, and assert on the [`SessionEvent`]s that come out the
//! other side. Wall-clock timing is deliberately generous; every wait is
//! bounded by a timeout so a broken loop fails fast instead of hanging.
//!
//! # What is tested
//!
//! - Cancellation and command-channel closure both terminate the loop
//! - UI commands are dispatched end to end (navigation, timer start)
//! - Timer ticks arrive on the one second cadence and finish the countdown
//! - Position polling wraps the player at the window edge
//! - Speech events flow through listening gating into navigation
//! - Connectivity flips reach the session and suspend player traffic

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use cookalong_core::ports::{
    PlayerEvent, PlayerPort, PlayerUnavailable, SpeakerPort, SpeechEvent, SpeechPort,
};
use cookalong_core::{
    BilingualText, Command, Locale, Recipe, Step, TimerConfig, VerificationStatus,
    VisualVerification,
};
use cookalong_session::{RecipeSession, SessionCommand, SessionConfig, SessionEvent, SessionRuntime};

// ── Fake ports ─────────────────────────────────────────────────────

/// A player that records every call and serves a settable position.
#[derive(Debug, Default)]
struct FakePlayer {
    calls: Mutex<Vec<String>>,
    position: Mutex<Option<f64>>,
}

impl FakePlayer {
    fn set_position(&self, position: f64) {
        *self.position.lock().unwrap() = Some(position);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl PlayerPort for FakePlayer {
    fn play(&self) {
        self.push("play");
    }

    fn pause(&self) {
        self.push("pause");
    }

    fn seek(&self, secs: f64) {
        self.push(format!("seek:{secs}"));
    }

    fn current_position(&self) -> Result<f64, PlayerUnavailable> {
        self.position
            .lock()
            .unwrap()
            .ok_or(PlayerUnavailable::NotReady)
    }

    fn destroy(&self) {
        self.push("destroy");
    }
}

#[derive(Debug, Default)]
struct FakeSpeech;

impl SpeechPort for FakeSpeech {
    fn start_listening(&self) {}

    fn stop_listening(&self) {}
}

#[derive(Debug, Default)]
struct FakeSpeaker {
    lines: Mutex<Vec<String>>,
}

impl FakeSpeaker {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl SpeakerPort for FakeSpeaker {
    fn speak(&self, text: &str, _locale: Locale) {
        self.lines.lock().unwrap().push(text.to_string());
    }
}

// ── Fixtures ───────────────────────────────────────────────────────

fn step(id: &str, start: &str, end: Option<&str>, timer_secs: Option<u32>) -> Step {
    Step {
        step_id: id.to_string(),
        start_time: start.parse().unwrap(),
        end_time: end.map(|e| e.parse().unwrap()),
        instruction: BilingualText {
            en: format!("Instruction for {id}."),
            yue: format!("{id} 嘅指示。"),
        },
        visual_verification: VisualVerification {
            status: VerificationStatus::Confirmed,
            confidence: 0.9,
            rationale: "Matches the frame.".to_string(),
            fallback_note: None,
        },
        timer: TimerConfig {
            has_timer: timer_secs.is_some(),
            duration_secs: timer_secs,
            visual_cue: None,
        },
    }
}

fn two_step_recipe() -> Arc<Recipe> {
    Arc::new(Recipe {
        title: BilingualText {
            en: "Steamed Egg".to_string(),
            yue: "蒸水蛋".to_string(),
        },
        youtube_id: "dQw4w9WgXcQ".to_string(),
        steps: vec![
            step("step-1", "00:05", Some("00:20"), Some(1)),
            step("step-2", "00:20", None, None),
        ],
    })
}

/// Everything needed to drive and observe a running loop.
struct Harness {
    commands: mpsc::UnboundedSender<SessionCommand>,
    player_events: mpsc::UnboundedSender<PlayerEvent>,
    speech_events: mpsc::UnboundedSender<SpeechEvent>,
    connectivity: watch::Sender<bool>,
    cancel: CancellationToken,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    player: Arc<FakePlayer>,
    speaker: Arc<FakeSpeaker>,
    runtime: JoinHandle<()>,
}

fn spawn_runtime(config: SessionConfig) -> Harness {
    let player = Arc::new(FakePlayer::default());
    let speaker = Arc::new(FakeSpeaker::default());
    let (session, events) = RecipeSession::new(
        two_step_recipe(),
        Arc::clone(&player) as Arc<dyn PlayerPort>,
        Arc::new(FakeSpeech) as Arc<dyn SpeechPort>,
        Arc::clone(&speaker) as Arc<dyn SpeakerPort>,
        config,
    )
    .expect("recipe has steps");

    let (commands, command_rx) = mpsc::unbounded_channel();
    let (player_events, player_rx) = mpsc::unbounded_channel();
    let (speech_events, speech_rx) = mpsc::unbounded_channel();
    let (connectivity, connectivity_rx) = watch::channel(true);
    let cancel = CancellationToken::new();

    let runtime = tokio::spawn(
        SessionRuntime::new(
            session,
            command_rx,
            player_rx,
            speech_rx,
            connectivity_rx,
            cancel.clone(),
        )
        .run(),
    );

    Harness {
        commands,
        player_events,
        speech_events,
        connectivity,
        cancel,
        events,
        player,
        speaker,
        runtime,
    }
}

/// Receive events until one matches, or fail after `wait`.
async fn expect_event<F>(
    events: &mut mpsc::UnboundedReceiver<SessionEvent>,
    wait: Duration,
    mut matches: F,
) -> SessionEvent
where
    F: FnMut(&SessionEvent) -> bool,
{
    let search = async {
        loop {
            let event = events.recv().await.expect("event channel open");
            if matches(&event) {
                return event;
            }
        }
    };
    timeout(wait, search).await.expect("expected event in time")
}

// ── Shutdown ───────────────────────────────────────────────────────

#[tokio::test]
async fn cancellation_stops_the_loop() {
    let harness = spawn_runtime(SessionConfig::default());

    harness.cancel.cancel();

    timeout(Duration::from_secs(1), harness.runtime)
        .await
        .expect("loop exits after cancellation")
        .expect("runtime task does not panic");
}

#[tokio::test]
async fn closing_the_command_channel_stops_the_loop() {
    let harness = spawn_runtime(SessionConfig::default());

    drop(harness.commands);

    timeout(Duration::from_secs(1), harness.runtime)
        .await
        .expect("loop exits after command channel closes")
        .expect("runtime task does not panic");
}

#[tokio::test]
async fn shutdown_destroys_the_player() {
    let harness = spawn_runtime(SessionConfig::default());

    harness.cancel.cancel();
    timeout(Duration::from_secs(1), harness.runtime)
        .await
        .expect("loop exits")
        .expect("runtime task does not panic");

    assert!(harness.player.calls().contains(&"destroy".to_string()));
}

// ── Command dispatch ───────────────────────────────────────────────

#[tokio::test]
async fn navigation_commands_flow_end_to_end() {
    let mut harness = spawn_runtime(SessionConfig::default());

    harness
        .commands
        .send(SessionCommand::Dispatch(Command::Next))
        .expect("runtime alive");

    let event = expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        matches!(e, SessionEvent::StepChanged { .. })
    })
    .await;
    assert_eq!(event, SessionEvent::StepChanged { index: 1 });

    harness.cancel.cancel();
}

#[tokio::test]
async fn go_to_jumps_and_retargets_the_player() {
    let mut harness = spawn_runtime(SessionConfig::default());

    harness
        .commands
        .send(SessionCommand::GoTo(1))
        .expect("runtime alive");

    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::StepChanged { index: 1 }
    })
    .await;

    assert!(harness.player.calls().contains(&"seek:20".to_string()));
    harness.cancel.cancel();
}

// ── Timer cadence ──────────────────────────────────────────────────

#[tokio::test]
async fn timer_counts_down_to_finished_on_the_tick_cadence() {
    let mut harness = spawn_runtime(SessionConfig::default());

    // step-1 declares a one second timer, so the first tick finishes it.
    harness
        .commands
        .send(SessionCommand::Dispatch(Command::StartTimer))
        .expect("runtime alive");

    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::TimerStarted { duration_secs: 1 }
    })
    .await;
    expect_event(&mut harness.events, Duration::from_secs(3), |e| {
        *e == SessionEvent::TimerFinished
    })
    .await;

    assert!(
        harness
            .speaker
            .lines()
            .contains(&"Time's up!".to_string())
    );
    harness.cancel.cancel();
}

#[tokio::test]
async fn stop_halts_the_countdown() {
    let mut harness = spawn_runtime(SessionConfig::default());

    // Jump to step-2 first: no declared timer, so the default duration is
    // used and the countdown is long enough to stop before it finishes.
    harness
        .commands
        .send(SessionCommand::GoTo(1))
        .expect("runtime alive");
    harness
        .commands
        .send(SessionCommand::Dispatch(Command::StartTimer))
        .expect("runtime alive");

    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        matches!(e, SessionEvent::TimerStarted { .. })
    })
    .await;

    harness
        .commands
        .send(SessionCommand::Dispatch(Command::Stop))
        .expect("runtime alive");

    // Give the loop time to process the stop plus one would-be tick.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    harness.cancel.cancel();
    timeout(Duration::from_secs(1), harness.runtime)
        .await
        .expect("loop exits")
        .expect("runtime task does not panic");

    // No finish line was ever spoken.
    assert!(
        !harness
            .speaker
            .lines()
            .contains(&"Time's up!".to_string())
    );
}

// ── Position polling ───────────────────────────────────────────────

#[tokio::test]
async fn polling_wraps_the_player_at_the_window_edge() {
    let mut harness = spawn_runtime(SessionConfig {
        poll_interval: Duration::from_millis(20),
        ..SessionConfig::default()
    });

    // step-1 loops [5, 20]; park the playhead past the edge.
    harness.player.set_position(21.0);

    // Wait for at least one poll pass to land.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let seeks = harness
        .player
        .calls()
        .iter()
        .filter(|c| *c == "seek:5")
        .count();
    // One seek from construction, exactly one more from the wrap.
    assert_eq!(seeks, 2);

    harness.cancel.cancel();
    let _ = timeout(Duration::from_secs(1), harness.runtime).await;
    drop(harness.events);
}

#[tokio::test]
async fn ended_event_replays_the_window() {
    let harness = spawn_runtime(SessionConfig::default());
    let before = harness.player.calls().len();

    harness
        .player_events
        .send(PlayerEvent::Ended)
        .expect("runtime alive");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let calls = harness.player.calls();
    assert_eq!(&calls[before..], &["seek:5", "play"]);
    harness.cancel.cancel();
}

// ── Speech flow ────────────────────────────────────────────────────

#[tokio::test]
async fn final_transcript_navigates_while_listening() {
    let mut harness = spawn_runtime(SessionConfig::default());

    harness
        .commands
        .send(SessionCommand::StartListening)
        .expect("runtime alive");
    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::ListeningChanged(true)
    })
    .await;

    harness
        .speech_events
        .send(SpeechEvent::Final("please go to the next step".to_string()))
        .expect("runtime alive");

    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::StepChanged { index: 1 }
    })
    .await;
    harness.cancel.cancel();
}

#[tokio::test]
async fn transcripts_are_ignored_while_not_listening() {
    let harness = spawn_runtime(SessionConfig::default());

    harness
        .speech_events
        .send(SpeechEvent::Final("next".to_string()))
        .expect("runtime alive");
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Still on step-1's window; no second seek was issued.
    let seeks = harness
        .player
        .calls()
        .iter()
        .filter(|c| c.starts_with("seek:"))
        .count();
    assert_eq!(seeks, 1);
    harness.cancel.cancel();
}

#[tokio::test]
async fn speech_error_surfaces_and_clears_listening() {
    let mut harness = spawn_runtime(SessionConfig::default());

    harness
        .commands
        .send(SessionCommand::StartListening)
        .expect("runtime alive");
    harness
        .speech_events
        .send(SpeechEvent::Error("microphone denied".to_string()))
        .expect("runtime alive");

    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        matches!(e, SessionEvent::Error(message) if message.contains("microphone denied"))
    })
    .await;
    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::ListeningChanged(false)
    })
    .await;
    harness.cancel.cancel();
}

// ── Connectivity ───────────────────────────────────────────────────

#[tokio::test]
async fn connectivity_flip_reaches_the_session() {
    let mut harness = spawn_runtime(SessionConfig::default());

    harness.connectivity.send(false).expect("runtime alive");
    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::ConnectivityChanged { online: false }
    })
    .await;

    // Offline navigation emits no player traffic.
    let before = harness.player.calls().len();
    harness
        .commands
        .send(SessionCommand::Dispatch(Command::Next))
        .expect("runtime alive");
    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::StepChanged { index: 1 }
    })
    .await;
    assert_eq!(harness.player.calls().len(), before);

    harness.connectivity.send(true).expect("runtime alive");
    expect_event(&mut harness.events, Duration::from_secs(1), |e| {
        *e == SessionEvent::ConnectivityChanged { online: true }
    })
    .await;
    // Reconnecting re-establishes the active step's window.
    assert!(harness.player.calls().contains(&"seek:20".to_string()));
    harness.cancel.cancel();
}

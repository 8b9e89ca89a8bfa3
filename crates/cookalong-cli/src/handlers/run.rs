//! Run command handler.
//!
//! Wires a [`RecipeSession`] to the terminal: the session runtime runs on
//! its own task, a printer task renders session events, and the main task
//! reads stdin lines and translates them into runtime commands. Spoken
//! input is simulated with `say <words>`, which feeds the same transcript
//! path a real microphone would.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cookalong_core::ports::{
    PlayerEvent, PlayerPort, RecipeSource, SpeakerPort, SpeechEvent, SpeechPort,
};
use cookalong_core::{Command, Locale, Recipe};
use cookalong_session::{
    RecipeSession, SessionCommand, SessionConfig, SessionEvent, SessionRuntime,
};

use crate::handlers::inspect::{verification_label, window_label};
use crate::sim::{ConsoleSpeaker, SimPlayer, SimSpeech};
use crate::source::FileRecipeSource;

/// Arguments for the run command.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,
    pub locale: Locale,
    pub offline: bool,
    pub default_timer_secs: u32,
}

/// What a line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputAction {
    Command(SessionCommand),
    Say(String),
    Connectivity(bool),
    Explain,
    ShowStep,
    Help,
    Quit,
    Empty,
    Unknown,
}

/// Execute the run command.
///
/// Returns once the user quits or stdin closes.
pub async fn execute(args: RunArgs) -> Result<()> {
    let recipe = Arc::new(FileRecipeSource::new(&args.file).load().await?);
    let config = SessionConfig {
        locale: args.locale,
        default_timer_secs: args.default_timer_secs,
        ..SessionConfig::default()
    };

    let player = Arc::new(SimPlayer::new()) as Arc<dyn PlayerPort>;
    let speech = Arc::new(SimSpeech) as Arc<dyn SpeechPort>;
    let speaker = Arc::new(ConsoleSpeaker) as Arc<dyn SpeakerPort>;

    let (mut session, events) =
        RecipeSession::new(Arc::clone(&recipe), player, speech, speaker, config)?;
    if args.offline {
        session.set_online(false);
    }

    let (commands, command_rx) = mpsc::unbounded_channel();
    let (player_events, player_rx) = mpsc::unbounded_channel();
    let (speech_events, speech_rx) = mpsc::unbounded_channel();
    let (connectivity, connectivity_rx) = watch::channel(!args.offline);
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

    // The simulated player has no load phase; report it ready at once.
    let _ = player_events.send(PlayerEvent::Ready);

    let explain = Arc::new(AtomicBool::new(false));
    let current_step = Arc::new(AtomicUsize::new(0));
    let printer = spawn_printer(
        Arc::clone(&recipe),
        args.locale,
        Arc::clone(&explain),
        Arc::clone(&current_step),
        events,
    );

    println!(
        "{} / {} ({} steps)",
        recipe.title.en,
        recipe.title.yue,
        recipe.steps.len()
    );
    print_step(&recipe, args.locale, 0, explain.load(Ordering::Relaxed));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match parse_line(&line) {
            InputAction::Command(command) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            InputAction::Say(text) => {
                if speech_events.send(SpeechEvent::Final(text)).is_err() {
                    break;
                }
            }
            InputAction::Connectivity(online) => {
                if connectivity.send(online).is_err() {
                    break;
                }
            }
            InputAction::Explain => {
                let show = !explain.load(Ordering::Relaxed);
                explain.store(show, Ordering::Relaxed);
                if commands.send(SessionCommand::ToggleExplainability).is_err() {
                    break;
                }
                if show {
                    let index = current_step.load(Ordering::Relaxed);
                    println!("  {}", verification_label(&recipe.steps[index]));
                } else {
                    println!("Verification notes hidden.");
                }
            }
            InputAction::ShowStep => {
                let index = current_step.load(Ordering::Relaxed);
                print_step(&recipe, args.locale, index, explain.load(Ordering::Relaxed));
            }
            InputAction::Help => print_help(),
            InputAction::Quit => break,
            InputAction::Empty => {}
            InputAction::Unknown => {
                println!("Unrecognised input. Type `help` for commands.");
            }
        }
    }

    cancel.cancel();
    drop(commands);
    runtime.await?;
    printer.await?;
    Ok(())
}

/// Map one line of input to an action. Keywords are case-insensitive;
/// `say` keeps the rest of the line verbatim.
fn parse_line(line: &str) -> InputAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return InputAction::Empty;
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword.to_lowercase(), rest.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match (keyword.as_str(), rest) {
        ("next" | "n", "") => InputAction::Command(SessionCommand::Dispatch(Command::Next)),
        ("back" | "prev" | "b", "") => {
            InputAction::Command(SessionCommand::Dispatch(Command::Previous))
        }
        ("repeat" | "r", "") => InputAction::Command(SessionCommand::Dispatch(Command::Repeat)),
        ("timer" | "t", "") => {
            InputAction::Command(SessionCommand::Dispatch(Command::StartTimer))
        }
        ("stop" | "s", "") => InputAction::Command(SessionCommand::Dispatch(Command::Stop)),
        ("goto" | "go", number) => match number.parse::<usize>() {
            // Steps are shown one-based; the session indexes from zero.
            Ok(n) if n >= 1 => InputAction::Command(SessionCommand::GoTo(n - 1)),
            _ => InputAction::Unknown,
        },
        ("listen" | "l", "") => InputAction::Command(SessionCommand::StartListening),
        ("mute" | "m", "") => InputAction::Command(SessionCommand::StopListening),
        ("say", text) if !text.is_empty() => InputAction::Say(text.to_string()),
        ("offline", "") => InputAction::Connectivity(false),
        ("online", "") => InputAction::Connectivity(true),
        ("explain" | "e", "") => InputAction::Explain,
        ("where" | "w", "") => InputAction::ShowStep,
        ("help" | "h" | "?", "") => InputAction::Help,
        ("quit" | "exit" | "q", "") => InputAction::Quit,
        _ => InputAction::Unknown,
    }
}

fn print_help() {
    println!("Commands:");
    println!("  next / back / repeat     step navigation");
    println!("  goto <n>                 jump to step n");
    println!("  timer / stop             start or stop the countdown");
    println!("  listen / mute            toggle speech recognition");
    println!("  say <words>              simulate a spoken transcript");
    println!("  offline / online         simulate connectivity changes");
    println!("  explain                  toggle verification notes");
    println!("  where                    show the current step again");
    println!("  quit                     end the session");
}

fn print_step(recipe: &Recipe, locale: Locale, index: usize, explain: bool) {
    let step = &recipe.steps[index];
    println!(
        "Step {}/{} [{}]",
        index + 1,
        recipe.steps.len(),
        window_label(step)
    );
    println!("  {}", locale.text(&step.instruction));
    if explain {
        println!("  {}", verification_label(step));
    }
}

fn spawn_printer(
    recipe: Arc<Recipe>,
    locale: Locale,
    explain: Arc<AtomicBool>,
    current_step: Arc<AtomicUsize>,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEvent::StepChanged { index } => {
                    current_step.store(index, Ordering::Relaxed);
                    print_step(&recipe, locale, index, explain.load(Ordering::Relaxed));
                }
                SessionEvent::ReplayRequested { index } => {
                    println!("Replaying step {}.", index + 1);
                }
                SessionEvent::TimerStarted { duration_secs } => {
                    println!("Timer started: {duration_secs}s.");
                }
                SessionEvent::TimerTick { remaining_secs } => {
                    // A line per second would drown the prompt.
                    if remaining_secs % 10 == 0 || remaining_secs <= 5 {
                        println!("Timer: {remaining_secs}s left.");
                    }
                }
                SessionEvent::TimerFinished => {
                    println!("Timer finished.");
                }
                SessionEvent::ListeningChanged(true) => {
                    println!("Listening. Type `say <words>` to speak.");
                }
                SessionEvent::ListeningChanged(false) => {
                    println!("No longer listening.");
                }
                SessionEvent::ConnectivityChanged { online: false } => {
                    println!("Offline: video suspended, text navigation still works.");
                }
                SessionEvent::ConnectivityChanged { online: true } => {
                    println!("Back online: video window restored.");
                }
                SessionEvent::Error(message) => {
                    eprintln!("error: {message}");
                }
            }
        }
    })
}

//! Inspect command handler.
//!
//! Loads and validates a recipe file, then prints its steps with their
//! video windows, timers, and visual verification notes.

use std::path::Path;

use anyhow::Result;

use cookalong_core::{Recipe, Step, VerificationStatus};

use crate::source::FileRecipeSource;
use cookalong_core::ports::RecipeSource;

/// Execute the inspect command.
///
/// # Arguments
///
/// * `file` - Path to the recipe JSON file
/// * `json` - Emit the validated recipe as pretty-printed JSON instead of
///   the table view
pub async fn execute(file: &Path, json: bool) -> Result<()> {
    let recipe = FileRecipeSource::new(file).load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
        return Ok(());
    }

    print_summary(&recipe);
    Ok(())
}

fn print_summary(recipe: &Recipe) {
    println!("{} / {}", recipe.title.en, recipe.title.yue);
    println!("Video: {}", recipe.youtube_id);
    println!("{} step(s):\n", recipe.steps.len());

    for (index, step) in recipe.steps.iter().enumerate() {
        println!(
            "{:>3}. [{}]{} {}",
            index + 1,
            window_label(step),
            timer_label(step),
            step.instruction.en
        );
        println!("     {}", step.instruction.yue);
        println!("     seen: {}", verification_label(step));
    }
}

/// The step's video window as `start - end`, with an open end spelled out.
pub(crate) fn window_label(step: &Step) -> String {
    match step.end_time {
        Some(end) => format!("{} - {}", step.start_time, end),
        None => format!("{} - end", step.start_time),
    }
}

fn timer_label(step: &Step) -> String {
    match step.timer.duration_secs {
        Some(secs) if step.timer.has_timer => format!(" (timer: {secs}s)"),
        _ if step.timer.has_timer => " (timer)".to_string(),
        _ => String::new(),
    }
}

pub(crate) fn verification_label(step: &Step) -> String {
    let verification = &step.visual_verification;
    let status = match verification.status {
        VerificationStatus::Confirmed => "confirmed",
        VerificationStatus::Inferred => "inferred",
        VerificationStatus::Ambiguous => "ambiguous",
    };
    let mut label = format!(
        "{status} ({:.0}%) {}",
        verification.confidence * 100.0,
        verification.rationale
    );
    if let Some(note) = &verification.fallback_note {
        label.push_str(&format!(" [{note}]"));
    }
    label
}

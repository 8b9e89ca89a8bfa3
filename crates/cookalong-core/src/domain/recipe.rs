//! Recipe document model.
//!
//! Mirrors the JSON produced by the video analysis pipeline: a bilingual
//! title, the source video id, and an ordered list of steps with video
//! windows, verification metadata, and optional timers. Documents are
//! immutable once loaded; the engine only ever reads them.

use serde::{Deserialize, Serialize};

use crate::domain::timestamp::Timestamp;
use crate::error::RecipeError;

/// Text carried in both of the document's scripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    /// English rendering.
    pub en: String,
    /// Written Cantonese rendering.
    pub yue: String,
}

/// How a step's timing window was established by the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// The action was visually confirmed in the video frames.
    Confirmed,
    /// The window was inferred from narration or surrounding context.
    Inferred,
    /// The evidence was contradictory or unclear.
    Ambiguous,
}

/// Provenance metadata for a step's timing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualVerification {
    /// How the window was established.
    pub status: VerificationStatus,
    /// Pipeline confidence in the window, in `[0, 1]`.
    pub confidence: f32,
    /// Short explanation of the evidence behind the window.
    pub rationale: String,
    /// Guidance shown when the window could not be confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_note: Option<String>,
}

/// Countdown timer declared by a step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Whether the step calls for a countdown at all.
    #[serde(default)]
    pub has_timer: bool,
    /// Declared duration in seconds, when the video states one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    /// What to watch for when the duration is visual ("until golden brown").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_cue: Option<String>,
}

/// One instruction step of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Stable identifier from the document; never an array index.
    pub step_id: String,
    /// Where this step's video window begins.
    pub start_time: Timestamp,
    /// Where the window ends. Open-ended when the pipeline could not tell.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    /// The instruction in both scripts.
    pub instruction: BilingualText,
    /// Provenance of the timing window.
    pub visual_verification: VisualVerification,
    /// Countdown timer metadata.
    #[serde(default)]
    pub timer: TimerConfig,
}

/// A complete recipe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Dish title in both scripts.
    pub title: BilingualText,
    /// Identifier of the source video the document was produced from.
    pub youtube_id: String,
    /// Ordered instruction steps.
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Parse and validate a recipe document from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, RecipeError> {
        let recipe: Self = serde_json::from_str(text)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Check the document invariants a playable session relies on.
    ///
    /// Rejects empty step lists, confidences outside `[0, 1]`, and windows
    /// that end before they start.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.steps.is_empty() {
            return Err(RecipeError::EmptyRecipe);
        }
        for step in &self.steps {
            let confidence = step.visual_verification.confidence;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(RecipeError::InvalidConfidence {
                    step_id: step.step_id.clone(),
                    value: confidence,
                });
            }
            if let Some(end) = step.end_time {
                if end < step.start_time {
                    return Err(RecipeError::WindowOutOfOrder {
                        step_id: step.step_id.clone(),
                    });
                }
            }
        }
        tracing::debug!(
            youtube_id = %self.youtube_id,
            steps = self.steps.len(),
            "recipe validated"
        );
        Ok(())
    }
}

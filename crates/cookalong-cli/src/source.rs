//! File-backed recipe source.

use std::path::PathBuf;

use async_trait::async_trait;

use cookalong_core::ports::RecipeSource;
use cookalong_core::{Recipe, RecipeError};

/// Loads and validates a recipe from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileRecipeSource {
    path: PathBuf,
}

impl FileRecipeSource {
    /// Create a source for the given path. Nothing is read until
    /// [`RecipeSource::load`] is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecipeSource for FileRecipeSource {
    async fn load(&self) -> Result<Recipe, RecipeError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let recipe = Recipe::from_json(&text)?;
        tracing::debug!(path = %self.path.display(), "Recipe loaded from file");
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "title": {"en": "Soy Sauce Chicken", "yue": "豉油雞"},
        "youtube_id": "abc123xyz00",
        "steps": [
            {
                "step_id": "step-1",
                "start_time": "00:05",
                "end_time": "00:40",
                "instruction": {"en": "Rinse the chicken.", "yue": "洗乾淨隻雞先。"},
                "visual_verification": {
                    "status": "confirmed",
                    "confidence": 0.95,
                    "rationale": "Chicken under running water."
                }
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let recipe = FileRecipeSource::new(file.path()).load().await.unwrap();
        assert_eq!(recipe.title.en, "Soy Sauce Chicken");
        assert_eq!(recipe.steps.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let source = FileRecipeSource::new("/nonexistent/recipe.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, RecipeError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = FileRecipeSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, RecipeError::Json(_)));
    }
}

//! Recipe document source port.

use async_trait::async_trait;

use crate::domain::recipe::Recipe;
use crate::error::RecipeError;

/// Port for loading a validated recipe document.
///
/// Loading is the one genuinely awaited boundary in the system: documents
/// may come from disk, a cache, or a network fetch. Implementations must
/// return only documents that pass [`Recipe::validate`].
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Load and validate the recipe document.
    async fn load(&self) -> Result<Recipe, RecipeError>;
}

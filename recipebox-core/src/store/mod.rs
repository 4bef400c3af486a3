//! Server-side recipe persistence.
//!
//! Backends implement four primitive operations; validation and the
//! not-found contract are shared through the provided methods so every
//! backend behaves the same way at the API boundary.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{Recipe, RecipeFields, RecipeId, RecipeInput};

/// Keyed storage of recipe records.
///
/// Each operation is atomic for a single record. Concurrent writes to the
/// same record are last-write-wins.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    /// Persist a new record under a freshly assigned id.
    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError>;

    /// Replace the fields of an existing record. `None` if `id` is unknown.
    async fn replace(&self, id: &RecipeId, fields: RecipeFields)
        -> Result<Option<Recipe>, StoreError>;

    /// Remove a record. Returns whether it existed.
    async fn remove(&self, id: &RecipeId) -> Result<bool, StoreError>;

    async fn create(&self, input: RecipeInput) -> Result<Recipe, StoreError> {
        let fields = input.validate()?;
        let recipe = self.insert(fields).await?;
        tracing::info!(id = %recipe.id, title = %recipe.fields.title, "recipe created");
        Ok(recipe)
    }

    /// Full replacement of the mutable fields; partial updates are not supported.
    async fn update(&self, id: &RecipeId, input: RecipeInput) -> Result<Recipe, StoreError> {
        let fields = input.validate()?;
        match self.replace(id, fields).await? {
            Some(recipe) => {
                tracing::info!(id = %recipe.id, "recipe updated");
                Ok(recipe)
            }
            None => Err(StoreError::NotFound(id.clone())),
        }
    }

    /// Absence-tolerant: deleting an unknown id succeeds and changes nothing.
    async fn delete(&self, id: &RecipeId) -> Result<(), StoreError> {
        let existed = self.remove(id).await?;
        tracing::info!(id = %id, existed, "recipe deleted");
        Ok(())
    }
}

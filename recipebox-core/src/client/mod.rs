//! Client side of the recipe HTTP contract.
//!
//! View-models talk to the server only through [`RecipeApi`], so tests can
//! swap in [`MockRecipeApi`].

mod http;
mod mock;

pub use http::{HttpRecipeApi, HttpRecipeApiBuilder};
pub use mock::{MockFailure, MockRecipeApi, Operation};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{Recipe, RecipeFields, RecipeId};

#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<Recipe>, ClientError>;

    /// Create a recipe; the server assigns its id.
    async fn create(&self, fields: &RecipeFields) -> Result<Recipe, ClientError>;

    /// Replace all fields of an existing recipe.
    async fn update(&self, id: &RecipeId, fields: &RecipeFields) -> Result<Recipe, ClientError>;

    /// Delete a recipe. Succeeds whether or not it existed.
    async fn delete(&self, id: &RecipeId) -> Result<(), ClientError>;
}

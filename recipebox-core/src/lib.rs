pub mod client;
pub mod error;
pub mod filter;
pub mod store;
pub mod types;
pub mod view;

pub use client::{HttpRecipeApi, HttpRecipeApiBuilder, MockRecipeApi, RecipeApi};
pub use error::{ClientError, StoreError, ValidationError, ViewError};
pub use filter::filter_by_title;
pub use store::{MemoryStore, RecipeStore};
pub use types::{format_ingredients, Recipe, RecipeFields, RecipeId, RecipeInput, MAX_COOKING_TIME};
pub use view::{DeleteToken, EditDraft, LoadState, RecipeForm, RecipeFormView, RecipeListView};

/// Routes of the recipe HTTP API, in axum path syntax.
pub mod paths {
    pub const LIST: &str = "/get-recipes";
    pub const CREATE: &str = "/create-recipe";
    pub const EDIT: &str = "/edit-recipe/{id}";
    pub const DELETE: &str = "/delete-recipe/{id}";
}

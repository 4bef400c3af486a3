use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecipeStore;
use crate::error::StoreError;
use crate::types::{Recipe, RecipeFields, RecipeId};

/// In-process store. Used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records, keeping their ids.
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            recipes: RwLock::new(recipes),
        }
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.read().await.clone())
    }

    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.write().await;

        let mut id = RecipeId::generate();
        while recipes.iter().any(|r| r.id == id) {
            id = RecipeId::generate();
        }

        let recipe = Recipe { id, fields };
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn replace(
        &self,
        id: &RecipeId,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.iter_mut().find(|r| &r.id == id).map(|recipe| {
            recipe.fields = fields;
            recipe.clone()
        }))
    }

    async fn remove(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let mut recipes = self.recipes.write().await;
        let before = recipes.len();
        recipes.retain(|r| &r.id != id);
        Ok(recipes.len() != before)
    }
}

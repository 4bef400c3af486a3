//! PostgreSQL-backed recipe store.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use recipebox_core::{Recipe, RecipeFields, RecipeId, RecipeStore, StoreError, ValidationError};

use crate::db::{DbConn, DbPool};
use crate::models::{NewRecipe, RecipeChanges, RecipeRow};
use crate::schema::recipes;

/// Every operation is a single statement, so each write is atomic for
/// its record. Concurrent updates to one record are last-write-wins.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn, StoreError> {
        self.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to get DB connection");
            StoreError::Backend("Database connection failed".to_string())
        })
    }
}

fn backend(e: diesel::result::Error) -> StoreError {
    tracing::error!(error = %e, "database query failed");
    StoreError::Backend(e.to_string())
}

fn cooking_time_column(fields: &RecipeFields) -> Result<i32, StoreError> {
    i32::try_from(fields.cooking_time)
        .map_err(|_| StoreError::Validation(ValidationError::OutOfRange("cookingTime")))
}

#[async_trait]
impl RecipeStore for PgStore {
    async fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        let mut conn = self.conn()?;

        let rows: Vec<RecipeRow> = recipes::table
            .order((recipes::created_at.asc(), recipes::id.asc()))
            .select(RecipeRow::as_select())
            .load(&mut conn)
            .map_err(backend)?;

        rows.into_iter().map(RecipeRow::into_recipe).collect()
    }

    async fn insert(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        let cooking_time = cooking_time_column(&fields)?;
        let mut conn = self.conn()?;
        let id = RecipeId::generate();

        let new_recipe = NewRecipe {
            id: id.as_str(),
            title: &fields.title,
            description: fields.description.as_deref(),
            ingredients: &fields.ingredients,
            instructions: &fields.instructions,
            cuisine_type: &fields.cuisine_type,
            cooking_time,
        };

        let row: RecipeRow = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .map_err(backend)?;

        row.into_recipe()
    }

    async fn replace(
        &self,
        id: &RecipeId,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        let cooking_time = cooking_time_column(&fields)?;
        let mut conn = self.conn()?;

        let changes = RecipeChanges {
            title: &fields.title,
            description: fields.description.as_deref(),
            ingredients: &fields.ingredients,
            instructions: &fields.instructions,
            cuisine_type: &fields.cuisine_type,
            cooking_time,
        };

        let row: Option<RecipeRow> = diesel::update(recipes::table.find(id.as_str()))
            .set((&changes, recipes::updated_at.eq(Utc::now())))
            .returning(RecipeRow::as_returning())
            .get_result(&mut conn)
            .optional()
            .map_err(backend)?;

        row.map(RecipeRow::into_recipe).transpose()
    }

    async fn remove(&self, id: &RecipeId) -> Result<bool, StoreError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(recipes::table.find(id.as_str()))
            .execute(&mut conn)
            .map_err(backend)?;

        Ok(deleted > 0)
    }
}

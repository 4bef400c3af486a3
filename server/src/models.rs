use diesel::prelude::*;
use recipebox_core::{Recipe, RecipeFields, RecipeId, StoreError};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RecipeRow {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine_type: String,
    pub cooking_time: i32,
}

impl RecipeRow {
    pub fn into_recipe(self) -> Result<Recipe, StoreError> {
        let cooking_time = u32::try_from(self.cooking_time).map_err(|_| {
            StoreError::Backend(format!(
                "Recipe {} has invalid cooking time {}",
                self.id, self.cooking_time
            ))
        })?;

        Ok(Recipe {
            id: RecipeId::new(self.id),
            fields: RecipeFields {
                title: self.title,
                description: self.description,
                ingredients: self.ingredients,
                instructions: self.instructions,
                cuisine_type: self.cuisine_type,
                cooking_time,
            },
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub cuisine_type: &'a str,
    pub cooking_time: i32,
}

/// Full replacement of the mutable columns. `None` clears `description`.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(treat_none_as_null = true)]
pub struct RecipeChanges<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub ingredients: &'a [String],
    pub instructions: &'a str,
    pub cuisine_type: &'a str,
    pub cooking_time: i32,
}

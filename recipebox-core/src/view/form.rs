use crate::client::RecipeApi;
use crate::error::{ClientError, ViewError};
use crate::types::{Recipe, RecipeInput};

/// Values entered into the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine_type: String,
    pub cooking_time: Option<u32>,
}

impl RecipeForm {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// A blank description box means no description.
    pub fn to_input(&self) -> RecipeInput {
        RecipeInput {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()).filter(|d| !d.trim().is_empty()),
            ingredients: Some(self.ingredients.clone()),
            instructions: Some(self.instructions.clone()),
            cuisine_type: Some(self.cuisine_type.clone()),
            cooking_time: self.cooking_time,
        }
    }
}

/// Create-recipe view. Independent of [`super::RecipeListView`].
#[derive(Debug, Default)]
pub struct RecipeFormView {
    form: RecipeForm,
    last_created: Option<Recipe>,
    last_error: Option<ClientError>,
}

impl RecipeFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &RecipeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecipeForm {
        &mut self.form
    }

    pub fn last_created(&self) -> Option<&Recipe> {
        self.last_created.as_ref()
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn reset(&mut self) {
        self.form = RecipeForm::default();
    }

    /// Create a recipe from the entered values.
    ///
    /// Missing required fields are reported without sending a request.
    /// On success the form is cleared; on failure the entered values are
    /// kept so they can be corrected and resubmitted.
    pub async fn submit<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<Recipe, ViewError> {
        let fields = match self.form.to_input().validate() {
            Ok(fields) => fields,
            Err(e) => return Err(self.fail(e.into())),
        };

        match api.create(&fields).await {
            Ok(recipe) => {
                tracing::debug!(id = %recipe.id, "recipe submitted");
                self.reset();
                self.last_error = None;
                self.last_created = Some(recipe.clone());
                Ok(recipe)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, e: ClientError) -> ViewError {
        tracing::warn!(error = %e, "failed to create recipe");
        self.last_error = Some(e.clone());
        e.into()
    }
}

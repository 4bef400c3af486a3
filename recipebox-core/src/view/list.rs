use crate::client::RecipeApi;
use crate::error::{ClientError, ViewError};
use crate::filter::filter_by_title;
use crate::types::{Recipe, RecipeFields, RecipeId, RecipeInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    /// Initial load failed. Terminal: the view does not retry.
    Failed(String),
}

/// Proof that deletion of one recipe was requested.
/// Only the most recently issued token is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteToken(u64);

/// Local copy of a recipe being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: RecipeId,
    pub fields: RecipeFields,
}

/// Client-side mirror of the recipe collection.
///
/// The collection is fetched once. Afterwards the local cache is only
/// changed by the result of a successful mutation; failed mutations
/// record an error and leave the cache as it was.
#[derive(Debug)]
pub struct RecipeListView {
    state: LoadState,
    recipes: Vec<Recipe>,
    query: String,
    draft: Option<EditDraft>,
    pending_delete: Option<(DeleteToken, RecipeId)>,
    next_token: u64,
    last_error: Option<ClientError>,
}

impl Default for RecipeListView {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Idle,
            recipes: Vec::new(),
            query: String::new(),
            draft: None,
            pending_delete: None,
            next_token: 0,
            last_error: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The full local cache, unfiltered.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| &r.id == id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Records matching the current query, in cache order.
    pub fn visible(&self) -> Vec<&Recipe> {
        filter_by_title(&self.recipes, &self.query)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// The most recent failure, if the last action did not succeed.
    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn start_load(&mut self) -> Result<(), ViewError> {
        if self.state != LoadState::Idle {
            return Err(ViewError::AlreadyRequested);
        }
        self.state = LoadState::Loading;
        Ok(())
    }

    pub fn finish_load(&mut self, result: Result<Vec<Recipe>, ClientError>) -> Result<(), ViewError> {
        if self.state != LoadState::Loading {
            return Err(ViewError::NotReady);
        }
        match result {
            Ok(recipes) => {
                tracing::debug!(count = recipes.len(), "recipes loaded");
                self.recipes = recipes;
                self.state = LoadState::Ready;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recipes");
                self.state = LoadState::Failed(e.to_string());
                self.last_error = Some(e.clone());
                Err(e.into())
            }
        }
    }

    /// Fetch the collection. Only valid once, from `Idle`.
    pub async fn load<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<(), ViewError> {
        self.start_load()?;
        let result = api.list().await;
        self.finish_load(result)
    }

    /// Open a draft copy of a cached recipe, replacing any open draft.
    pub fn begin_edit(&mut self, id: &RecipeId) -> Result<&mut EditDraft, ViewError> {
        self.ensure_ready()?;
        let recipe = self
            .get(id)
            .ok_or_else(|| ViewError::UnknownRecipe(id.clone()))?;
        let draft = EditDraft {
            id: recipe.id.clone(),
            fields: recipe.fields.clone(),
        };
        Ok(self.draft.insert(draft))
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Send the open draft. On success the cached record is replaced and
    /// the draft closed; on failure the draft stays open.
    pub async fn submit_edit<A: RecipeApi + ?Sized>(&mut self, api: &A) -> Result<Recipe, ViewError> {
        self.ensure_ready()?;
        let draft = self.draft.as_ref().ok_or(ViewError::NoDraft)?;
        let id = draft.id.clone();

        let fields = match RecipeInput::from(draft.fields.clone()).validate() {
            Ok(fields) => fields,
            Err(e) => return Err(self.fail(e.into())),
        };

        match api.update(&id, &fields).await {
            Ok(updated) => {
                self.apply_updated(updated.clone());
                self.draft = None;
                self.last_error = None;
                Ok(updated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Replace the cached record with the same id.
    pub fn apply_updated(&mut self, recipe: Recipe) {
        if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            *slot = recipe;
        }
    }

    /// First step of deletion. Issuing a new request invalidates any
    /// earlier token.
    pub fn request_delete(&mut self, id: &RecipeId) -> Result<DeleteToken, ViewError> {
        self.ensure_ready()?;
        if self.get(id).is_none() {
            return Err(ViewError::UnknownRecipe(id.clone()));
        }
        self.next_token += 1;
        let token = DeleteToken(self.next_token);
        self.pending_delete = Some((token, id.clone()));
        Ok(token)
    }

    /// The recipe awaiting confirmation, if any.
    pub fn pending_delete(&self) -> Option<&RecipeId> {
        self.pending_delete.as_ref().map(|(_, id)| id)
    }

    pub fn cancel_delete(&mut self, token: DeleteToken) -> Result<(), ViewError> {
        match self.pending_delete {
            Some((pending, _)) if pending == token => {
                self.pending_delete = None;
                Ok(())
            }
            _ => Err(ViewError::InvalidToken),
        }
    }

    /// Second step of deletion. The token is consumed whether or not the
    /// request succeeds. On failure the record stays in the cache.
    pub async fn confirm_delete<A: RecipeApi + ?Sized>(
        &mut self,
        token: DeleteToken,
        api: &A,
    ) -> Result<(), ViewError> {
        self.ensure_ready()?;
        let id = match self.pending_delete.take() {
            Some((pending, id)) if pending == token => id,
            other => {
                self.pending_delete = other;
                return Err(ViewError::InvalidToken);
            }
        };

        match api.delete(&id).await {
            Ok(()) => {
                self.recipes.retain(|r| r.id != id);
                if self.draft.as_ref().is_some_and(|d| d.id == id) {
                    self.draft = None;
                }
                self.last_error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn ensure_ready(&self) -> Result<(), ViewError> {
        match self.state {
            LoadState::Ready => Ok(()),
            _ => Err(ViewError::NotReady),
        }
    }

    fn fail(&mut self, e: ClientError) -> ViewError {
        tracing::warn!(error = %e, "recipe action failed");
        self.last_error = Some(e.clone());
        e.into()
    }
}

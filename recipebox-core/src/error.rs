use thiserror::Error;

use crate::types::RecipeId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Storage failure: {0}")]
    Backend(String),
}

/// Errors seen by the client side of the HTTP contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Invalid recipe: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Could not reach server: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {0}")]
    Server(String),
}

impl From<StoreError> for ClientError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => ClientError::Validation(e.to_string()),
            StoreError::NotFound(id) => ClientError::NotFound(format!("Recipe not found: {}", id)),
            StoreError::Backend(msg) => ClientError::Server(msg),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err.to_string())
    }
}

/// Errors raised by view-model transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Recipes are not loaded")]
    NotReady,

    #[error("Recipes have already been requested")]
    AlreadyRequested,

    #[error("No recipe with id {0} in the current list")]
    UnknownRecipe(RecipeId),

    #[error("No recipe is being edited")]
    NoDraft,

    #[error("Delete confirmation token is not valid")]
    InvalidToken,

    #[error(transparent)]
    Client(#[from] ClientError),
}

use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{extract::State, Json};
use recipebox_core::Recipe;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    /// Every recipe, oldest first
    pub data: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "/get-recipes",
    tag = "recipes",
    responses(
        (status = 200, description = "All recipes", body = ListRecipesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(store): State<AppState>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let data = store.list().await?;
    tracing::debug!(count = data.len(), "listed recipes");
    Ok(Json(ListRecipesResponse { data }))
}

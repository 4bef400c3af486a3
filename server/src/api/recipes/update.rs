use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use recipebox_core::{Recipe, RecipeId, RecipeInput};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub data: Recipe,
}

/// Replaces every mutable field. The body is validated before the id is
/// looked up, so an invalid body for an unknown id is a 400.
#[utoipa::path(
    put,
    path = "/edit-recipe/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipeInput,
    responses(
        (status = 200, description = "Recipe updated successfully", body = RecipeResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(input) = payload?;
    let data = store.update(&RecipeId::from(id), input).await?;
    Ok(Json(RecipeResponse { data }))
}

use crate::api::{ApiError, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use recipebox_core::{Recipe, RecipeInput};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    /// Always `"ok"`
    pub status: String,
    pub data: Recipe,
}

#[utoipa::path(
    post,
    path = "/create-recipe",
    tag = "recipes",
    request_body = RecipeInput,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let recipe = store.create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRecipeResponse {
            status: "ok".to_string(),
            data: recipe,
        }),
    ))
}

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;
use recipebox_core::paths;
use utoipa::OpenApi;

/// Returns the router for the recipe endpoints (mounted at the root)
pub fn router() -> Router<AppState> {
    Router::new()
        .route(paths::LIST, get(list::list_recipes))
        .route(paths::CREATE, post(create::create_recipe))
        .route(paths::EDIT, put(update::update_recipe))
        .route(paths::DELETE, delete(delete::delete_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        update::update_recipe,
        delete::delete_recipe,
    ),
    components(schemas(
        list::ListRecipesResponse,
        create::CreateRecipeResponse,
        update::RecipeResponse,
        delete::StatusResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use recipebox_core::{MemoryStore, RecipeStore};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state: AppState = store.clone();
        (router().with_state(state), store)
    }

    fn tea() -> Value {
        json!({
            "title": "Tea",
            "ingredients": ["water", "leaves"],
            "instructions": "boil",
            "cuisineType": "Asian",
            "cookingTime": 5
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_returns_201_with_envelope() {
        let (app, store) = app();

        let (status, body) = send(&app, Method::POST, "/create-recipe", Some(&tea().to_string())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["data"]["title"], "Tea");
        assert_eq!(body["data"]["cuisineType"], "Asian");
        assert!(body["data"]["id"].is_string());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_400() {
        let (app, store) = app();
        let mut payload = tea();
        payload.as_object_mut().unwrap().remove("cookingTime");

        let (status, body) =
            send(&app, Method::POST, "/create-recipe", Some(&payload.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Missing required field(s): cookingTime");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unstorable_cooking_time_is_400() {
        let (app, store) = app();
        let mut payload = tea();
        payload["cookingTime"] = json!(3_000_000_000u64);

        let (status, body) =
            send(&app, Method::POST, "/create-recipe", Some(&payload.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "cookingTime is out of range");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_keeps_padded_text() {
        let (app, _store) = app();
        let mut payload = tea();
        payload["title"] = json!(" Tea ");
        payload["ingredients"] = json!(["water", " leaves "]);

        let (status, body) =
            send(&app, Method::POST, "/create-recipe", Some(&payload.to_string())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["title"], " Tea ");
        assert_eq!(body["data"]["ingredients"], json!(["water", " leaves "]));
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (app, _store) = app();

        let (status, body) = send(&app, Method::POST, "/create-recipe", Some("{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request body"));
    }

    #[tokio::test]
    async fn test_list_returns_data_in_insertion_order() {
        let (app, store) = app();
        for title in ["Pasta", "Soup"] {
            let mut payload = tea();
            payload["title"] = json!(title);
            store
                .create(serde_json::from_value(payload).unwrap())
                .await
                .unwrap();
        }

        let (status, body) = send(&app, Method::GET, "/get-recipes", None).await;

        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["Pasta", "Soup"]);
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (app, store) = app();
        let created = store
            .create(serde_json::from_value(tea()).unwrap())
            .await
            .unwrap();
        let mut payload = tea();
        payload["cookingTime"] = json!(10);

        let uri = format!("/edit-recipe/{}", created.id);
        let (status, body) = send(&app, Method::PUT, &uri, Some(&payload.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], created.id.as_str());
        assert_eq!(body["data"]["cookingTime"], 10);
        assert_eq!(store.list().await.unwrap()[0].fields.cooking_time, 10);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_404() {
        let (app, store) = app();

        let (status, body) = send(
            &app,
            Method::PUT,
            "/edit-recipe/does-not-exist",
            Some(&tea().to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let (app, _store) = app();

        let (status, _body) =
            send(&app, Method::PUT, "/edit-recipe/does-not-exist", Some("{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (app, store) = app();
        let created = store
            .create(serde_json::from_value(tea()).unwrap())
            .await
            .unwrap();
        let uri = format!("/delete-recipe/{}", created.id);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
        assert!(store.is_empty().await);

        let (status, _body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }
}

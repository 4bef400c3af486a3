use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::RecipeApi;
use crate::error::ClientError;
use crate::paths;
use crate::types::{Recipe, RecipeFields, RecipeId};

pub const DEFAULT_SERVER: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpRecipeApi`].
#[derive(Clone)]
pub struct HttpRecipeApiBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpRecipeApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRecipeApiBuilder {
    /// Create a new builder with default settings.
    ///
    /// Environment variables:
    /// - `RECIPEBOX_SERVER`: base URL of the recipe server
    /// - `RECIPEBOX_TIMEOUT_SECS`: per-request timeout in seconds
    pub fn new() -> Self {
        let base_url =
            std::env::var("RECIPEBOX_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());

        let timeout = match std::env::var("RECIPEBOX_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(value = %raw, "invalid RECIPEBOX_TIMEOUT_SECS, using default");
                    DEFAULT_TIMEOUT
                }
            },
            Err(_) => DEFAULT_TIMEOUT,
        };

        Self {
            base_url,
            timeout,
            user_agent: format!("recipebox/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the server base URL, e.g. `http://localhost:5000`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn build(self) -> Result<HttpRecipeApi, ClientError> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(HttpRecipeApi {
            inner,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// [`RecipeApi`] over HTTP/JSON.
#[derive(Clone)]
pub struct HttpRecipeApi {
    inner: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct CreateEnvelope {
    status: String,
    data: Option<Recipe>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: String,
}

impl HttpRecipeApi {
    pub fn new() -> Result<Self, ClientError> {
        HttpRecipeApiBuilder::new().build()
    }

    pub fn builder() -> HttpRecipeApiBuilder {
        HttpRecipeApiBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a route against the base URL, substituting `{id}`.
    /// The id is percent-encoded as a single path segment.
    fn endpoint(&self, route: &str, id: Option<&RecipeId>) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Transport(format!("Invalid server URL: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Transport("Invalid server URL".to_string()))?;
            segments.pop_if_empty();
            for segment in route.trim_start_matches('/').split('/') {
                match (segment, id) {
                    ("{id}", Some(id)) => segments.push(id.as_str()),
                    _ => segments.push(segment),
                };
            }
        }
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map_err(transport_error)?;
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));

        tracing::debug!(status = %status, message = %message, "request rejected");

        Err(match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation(message)
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server(message),
        })
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                ClientError::Timeout
            } else if e.is_decode() {
                ClientError::Server(format!("Unexpected response body: {}", e))
            } else {
                ClientError::Transport(e.to_string())
            }
        })
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(e.to_string())
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    async fn list(&self) -> Result<Vec<Recipe>, ClientError> {
        let response = self.send(self.inner.get(self.endpoint(paths::LIST, None)?)).await?;
        let envelope: DataEnvelope<Vec<Recipe>> = Self::json(response).await?;
        Ok(envelope.data)
    }

    async fn create(&self, fields: &RecipeFields) -> Result<Recipe, ClientError> {
        let response = self
            .send(self.inner.post(self.endpoint(paths::CREATE, None)?).json(fields))
            .await?;
        let envelope: CreateEnvelope = Self::json(response).await?;

        match (envelope.status.as_str(), envelope.data) {
            ("ok", Some(recipe)) => Ok(recipe),
            _ => Err(ClientError::Server(
                envelope
                    .message
                    .unwrap_or_else(|| "Failed to create recipe".to_string()),
            )),
        }
    }

    async fn update(&self, id: &RecipeId, fields: &RecipeFields) -> Result<Recipe, ClientError> {
        let response = self
            .send(self.inner.put(self.endpoint(paths::EDIT, Some(id))?).json(fields))
            .await?;
        let envelope: DataEnvelope<Recipe> = Self::json(response).await?;
        Ok(envelope.data)
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), ClientError> {
        // Body is implementation-defined; only the status matters.
        self.send(self.inner.delete(self.endpoint(paths::DELETE, Some(id))?))
            .await?;
        Ok(())
    }
}

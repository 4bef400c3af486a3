//! In-process [`RecipeApi`] for tests.
//!
//! Requests are served by a [`MemoryStore`], so the mock follows the same
//! validation and not-found contract as the real server. Individual
//! operations can be made to fail to exercise client error paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::RecipeApi;
use crate::error::ClientError;
use crate::store::{MemoryStore, RecipeStore};
use crate::types::{Recipe, RecipeFields, RecipeId, RecipeInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// Failure injected into the next call of an [`Operation`].
#[derive(Debug, Clone)]
pub enum MockFailure {
    Transport,
    Timeout,
    Server(String),
}

impl From<MockFailure> for ClientError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::Transport => ClientError::Transport("connection refused".to_string()),
            MockFailure::Timeout => ClientError::Timeout,
            MockFailure::Server(message) => ClientError::Server(message),
        }
    }
}

#[derive(Default)]
pub struct MockRecipeApi {
    store: Arc<MemoryStore>,
    failures: Mutex<HashMap<Operation, MockFailure>>,
    calls: AtomicUsize,
}

impl MockRecipeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the given records, keeping their ids.
    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            store: Arc::new(MemoryStore::with_recipes(recipes)),
            ..Self::default()
        }
    }

    /// Make the next call of `operation` fail. The failure is consumed.
    pub fn fail_next(&self, operation: Operation, failure: MockFailure) {
        self.failures().insert(operation, failure);
    }

    /// The backing store, for asserting on server-side state.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Number of requests that reached the mock, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Recovers a poisoned lock, so injected failures are never dropped.
    fn failures(&self) -> MutexGuard<'_, HashMap<Operation, MockFailure>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, operation: Operation) -> Result<(), ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failures().remove(&operation) {
            Some(failure) => Err(failure.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecipeApi for MockRecipeApi {
    async fn list(&self) -> Result<Vec<Recipe>, ClientError> {
        self.begin(Operation::List)?;
        Ok(self.store.list().await?)
    }

    async fn create(&self, fields: &RecipeFields) -> Result<Recipe, ClientError> {
        self.begin(Operation::Create)?;
        Ok(self.store.create(RecipeInput::from(fields.clone())).await?)
    }

    async fn update(&self, id: &RecipeId, fields: &RecipeFields) -> Result<Recipe, ClientError> {
        self.begin(Operation::Update)?;
        Ok(self
            .store
            .update(id, RecipeInput::from(fields.clone()))
            .await?)
    }

    async fn delete(&self, id: &RecipeId) -> Result<(), ClientError> {
        self.begin(Operation::Delete)?;
        Ok(self.store.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_injected_failure_is_consumed_once() {
        let api = MockRecipeApi::new();
        api.fail_next(Operation::List, MockFailure::Timeout);

        assert_eq!(api.list().await, Err(ClientError::Timeout));
        assert_eq!(api.list().await, Ok(Vec::new()));
        assert_eq!(api.calls(), 2);
    }

    #[tokio::test]
    async fn test_injection_survives_poisoned_lock() {
        let api = MockRecipeApi::new();
        std::thread::scope(|s| {
            let poisoner = s.spawn(|| {
                let _guard = api.failures.lock();
                panic!("poison the failure table");
            });
            assert!(poisoner.join().is_err());
        });
        assert!(api.failures.is_poisoned());

        api.fail_next(Operation::Delete, MockFailure::Server("boom".to_string()));

        assert_eq!(
            api.delete(&RecipeId::new("x")).await,
            Err(ClientError::Server("boom".to_string()))
        );
    }
}

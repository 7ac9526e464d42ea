//! Test-only collection directory.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::directory::CollectionDirectory;
use crate::error::IndexError;

#[derive(Debug, Clone, Default)]
pub struct MockDirectory {
    endpoint: Option<String>,
    lookup_error: Option<String>,
    lookups: Arc<AtomicUsize>,
}

impl MockDirectory {
    /// Resolve every collection to `endpoint`.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Report every collection as missing.
    #[must_use]
    pub fn missing() -> Self {
        Self::default()
    }

    /// Fail every lookup with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            lookup_error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of lookups performed so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CollectionDirectory for MockDirectory {
    async fn collection_endpoint(&self, name: &str) -> Result<String, IndexError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.lookup_error {
            return Err(IndexError::Lookup(message.clone()));
        }
        self.endpoint
            .clone()
            .ok_or_else(|| IndexError::CollectionNotFound {
                name: name.to_owned(),
            })
    }
}

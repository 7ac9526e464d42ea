use std::future::Future;

use aws_config::SdkConfig;
use aws_sdk_opensearchserverless::Client;
use aws_sdk_opensearchserverless::error::DisplayErrorContext;

use crate::error::IndexError;

/// Administrative lookup of a collection's current network endpoint.
pub trait CollectionDirectory: Send + Sync {
    /// Return the endpoint URL of the collection named `name`.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::CollectionNotFound` if no such collection exists, or
    /// `IndexError::Lookup` if the lookup call itself fails.
    fn collection_endpoint(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<String, IndexError>> + Send;
}

/// OpenSearch Serverless collection lookup via `BatchGetCollection`.
#[derive(Clone)]
pub struct AossDirectory {
    client: Client,
}

impl std::fmt::Debug for AossDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AossDirectory").finish_non_exhaustive()
    }
}

impl AossDirectory {
    #[must_use]
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

impl CollectionDirectory for AossDirectory {
    async fn collection_endpoint(&self, name: &str) -> Result<String, IndexError> {
        let output = self
            .client
            .batch_get_collection()
            .names(name)
            .send()
            .await
            .map_err(|e| IndexError::Lookup(DisplayErrorContext(&e).to_string()))?;

        if let Some(err) = output.collection_error_details().first() {
            let message = err.error_message().unwrap_or("unknown error");
            let code = err.error_code().unwrap_or("UNKNOWN");
            tracing::warn!(collection = name, code, "collection lookup reported an error: {message}");
            return Err(IndexError::Lookup(format!("{code}: {message}")));
        }

        let details = output.collection_details();
        let detail = details
            .iter()
            .find(|d| d.name() == Some(name))
            .or_else(|| details.first())
            .ok_or_else(|| IndexError::CollectionNotFound {
                name: name.to_owned(),
            })?;

        detail
            .collection_endpoint()
            .filter(|e| !e.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| IndexError::CollectionNotFound {
                name: name.to_owned(),
            })
    }
}

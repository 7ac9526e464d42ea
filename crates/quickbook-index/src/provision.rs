//! End-to-end index provisioning: resolve the collection, then create the index.

use std::io::Write;

use crate::client::{CreateOutcome, IndexClient};
use crate::directory::CollectionDirectory;
use crate::endpoint::CollectionEndpoint;
use crate::error::IndexError;
use crate::schema::IndexBody;
use crate::signer::RequestSigner;

#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionReport {
    pub endpoint: CollectionEndpoint,
    pub index: String,
    pub outcome: CreateOutcome,
}

impl ProvisionReport {
    /// Write the human-readable outcome line, plus the service response for a new index.
    ///
    /// # Errors
    ///
    /// Returns an error if the response cannot be serialized or `out` fails.
    pub fn write_outcome<W: Write>(&self, out: &mut W) -> Result<(), IndexError> {
        match &self.outcome {
            CreateOutcome::Created { response } => {
                writeln!(out, "Index '{}' created successfully!", self.index)?;
                writeln!(out, "{}", serde_json::to_string_pretty(response)?)?;
            }
            CreateOutcome::AlreadyExists => {
                writeln!(out, "Index '{}' already exists", self.index)?;
            }
        }
        Ok(())
    }
}

pub struct Provisioner<D, S> {
    directory: D,
    signer: S,
    http: reqwest::Client,
    collection: String,
    index: String,
    body: IndexBody,
}

impl<D, S> std::fmt::Debug for Provisioner<D, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provisioner")
            .field("collection", &self.collection)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<D, S> Provisioner<D, S>
where
    D: CollectionDirectory,
    S: RequestSigner + Clone,
{
    /// Provision `index` in `collection` with the textbook schema.
    #[must_use]
    pub fn new(
        directory: D,
        signer: S,
        http: reqwest::Client,
        collection: impl Into<String>,
        index: impl Into<String>,
    ) -> Self {
        Self {
            directory,
            signer,
            http,
            collection: collection.into(),
            index: index.into(),
            body: IndexBody::textbook(),
        }
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    #[must_use]
    pub fn body(&self) -> &IndexBody {
        &self.body
    }

    /// Look up the collection's current endpoint. Never cached between calls.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails or reports an unusable endpoint.
    pub async fn resolve_endpoint(&self) -> Result<CollectionEndpoint, IndexError> {
        let raw = self.directory.collection_endpoint(&self.collection).await?;
        let endpoint = CollectionEndpoint::parse(&raw)?;
        tracing::info!(
            collection = %self.collection,
            host = endpoint.host(),
            port = endpoint.port(),
            "resolved collection endpoint"
        );
        Ok(endpoint)
    }

    /// Create the index on an already resolved endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the index already existing.
    pub async fn create_index(
        &self,
        endpoint: CollectionEndpoint,
    ) -> Result<CreateOutcome, IndexError> {
        IndexClient::new(self.http.clone(), endpoint, self.signer.clone())
            .create_index(&self.index, &self.body)
            .await
    }

    /// Resolve the endpoint, create the index, and report both steps to `out`.
    ///
    /// The endpoint line is written as soon as the lookup succeeds, so it is visible
    /// even when creation fails.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of either step, or of writing to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<ProvisionReport, IndexError> {
        let endpoint = self.resolve_endpoint().await?;
        writeln!(out, "Collection endpoint: {endpoint}")?;
        out.flush()?;

        let outcome = self.create_index(endpoint.clone()).await?;
        let report = ProvisionReport {
            endpoint,
            index: self.index.clone(),
            outcome,
        };
        report.write_outcome(out)?;
        out.flush()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::signer::Unsigned;

    struct FixedDirectory {
        endpoint: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl CollectionDirectory for FixedDirectory {
        async fn collection_endpoint(&self, name: &str) -> Result<String, IndexError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.endpoint
                .clone()
                .ok_or_else(|| IndexError::CollectionNotFound {
                    name: name.to_owned(),
                })
        }
    }

    fn provisioner(endpoint: Option<String>) -> (Provisioner<FixedDirectory, Unsigned>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let directory = FixedDirectory {
            endpoint,
            calls: Arc::clone(&calls),
        };
        let p = Provisioner::new(
            directory,
            Unsigned,
            reqwest::Client::new(),
            "quickbook-vectors",
            "textbook-index",
        );
        (p, calls)
    }

    #[tokio::test]
    async fn run_creates_index_on_resolved_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/textbook-index"))
            .and(body_json(serde_json::to_value(IndexBody::textbook()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true,
                "index": "textbook-index"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (p, calls) = provisioner(Some(server.uri()));
        let mut out = Vec::new();
        let report = p.run(&mut out).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.index, "textbook-index");
        assert_eq!(report.endpoint.host(), "127.0.0.1");
        assert!(matches!(report.outcome, CreateOutcome::Created { .. }));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with(&format!("Collection endpoint: {}\n", server.uri())));
        assert!(printed.contains("Index 'textbook-index' created successfully!\n"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn closed_output_is_reported_as_io_error() {
        let (p, _calls) = provisioner(Some("https://abc.eu-west-1.aoss.amazonaws.com".into()));
        let err = p.run(&mut ClosedPipe).await.unwrap_err();
        assert!(matches!(err, IndexError::Io(_)));
    }

    #[tokio::test]
    async fn resolve_endpoint_is_not_cached() {
        let (p, calls) = provisioner(Some("https://abc.eu-west-1.aoss.amazonaws.com".into()));
        p.resolve_endpoint().await.unwrap();
        p.resolve_endpoint().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_collection_stops_before_create() {
        let (p, _calls) = provisioner(None);
        let mut out = Vec::new();
        let err = p.run(&mut out).await.unwrap_err();
        assert!(matches!(err, IndexError::CollectionNotFound { ref name } if name == "quickbook-vectors"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn invalid_endpoint_is_reported() {
        let (p, _calls) = provisioner(Some("ftp://abc".into()));
        let err = p.resolve_endpoint().await.unwrap_err();
        assert!(matches!(err, IndexError::InvalidEndpoint { .. }));
    }

    fn report(outcome: CreateOutcome) -> ProvisionReport {
        ProvisionReport {
            endpoint: CollectionEndpoint::parse("https://abc.eu-west-1.aoss.amazonaws.com").unwrap(),
            index: "textbook-index".into(),
            outcome,
        }
    }

    #[test]
    fn created_outcome_prints_pretty_response() {
        let mut out = Vec::new();
        report(CreateOutcome::Created {
            response: json!({ "acknowledged": true }),
        })
        .write_outcome(&mut out)
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Index 'textbook-index' created successfully!\n{\n  \"acknowledged\": true\n}\n"
        );
    }

    #[test]
    fn existing_index_prints_success_line() {
        let mut out = Vec::new();
        report(CreateOutcome::AlreadyExists)
            .write_outcome(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Index 'textbook-index' already exists\n"
        );
    }

    #[test]
    fn uses_textbook_schema() {
        let (p, _calls) = provisioner(None);
        assert_eq!(p.body(), &IndexBody::textbook());
        assert_eq!(p.collection(), "quickbook-vectors");
        assert_eq!(p.index(), "textbook-index");
    }
}

use serde::Deserialize;

use crate::endpoint::CollectionEndpoint;
use crate::error::IndexError;
use crate::schema::IndexBody;
use crate::signer::RequestSigner;

/// Result of a create-index call that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The index was created; carries the service acknowledgement.
    Created { response: serde_json::Value },
    /// An index with this name was already present. Nothing changed.
    AlreadyExists,
}

/// Index administration client bound to a single collection endpoint.
pub struct IndexClient<S> {
    http: reqwest::Client,
    endpoint: CollectionEndpoint,
    signer: S,
}

impl<S> std::fmt::Debug for IndexClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexClient")
            .field("endpoint", &self.endpoint.raw())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorField,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Detailed(ErrorDetail),
    Plain(String),
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type")]
    error_type: String,
    #[serde(default)]
    reason: Option<String>,
}

impl<S: RequestSigner> IndexClient<S> {
    #[must_use]
    pub fn new(http: reqwest::Client, endpoint: CollectionEndpoint, signer: S) -> Self {
        Self {
            http,
            endpoint,
            signer,
        }
    }

    /// Create `index` with the given body (`PUT /<index>`).
    ///
    /// An "already exists" rejection is reported as [`CreateOutcome::AlreadyExists`],
    /// decided by the error `type` in the response body, not by its message.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Api` for any other rejection, and transport, signing or
    /// JSON errors as their respective variants.
    pub async fn create_index(
        &self,
        index: &str,
        body: &IndexBody,
    ) -> Result<CreateOutcome, IndexError> {
        let url = self.endpoint.index_url(index)?;
        let mut request = self.http.put(url).json(body).build()?;
        self.signer.sign(&mut request).await?;

        let response = self.http.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let response = if text.trim().is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_str(&text)?
            };
            tracing::info!(index, "index created");
            return Ok(CreateOutcome::Created { response });
        }

        let err = parse_api_error(status.as_u16(), &text);
        if err.is_already_exists() {
            tracing::info!(index, "index already exists");
            return Ok(CreateOutcome::AlreadyExists);
        }
        Err(err)
    }
}

fn parse_api_error(status: u16, body: &str) -> IndexError {
    let (error_type, reason) = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            error: ErrorField::Detailed(detail),
        }) => (detail.error_type, detail.reason.unwrap_or_default()),
        Ok(ErrorEnvelope {
            error: ErrorField::Plain(message),
        }) => ("unknown".to_owned(), message),
        Err(_) => ("unknown".to_owned(), body.trim().to_owned()),
    };
    IndexError::Api {
        status,
        error_type,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::signer::Unsigned;

    fn client_for(server: &MockServer) -> IndexClient<Unsigned> {
        let endpoint = CollectionEndpoint::parse(&server.uri()).unwrap();
        IndexClient::new(reqwest::Client::new(), endpoint, Unsigned)
    }

    #[tokio::test]
    async fn create_sends_fixed_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/textbook-index"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::to_value(IndexBody::textbook()).unwrap()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "acknowledged": true,
                "shards_acknowledged": true,
                "index": "textbook-index"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .create_index("textbook-index", &IndexBody::textbook())
            .await
            .unwrap();

        match outcome {
            CreateOutcome::Created { response } => {
                assert_eq!(response["index"], "textbook-index");
                assert_eq!(response["acknowledged"], true);
            }
            CreateOutcome::AlreadyExists => panic!("expected Created"),
        }
    }

    #[tokio::test]
    async fn empty_success_body_is_null_response() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .create_index("textbook-index", &IndexBody::textbook())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            CreateOutcome::Created {
                response: serde_json::Value::Null
            }
        );
    }

    #[tokio::test]
    async fn already_exists_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/textbook-index"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "root_cause": [{
                        "type": "resource_already_exists_exception",
                        "reason": "index [textbook-index/abc] already exists",
                        "index": "textbook-index"
                    }],
                    "type": "resource_already_exists_exception",
                    "reason": "index [textbook-index/abc] already exists",
                    "index": "textbook-index"
                },
                "status": 400
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .create_index("textbook-index", &IndexBody::textbook())
            .await
            .unwrap();
        assert_eq!(outcome, CreateOutcome::AlreadyExists);
    }

    #[tokio::test]
    async fn other_api_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "type": "security_exception",
                    "reason": "no permissions for [indices:admin/create]"
                },
                "status": 403
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_index("textbook-index", &IndexBody::textbook())
            .await
            .unwrap_err();

        match err {
            IndexError::Api {
                status,
                ref error_type,
                ref reason,
            } => {
                assert_eq!(status, 403);
                assert_eq!(error_type, "security_exception");
                assert_eq!(reason, "no permissions for [indices:admin/create]");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_kept_as_reason() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway\n"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_index("textbook-index", &IndexBody::textbook())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "index API error (HTTP 502) unknown: Bad Gateway");
    }

    #[test]
    fn plain_string_error_parsed() {
        let err = parse_api_error(401, r#"{"error":"unauthorized","status":401}"#);
        assert_eq!(err.to_string(), "index API error (HTTP 401) unknown: unauthorized");
        assert!(!err.is_already_exists());
    }

    #[test]
    fn already_exists_message_without_type_is_an_error() {
        let err = parse_api_error(400, "resource_already_exists_exception");
        assert!(!err.is_already_exists());
    }
}

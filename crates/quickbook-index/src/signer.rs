//! Request authentication for the collection's data-plane endpoint.

use std::future::Future;
use std::time::SystemTime;

use aws_config::SdkConfig;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    PayloadChecksumKind, SignableBody, SignableRequest, SigningParams, SigningSettings,
    sign as sigv4_sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use reqwest::header::{HeaderName, HeaderValue};

use crate::error::IndexError;

/// SigV4 service name of OpenSearch Serverless.
pub const AOSS_SERVICE: &str = "aoss";

pub trait RequestSigner: Send + Sync {
    /// Add authentication headers to a fully built request.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be resolved or the request cannot be signed.
    fn sign(
        &self,
        request: &mut reqwest::Request,
    ) -> impl Future<Output = Result<(), IndexError>> + Send;
}

/// Leaves requests untouched. For local endpoints that do not authenticate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsigned;

impl RequestSigner for Unsigned {
    async fn sign(&self, _request: &mut reqwest::Request) -> Result<(), IndexError> {
        Ok(())
    }
}

/// Signs requests with AWS SigV4 using credentials from the ambient provider chain.
#[derive(Clone)]
pub struct SigV4Signer {
    credentials: SharedCredentialsProvider,
    region: String,
    service: &'static str,
}

impl std::fmt::Debug for SigV4Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigV4Signer")
            .field("region", &self.region)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

impl SigV4Signer {
    #[must_use]
    pub fn new(credentials: SharedCredentialsProvider, region: impl Into<String>) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: AOSS_SERVICE,
        }
    }

    /// Build a signer from the credentials provider and region of a loaded SDK config.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::Credentials` if the config has no credentials provider, or
    /// `IndexError::Signing` if it has no region.
    pub fn from_sdk_config(config: &SdkConfig) -> Result<Self, IndexError> {
        let credentials = config
            .credentials_provider()
            .ok_or_else(|| IndexError::Credentials("no credentials provider configured".into()))?;
        let region = config
            .region()
            .ok_or_else(|| IndexError::Signing("no region configured".into()))?;
        Ok(Self::new(credentials, region.to_string()))
    }
}

impl RequestSigner for SigV4Signer {
    async fn sign(&self, request: &mut reqwest::Request) -> Result<(), IndexError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| IndexError::Credentials(e.to_string()))?;
        let identity: Identity = credentials.into();

        let mut settings = SigningSettings::default();
        // aoss rejects requests without an explicit payload hash header.
        settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(self.service)
            .time(SystemTime::now())
            .settings(settings)
            .build()
            .map_err(|e| IndexError::Signing(e.to_string()))?
            .into();

        let instructions = {
            let body = request
                .body()
                .and_then(reqwest::Body::as_bytes)
                .unwrap_or_default();
            let headers = request
                .headers()
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)));
            let signable = SignableRequest::new(
                request.method().as_str(),
                request.url().as_str(),
                headers,
                SignableBody::Bytes(body),
            )
            .map_err(|e| IndexError::Signing(e.to_string()))?;
            let (instructions, _signature) = sigv4_sign(signable, &params)
                .map_err(|e| IndexError::Signing(e.to_string()))?
                .into_parts();
            instructions
        };

        for (name, value) in instructions.headers() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| IndexError::Signing(e.to_string()))?;
            let value = HeaderValue::from_str(value).map_err(|e| IndexError::Signing(e.to_string()))?;
            request.headers_mut().insert(name, value);
        }

        tracing::debug!(url = %request.url(), "signed request");
        Ok(())
    }
}

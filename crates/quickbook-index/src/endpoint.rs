use std::fmt;

use url::Url;

use crate::error::IndexError;

/// Network endpoint of a search collection, as reported by the collection lookup.
///
/// The lookup returns a full URL (`https://<id>.<region>.aoss.amazonaws.com`);
/// a bare host is accepted too and treated as HTTPS on port 443.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEndpoint {
    raw: String,
    url: Url,
}

impl CollectionEndpoint {
    /// # Errors
    ///
    /// Returns `IndexError::InvalidEndpoint` if the value is not an HTTP(S) URL with a host.
    pub fn parse(raw: &str) -> Result<Self, IndexError> {
        let raw = raw.trim();
        let invalid = |reason: &str| IndexError::InvalidEndpoint {
            endpoint: raw.to_owned(),
            reason: reason.to_owned(),
        };

        if raw.is_empty() {
            return Err(invalid("empty endpoint"));
        }
        let with_scheme = if raw.contains("://") {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };
        let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

        if !matches!(url.scheme(), "https" | "http") {
            return Err(invalid(&format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host"));
        }

        Ok(Self {
            raw: raw.to_owned(),
            url,
        })
    }

    /// The endpoint exactly as the lookup reported it.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Bare host with the scheme stripped.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(443)
    }

    #[must_use]
    pub fn uses_tls(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// URL of the index resource, e.g. `https://host/textbook-index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::InvalidEndpoint` if the endpoint cannot carry a path.
    pub fn index_url(&self, index: &str) -> Result<Url, IndexError> {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| IndexError::InvalidEndpoint {
                endpoint: self.raw.clone(),
                reason: "endpoint cannot be used as a base URL".into(),
            })?
            .clear()
            .push(index);
        Ok(url)
    }
}

impl fmt::Display for CollectionEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

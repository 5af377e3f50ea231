//! External dictionary lookup client.
//!
//! A word resolves to one of three outcomes: the dictionary knows it, the
//! dictionary does not know it, or the lookup itself failed (timeout,
//! connection refused). Only that trichotomy crosses this boundary; response
//! bodies never do.

use std::time::Instant;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::DictionaryConfig;

/// Transport-level lookup failure. Not a request-level error: callers
/// downgrade it to a per-word result and keep going.
#[derive(Debug, Error)]
#[error("dictionary lookup failed: {message}")]
pub struct LookupError {
    message: String,
}

impl LookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Seam for the external dictionary.
///
/// `Ok(true)` means the word is recognized, `Ok(false)` means it is not,
/// `Err` means the lookup could not classify the word at all.
#[async_trait]
pub trait DictionaryLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<bool, LookupError>;
}

/// HTTP client for dictionaryapi.dev-shaped APIs.
///
/// `GET {base_url}/{word}`: status 200 means recognized, any other status
/// means unknown word, transport failures surface as [`LookupError`].
pub struct HttpDictionary {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDictionary {
    pub fn new(cfg: &DictionaryConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| LookupError::new(format!("failed to build http client: {e}")))?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn word_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url, word)
    }
}

#[async_trait]
impl DictionaryLookup for HttpDictionary {
    async fn lookup(&self, word: &str) -> Result<bool, LookupError> {
        let started = Instant::now();
        let url = self.word_url(word);
        tracing::debug!(word = %word, "dictionary lookup");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                crate::metrics::record_dictionary_lookup("error", started.elapsed());
                tracing::warn!(word = %word, error = %e, "dictionary lookup transport failure");
                return Err(LookupError::new(e.to_string()));
            }
        };

        let found = response.status() == reqwest::StatusCode::OK;
        let outcome = if found { "found" } else { "not_found" };
        crate::metrics::record_dictionary_lookup(outcome, started.elapsed());
        Ok(found)
    }
}

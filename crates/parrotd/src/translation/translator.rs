//! External translation service seam and its HTTP implementation.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Errors reported by a [`Translator`].
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The configured endpoint is not a valid URL.
    #[error("invalid translator endpoint '{endpoint}': {source}")]
    Endpoint {
        /// Endpoint as configured.
        endpoint: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build translator client: {source}")]
    Client {
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The request failed or returned an error status.
    #[error("translation request failed: {source}")]
    Request {
        /// Underlying request error.
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not JSON.
    #[error("translation response was not valid JSON: {source}")]
    Decode {
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
    /// The JSON did not carry translated segments where expected.
    #[error("translation response had an unexpected shape")]
    UnexpectedShape,
}

/// Translates free text into a target language.
#[cfg_attr(test, mockall::automock)]
pub trait Translator {
    /// Returns `text` rendered in `target_language`.
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError>;
}

/// Client for a `translate_a/single` style endpoint.
///
/// The endpoint answers `GET ?client=gtx&sl=auto&tl=<lang>&dt=t&q=<text>` with
/// a nested array whose first element lists `[translated, original, ...]`
/// segments.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    endpoint: Url,
    client: reqwest::blocking::Client,
}

impl HttpTranslator {
    /// Builds a client for `endpoint` with a per-call `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::Endpoint`] for a malformed endpoint and
    /// [`TranslateError::Client`] when the TLS backend cannot be initialised.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, TranslateError> {
        let endpoint = Url::parse(endpoint).map_err(|source| TranslateError::Endpoint {
            endpoint: endpoint.to_owned(),
            source,
        })?;
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| TranslateError::Client { source })?;
        Ok(Self { endpoint, client })
    }

    fn request_url(&self, text: &str, target_language: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client", "gtx")
            .append_pair("sl", "auto")
            .append_pair("tl", target_language)
            .append_pair("dt", "t")
            .append_pair("q", text);
        url
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(self.request_url(text, target_language))
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|source| TranslateError::Request { source })?;
        let root: Value = response
            .json()
            .map_err(|source| TranslateError::Decode { source })?;
        translated_text(&root)
    }
}

/// Joins the translated half of every segment in a response document.
fn translated_text(root: &Value) -> Result<String, TranslateError> {
    let segments = root
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslateError::UnexpectedShape)?;
    let mut text = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            text.push_str(piece);
        }
    }
    Ok(text)
}

//! HTTP client wrapper - fetches raw dictionary responses
//!
//! One GET per lookup against the fixed API host. TLS always verifies the
//! certificate chain and host name, and connections are never reused, so every
//! lookup opens its own socket.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::config::Config;
use crate::constants::{API_BASE_PATH, API_HOST, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::decoder::{decode, Decoded};
use crate::error::TransportError;
use crate::messages::NetworkResponse;
use crate::models::Outcome;

/// Source of raw response bodies for a looked-up word
#[async_trait]
pub trait Fetch: Send + Sync + 'static {
    async fn fetch(&self, word: &str) -> Result<Vec<u8>, TransportError>;
}

/// Base of every lookup URL on the real API
pub fn api_base_url() -> String {
    format!("https://{}{}", API_HOST, API_BASE_PATH)
}

/// Build the lookup URL under `base`, percent-encoding the word
pub fn lookup_url(base: &str, word: &str, api_key: &str) -> String {
    format!(
        "{}/{}?key={}",
        base,
        urlencoding::encode(word),
        urlencoding::encode(api_key)
    )
}

/// Client for the Collegiate dictionary API
#[derive(Clone)]
pub struct TransportClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl TransportClient {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(REQUEST_TIMEOUT_SECS);
        Ok(TransportClient {
            client: create_client(true, timeout)?,
            base_url: api_base_url(),
            api_key: config.api_key.clone(),
            timeout,
        })
    }

    fn classify_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout(self.timeout.as_secs())
        } else if e.is_connect() {
            TransportError::Connect(error_chain(&e))
        } else {
            TransportError::Request(error_chain(&e))
        }
    }
}

#[async_trait]
impl Fetch for TransportClient {
    async fn fetch(&self, word: &str) -> Result<Vec<u8>, TransportError> {
        let start = Instant::now();
        let url = lookup_url(&self.base_url, word, &self.api_key);

        tracing::debug!(word, "Sending lookup request");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_send_error(e))?;

        let status = resp.status();
        tracing::debug!(word, status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout.as_secs())
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        tracing::debug!(
            word,
            bytes = body.len(),
            time_ms = start.elapsed().as_millis() as u64,
            "Response body read"
        );

        Ok(body.to_vec())
    }
}

/// Fetch and decode one word, folding every failure into the outcome
pub async fn execute_lookup<F: Fetch + ?Sized>(fetcher: &F, id: u64, word: String) -> NetworkResponse {
    let start = Instant::now();

    let outcome = match fetcher.fetch(&word).await {
        Ok(body) => match decode(&body) {
            Ok(Decoded::Definitions(definitions)) => Outcome::Definitions(definitions),
            Ok(Decoded::Suggestions(suggestions)) => Outcome::Suggestions(suggestions),
            Err(e) => Outcome::Failed(e.into()),
        },
        Err(e) => Outcome::Failed(e.into()),
    };

    NetworkResponse::Completed {
        id,
        word,
        outcome,
        time_ms: start.elapsed().as_millis() as u64,
    }
}

/// reqwest's top-level message hides the cause (DNS, TLS), so walk the sources
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Create the HTTP client shared by all lookups
pub fn create_client(https_only: bool, timeout: Duration) -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .https_only(https_only)
        .pool_max_idle_per_host(0)
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| TransportError::Request(error_chain(&e)))
}

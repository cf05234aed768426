//! The HTTP seam between message building and Discord's API.

use super::error::Result;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::debug;

/// The base URL of the Discord API, pinned to the version whose message
/// format we produce.
pub const API_BASE: &str = "https://discord.com/api/v10";

/// How long a single request may take before it's abandoned.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// The outcome of a completed HTTP exchange. Discord's body is kept verbatim
/// and never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything capable of POSTing a body and reporting what came back.
///
/// Errors are reserved for exchanges which never completed; any status code,
/// including 4xx and 5xx, is an `Ok`.
pub trait Transport {
    fn post(&self, url: &str, headers: &HeaderMap, body: String) -> Result<Response>;
}

/// The default [Transport], a blocking [reqwest] client with a fixed timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, url: &str, headers: &HeaderMap, body: String) -> Result<Response> {
        let res = self
            .client
            .post(url)
            .headers(headers.clone())
            .body(body)
            .send()?;

        let status = res.status().as_u16();
        let body = res.text()?;
        debug!(status, bytes = body.len(), "Discord API responded");

        Ok(Response { status, body })
    }
}

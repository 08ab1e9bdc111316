//! Shared outbound HTTP client
//!
//! One lazily constructed `reqwest::Client` per server process, shared
//! read-only across all concurrent invocations. Fixed 30 second timeout;
//! non-2xx responses are returned to the caller for inspection, never
//! turned into errors here.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::{error, warn};

/// Fixed timeout applied to every outbound call
pub const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

/// Lazily constructed holder for the shared upstream client
pub struct OutboundClient {
    client: OnceLock<reqwest::Client>,
    bearer_token: Option<String>,
}

impl OutboundClient {
    /// Create a holder; the underlying client is built on first use.
    ///
    /// When `bearer_token` is set (from `ACCESS_CI_API_KEY`) it is
    /// attached as an `Authorization: Bearer` default header on every
    /// outbound request.
    pub fn new(bearer_token: Option<String>) -> Self {
        Self {
            client: OnceLock::new(),
            bearer_token,
        }
    }

    /// The shared client, building it on the first call
    pub fn get(&self) -> &reqwest::Client {
        self.client.get_or_init(|| {
            let mut headers = HeaderMap::new();
            if let Some(token) = &self.bearer_token {
                match HeaderValue::from_str(&format!("Bearer {}", token)) {
                    Ok(mut value) => {
                        value.set_sensitive(true);
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => {
                        warn!("ACCESS_CI_API_KEY contains non-header characters, ignoring");
                    }
                }
            }

            match reqwest::Client::builder()
                .timeout(OUTBOUND_TIMEOUT)
                .default_headers(headers)
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    // Fallback loses the timeout and bearer header
                    error!("Failed to build outbound client ({}), falling back to defaults", e);
                    reqwest::Client::default()
                }
            }
        })
    }
}

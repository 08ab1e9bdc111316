//! Environment-driven server configuration
//!
//! All recognized options come from the process environment, parsed once
//! at startup. The service endpoint map is immutable for the process
//! lifetime and consulted by the remote-call client.

use std::collections::HashMap;

use tracing::warn;
use url::Url;

/// Immutable `service name -> base URL` map
///
/// Parsed from the `ACCESS_MCP_SERVICES` environment variable, a
/// comma-separated list of `name=url` pairs.
#[derive(Debug, Clone, Default)]
pub struct ServiceMap {
    endpoints: HashMap<String, Url>,
}

impl ServiceMap {
    /// Parse a `name=url,name=url` configuration string.
    ///
    /// Malformed entries are skipped with a warning rather than failing
    /// startup; a peer call to a skipped service then fails with a
    /// "service not found" error at call time.
    pub fn parse(raw: &str) -> Self {
        let mut endpoints = HashMap::new();
        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((name, raw_url)) = entry.split_once('=') else {
                warn!("Ignoring malformed service entry (no '='): {}", entry);
                continue;
            };
            match Url::parse(raw_url.trim()) {
                Ok(url) => {
                    endpoints.insert(name.trim().to_string(), url);
                }
                Err(e) => {
                    warn!("Ignoring service '{}' with invalid URL: {}", name.trim(), e);
                }
            }
        }
        Self { endpoints }
    }

    /// Look up a service's base URL
    pub fn get(&self, name: &str) -> Option<&Url> {
        self.endpoints.get(name)
    }

    /// Number of configured services
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl std::iter::FromIterator<(String, Url)> for ServiceMap {
    fn from_iter<T: IntoIterator<Item = (String, Url)>>(iter: T) -> Self {
        Self {
            endpoints: iter.into_iter().collect(),
        }
    }
}

/// Configuration snapshot for one server process
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port; set selects HTTP mode, unset selects STDIO mode
    pub port: Option<u16>,
    /// Log level filter, default `warn`
    pub log_level: String,
    /// Bearer token attached to all outbound upstream calls
    pub upstream_api_key: Option<String>,
    /// Value the inbound `X-Api-Key` header must match when API-key
    /// enforcement is enabled
    pub inbound_api_key: Option<String>,
    /// Peer server endpoints
    pub services: ServiceMap,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: None,
            log_level: "warn".to_string(),
            upstream_api_key: None,
            inbound_api_key: None,
            services: ServiceMap::default(),
        }
    }
}

impl ServerConfig {
    /// Read the recognized environment options.
    ///
    /// `PORT`, `LOG_LEVEL`, `ACCESS_CI_API_KEY`, `MCP_API_KEY`,
    /// `ACCESS_MCP_SERVICES`. A non-numeric `PORT` is treated as unset
    /// with a warning, which falls back to STDIO mode.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("Ignoring non-numeric PORT value: {}", raw);
                    None
                }
            },
            Err(_) => None,
        };

        let services = std::env::var("ACCESS_MCP_SERVICES")
            .map(|raw| ServiceMap::parse(&raw))
            .unwrap_or_default();

        Self {
            port,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
            upstream_api_key: std::env::var("ACCESS_CI_API_KEY").ok(),
            inbound_api_key: std::env::var("MCP_API_KEY").ok(),
            services,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_service_pairs() {
        let map = ServiceMap::parse(
            "compute-resources=http://localhost:3002,events=http://localhost:3005/",
        );
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("compute-resources").unwrap().as_str(),
            "http://localhost:3002/"
        );
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn skips_malformed_entries() {
        let map = ServiceMap::parse("good=http://localhost:1:bad,noequals,empty=,ok=http://h");
        // "empty=" has no parseable URL, "noequals" has no '=',
        // "good" has an invalid port; only "ok" survives
        assert_eq!(map.len(), 1);
        assert!(map.get("ok").is_some());
    }

    #[test]
    fn empty_value_yields_empty_map() {
        assert!(ServiceMap::parse("").is_empty());
        assert!(ServiceMap::parse(" , ,").is_empty());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Outgoing API requests.
//!
//! One `reqwest` client and one cookie jar are shared by the CSRF handshake
//! and the request signer, so the cookie set by the handshake endpoint is
//! both readable by the client and sent back with the signed request.

pub mod csrf;
pub mod signer;

pub use csrf::{CsrfHandshake, CsrfToken};
pub use signer::{RequestBody, RequestSigner, SignerKind};

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use reqwest::cookie::Jar;
use reqwest::{Client, Url};
use std::sync::Arc;

/// Builds the credentialed client used for every portal request.
pub fn build_client(api: &ApiConfig, jar: Arc<Jar>) -> Result<Client> {
    Client::builder()
        .cookie_provider(jar)
        .user_agent(api.user_agent.as_str())
        .build()
        .map_err(Error::from)
}

/// Parses the configured API origin.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .map_err(|e| Error::Config(format!("invalid API base URL '{}': {}", base_url, e)))
}

/// Absolute URLs are used as-is; anything else is joined onto `base`.
pub fn resolve_url(base: &Url, target: &str) -> Result<Url> {
    if target.starts_with("http://") || target.starts_with("https://") {
        return Url::parse(target)
            .map_err(|e| Error::Http(format!("invalid URL '{}': {}", target, e)));
    }
    base.join(target)
        .map_err(|e| Error::Http(format!("invalid URL '{}': {}", target, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_targets_join_onto_base() {
        let base = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            resolve_url(&base, "/api/profile/").unwrap().as_str(),
            "http://localhost:8000/api/profile/"
        );
    }

    #[test]
    fn absolute_targets_are_kept() {
        let base = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            resolve_url(&base, "https://cdn.example/file.json").unwrap().as_str(),
            "https://cdn.example/file.json"
        );
    }

    #[test]
    fn invalid_base_is_a_config_error() {
        assert!(matches!(parse_base_url("not a url"), Err(Error::Config(_))));
    }

    #[test]
    fn client_builds_from_default_config() {
        assert!(build_client(&ApiConfig::default(), Arc::new(Jar::default())).is_ok());
    }
}

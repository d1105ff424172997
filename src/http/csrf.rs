// SPDX-License-Identifier: MPL-2.0
//! CSRF handshake.
//!
//! A credentialed `GET` to the handshake endpoint makes the server set the
//! CSRF cookie; the token is then read back from the shared cookie jar.
//! Every call performs a fresh handshake.

use crate::config::ApiConfig;
use crate::error::{CsrfError, Result};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};
use std::fmt;
use std::sync::Arc;

/// Anti-forgery token read from the CSRF cookie. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keeps token values out of debug logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

#[derive(Debug, Clone)]
pub struct CsrfHandshake {
    client: Client,
    jar: Arc<Jar>,
    endpoint: Url,
    cookie_name: String,
}

impl CsrfHandshake {
    /// `client` must use `jar` as its cookie provider.
    pub fn new(client: Client, jar: Arc<Jar>, base_url: &Url, api: &ApiConfig) -> Result<Self> {
        let endpoint = super::resolve_url(base_url, &api.csrf_path)?;
        Ok(Self {
            client,
            jar,
            endpoint,
            cookie_name: api.csrf_cookie.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs the handshake and returns the token from the cookie jar.
    ///
    /// # Errors
    ///
    /// - [`CsrfError::Transport`] when no response arrives
    /// - [`CsrfError::FetchFailed`] on a non-success status
    /// - [`CsrfError::TokenMissing`] when the cookie is absent afterwards
    pub async fn fetch(&self) -> std::result::Result<CsrfToken, CsrfError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| CsrfError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CsrfError::FetchFailed {
                status: status.as_u16(),
            });
        }

        self.read_cookie().ok_or_else(|| CsrfError::TokenMissing {
            cookie: self.cookie_name.clone(),
        })
    }

    /// Current CSRF cookie value for the handshake endpoint, if any.
    pub fn read_cookie(&self) -> Option<CsrfToken> {
        let header = self.jar.cookies(&self.endpoint)?;
        let header = header.to_str().ok()?;
        find_cookie(header, &self.cookie_name).map(CsrfToken::new)
    }
}

/// Finds `name` in a `Cookie` header value (`a=1; b=2`). Empty values count
/// as absent.
fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

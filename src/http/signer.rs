// SPDX-License-Identifier: MPL-2.0
//! Request signer.
//!
//! Every call performs a fresh CSRF handshake, then builds and sends the
//! request with the headers its [`SignerKind`] calls for. HTTP error
//! statuses are returned to the caller as ordinary responses.
//!
//! | kind     | Content-Type          | CSRF | Authorization | Accept | Accept-Language |
//! |----------|-----------------------|------|---------------|--------|-----------------|
//! | `Plain`  | `application/json`    | yes  |               |        |                 |
//! | `Bearer` | `application/json`    | yes  | yes           |        | yes             |
//! | `File`   | `multipart/form-data` | yes  |               | json   | yes             |
//!
//! A missing access token or persisted locale omits its header.

use super::csrf::{CsrfHandshake, CsrfToken};
use crate::app::storage::{ClientStorage, LOCALE_KEY};
use crate::config::{ApiConfig, CsrfPolicy};
use crate::diagnostics::{DiagnosticEventKind, Diagnostics};
use crate::error::{Error, Result};
use crate::session;
use reqwest::cookie::Jar;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE,
};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, Url};
use std::sync::Arc;

const JSON: &str = "application/json";
const MULTIPART: &str = "multipart/form-data";

/// Which header set a request gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerKind {
    Plain,
    Bearer,
    File,
}

impl SignerKind {
    fn default_content_type(self) -> &'static str {
        match self {
            SignerKind::Plain | SignerKind::Bearer => JSON,
            SignerKind::File => MULTIPART,
        }
    }
}

#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    /// Sent with a generated multipart boundary.
    Multipart(Form),
}

#[derive(Debug, Clone)]
pub struct RequestSigner {
    client: Client,
    csrf: CsrfHandshake,
    base_url: Url,
    csrf_header: HeaderName,
    policy: CsrfPolicy,
    storage: ClientStorage,
    diagnostics: Diagnostics,
}

impl RequestSigner {
    /// Builds the shared client, cookie jar and CSRF handshake from `api`.
    pub fn new(api: &ApiConfig, storage: ClientStorage, diagnostics: Diagnostics) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = super::build_client(api, jar.clone())?;
        let base_url = super::parse_base_url(&api.base_url)?;
        let csrf = CsrfHandshake::new(client.clone(), jar, &base_url, api)?;
        let csrf_header = HeaderName::from_bytes(api.csrf_header.as_bytes()).map_err(|e| {
            Error::Config(format!("invalid CSRF header name '{}': {}", api.csrf_header, e))
        })?;

        Ok(Self {
            client,
            csrf,
            base_url,
            csrf_header,
            policy: api.csrf_policy,
            storage,
            diagnostics,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn csrf_policy(&self) -> CsrfPolicy {
        self.policy
    }

    /// Signs and sends one request.
    ///
    /// # Errors
    ///
    /// - [`Error::Csrf`] when the handshake fails under [`CsrfPolicy::Abort`]
    /// - [`Error::Http`] for an invalid URL, an unencodable header value or
    ///   a transport failure of the request itself
    pub async fn send(
        &self,
        kind: SignerKind,
        method: Method,
        url: &str,
        body: RequestBody,
    ) -> Result<Response> {
        let url = super::resolve_url(&self.base_url, url)?;
        let csrf = self.csrf_token(&url).await?;
        let headers = self.headers(kind, csrf.as_ref(), &body)?;

        tracing::debug!(
            %method,
            %url,
            ?kind,
            csrf = csrf.is_some(),
            "sending signed request"
        );

        let request = self.client.request(method, url).headers(headers);
        let request = match body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(form) => request.multipart(form),
        };
        Ok(request.send().await?)
    }

    /// Content type and CSRF header only.
    pub async fn send_request(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
    ) -> Result<Response> {
        self.send(SignerKind::Plain, method, url, body).await
    }

    /// Adds the stored access token and persisted locale.
    pub async fn bearer_request(
        &self,
        method: Method,
        url: &str,
        body: RequestBody,
    ) -> Result<Response> {
        self.send(SignerKind::Bearer, method, url, body).await
    }

    /// Multipart upload with `Accept: application/json` and the persisted
    /// locale.
    pub async fn file_request(&self, method: Method, url: &str, form: Form) -> Result<Response> {
        self.send(SignerKind::File, method, url, RequestBody::Multipart(form))
            .await
    }

    /// Handshake outcome after applying the configured policy. Failures are
    /// always recorded.
    async fn csrf_token(&self, target: &Url) -> Result<Option<CsrfToken>> {
        match self.csrf.fetch().await {
            Ok(token) => Ok(Some(token)),
            Err(error) => {
                self.diagnostics.record(DiagnosticEventKind::CsrfUnavailable {
                    reason: error.reason().to_string(),
                    detail: error.to_string(),
                    url: target.to_string(),
                });
                match self.policy {
                    CsrfPolicy::FailOpen => Ok(None),
                    CsrfPolicy::Abort => Err(error.into()),
                }
            }
        }
    }

    fn headers(
        &self,
        kind: SignerKind,
        csrf: Option<&CsrfToken>,
        body: &RequestBody,
    ) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        // Multipart bodies carry their own boundary-qualified content type.
        match body {
            RequestBody::Multipart(_) => {}
            RequestBody::Json(_) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
            }
            RequestBody::Empty => {
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static(kind.default_content_type()),
                );
            }
        }

        if let Some(token) = csrf {
            headers.insert(self.csrf_header.clone(), header_value(token.as_str())?);
        }

        match kind {
            SignerKind::Plain => {}
            SignerKind::Bearer => {
                if let Some(access_token) = session::get_token(&self.storage).access_token {
                    headers.insert(
                        AUTHORIZATION,
                        header_value(&format!("Bearer {}", access_token))?,
                    );
                }
                self.insert_locale(&mut headers)?;
            }
            SignerKind::File => {
                headers.insert(ACCEPT, HeaderValue::from_static(JSON));
                self.insert_locale(&mut headers)?;
            }
        }

        Ok(headers)
    }

    fn insert_locale(&self, headers: &mut HeaderMap) -> Result<()> {
        if let Some(locale) = self.storage.get_item(LOCALE_KEY) {
            headers.insert(ACCEPT_LANGUAGE, header_value(&locale)?);
        }
        Ok(())
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::Http(format!("invalid header value: {}", e)))
}

// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Storage(String),
    Http(String),
    I18n(String),
    Navigation(String),
    Csrf(CsrfError),
}

/// Reasons the CSRF handshake can fail to produce a token.
///
/// The signer turns these into a missing header plus a diagnostic unless the
/// configured policy asks it to abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    /// The handshake endpoint answered with a non-success status.
    FetchFailed { status: u16 },

    /// The handshake request never produced a response.
    Transport(String),

    /// The response was successful but no CSRF cookie was set.
    TokenMissing { cookie: String },
}

impl CsrfError {
    /// Short machine-friendly reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            CsrfError::FetchFailed { .. } => "fetch-failed",
            CsrfError::Transport(_) => "transport",
            CsrfError::TokenMissing { .. } => "token-missing",
        }
    }
}

impl fmt::Display for CsrfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsrfError::FetchFailed { status } => {
                write!(f, "CSRF fetch failed with HTTP status {}", status)
            }
            CsrfError::Transport(msg) => write!(f, "CSRF fetch failed: {}", msg),
            CsrfError::TokenMissing { cookie } => {
                write!(f, "CSRF token missing: no '{}' cookie after handshake", cookie)
            }
        }
    }
}

impl std::error::Error for CsrfError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::I18n(e) => write!(f, "I18n Error: {}", e),
            Error::Navigation(e) => write!(f, "Navigation Error: {}", e),
            Error::Csrf(e) => write!(f, "CSRF Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CsrfError> for Error {
    fn from(err: CsrfError) -> Self {
        Error::Csrf(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

impl From<ciborium::de::Error<std::io::Error>> for Error {
    fn from(err: ciborium::de::Error<std::io::Error>) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<ciborium::ser::Error<std::io::Error>> for Error {
    fn from(err: ciborium::ser::Error<std::io::Error>) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

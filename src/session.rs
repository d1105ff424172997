// SPDX-License-Identifier: MPL-2.0
//! Session credentials kept in client storage.
//!
//! Tokens are opaque strings: written after authentication, read on every
//! bearer request, overwritten on refresh and cleared on logout.

use crate::app::storage::{ClientStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::error::Result;

/// The stored access/refresh token pair. Either half may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Stores both tokens, replacing any previous pair.
pub fn set_token(storage: &ClientStorage, access_token: &str, refresh_token: &str) -> Result<()> {
    storage.set_item(ACCESS_TOKEN_KEY, access_token)?;
    storage.set_item(REFRESH_TOKEN_KEY, refresh_token)?;
    Ok(())
}

pub fn get_token(storage: &ClientStorage) -> SessionTokens {
    SessionTokens {
        access_token: storage.get_item(ACCESS_TOKEN_KEY),
        refresh_token: storage.get_item(REFRESH_TOKEN_KEY),
    }
}

pub fn clear_token(storage: &ClientStorage) -> Result<()> {
    storage.remove_item(ACCESS_TOKEN_KEY)?;
    storage.remove_item(REFRESH_TOKEN_KEY)?;
    Ok(())
}

// SPDX-License-Identifier: MPL-2.0
//! `portal_front` is the client core of a localized web portal.
//!
//! It resolves the locale from the URL and guards navigation with it, signs
//! outgoing API requests (CSRF, bearer token, `Accept-Language`), formats
//! relative timestamps with Fluent catalogs and keeps session tokens in a
//! small persistent client storage.

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod http;
pub mod i18n;
pub mod router;
pub mod session;

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Locale**: Default and fallback UI locale
//! - **Router**: Base path the portal is mounted under
//! - **API**: Server origin and CSRF handshake wiring
//! - **Diagnostics**: Ring buffer bounds

use crate::i18n::Locale;

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when nothing else (CLI, config, OS) picks one.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// Locale consulted when a key is missing from the active catalog.
pub const DEFAULT_FALLBACK_LOCALE: Locale = Locale::En;

// ==========================================================================
// Router Defaults
// ==========================================================================

/// Path prefix the portal is served under.
pub const DEFAULT_BASE_PATH: &str = "/";

// ==========================================================================
// API Defaults
// ==========================================================================

/// Origin that relative request URLs are joined onto.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Endpoint that sets the CSRF cookie.
pub const DEFAULT_CSRF_PATH: &str = "/api/csrf/";

/// Cookie the CSRF handshake sets.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Request header carrying the CSRF token.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("PortalFront/", env!("CARGO_PKG_VERSION"));

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_CAPACITY: usize = 256;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_CAPACITY: usize = 16;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_CAPACITY: usize = 10_000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DIAGNOSTICS_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY >= MIN_DIAGNOSTICS_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_CAPACITY <= MAX_DIAGNOSTICS_CAPACITY);
};

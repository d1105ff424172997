// SPDX-License-Identifier: MPL-2.0
//! This module handles the portal's configuration, loaded from and saved to
//! a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Default and fallback locale
//! - `[router]` - Base path the portal is served under
//! - `[api]` - Server origin, CSRF handshake wiring and failure policy
//! - `[diagnostics]` - Diagnostics buffer size
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `PORTAL_FRONT_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use portal_front::config::{self, CsrfPolicy};
//!
//! let (mut config, _warning) = config::load_with_override(None);
//! config.api.csrf_policy = CsrfPolicy::Abort;
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::diagnostics::BufferCapacity;
use crate::error::Result;
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

const CONFIG_FILE: &str = "settings.toml";

/// What the request signer does when the CSRF handshake fails.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CsrfPolicy {
    /// Log the failure and send the request without the CSRF header; the
    /// server decides.
    #[default]
    FailOpen,
    /// Return the handshake error to the caller without sending the request.
    Abort,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Locale settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// Locale to redirect to when the URL carries none. When unset, the
    /// CLI flag, then the OS locale, then English are tried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<Locale>,

    /// Locale consulted for keys missing from the active catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_locale: Option<Locale>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

/// Server and CSRF handshake settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Origin that relative request URLs are joined onto.
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    #[serde(default = "default_csrf_path")]
    pub csrf_path: String,

    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,

    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    #[serde(default)]
    pub csrf_policy: CsrfPolicy,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            csrf_path: default_csrf_path(),
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            csrf_policy: CsrfPolicy::default(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DiagnosticsConfig {
    /// Number of events kept in memory (clamped to the allowed range).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl DiagnosticsConfig {
    pub fn buffer_capacity(&self) -> BufferCapacity {
        self.capacity.map(BufferCapacity::new).unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// Picks the locale the navigation guard redirects to.
    ///
    /// Priority: `cli_lang`, then `[general] default_locale`, then the OS
    /// locale, then [`DEFAULT_LOCALE`]. Unsupported values are skipped.
    pub fn resolve_default_locale(&self, cli_lang: Option<&str>) -> Locale {
        resolve_locale(cli_lang, self.general.default_locale, sys_locale::get_locale())
    }

    pub fn fallback_locale(&self) -> Locale {
        self.general
            .fallback_locale
            .unwrap_or(DEFAULT_FALLBACK_LOCALE)
    }
}

fn resolve_locale(
    cli_lang: Option<&str>,
    configured: Option<Locale>,
    os_locale: Option<String>,
) -> Locale {
    if let Some(locale) = cli_lang.and_then(parse_locale_tag) {
        return locale;
    }
    if let Some(locale) = configured {
        return locale;
    }
    if let Some(locale) = os_locale.as_deref().and_then(parse_locale_tag) {
        return locale;
    }
    DEFAULT_LOCALE
}

/// Accepts bare codes (`ru`) and full tags (`ru-RU`, `en_US`).
fn parse_locale_tag(tag: &str) -> Option<Locale> {
    if let Ok(locale) = tag.parse::<Locale>() {
        return Some(locale);
    }
    let langid: LanguageIdentifier = tag.replace('_', "-").parse().ok()?;
    Locale::from_langid(&langid)
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_csrf_path() -> String {
    DEFAULT_CSRF_PATH.to_string()
}

fn default_csrf_cookie() -> String {
    DEFAULT_CSRF_COOKIE.to_string()
}

fn default_csrf_header() -> String {
    DEFAULT_CSRF_HEADER.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads `settings.toml` from `base_dir`, or from the resolved config
/// directory when `None`.
///
/// A missing file yields defaults silently. An unreadable or invalid file
/// yields defaults plus the `notification-config-load-error` warning key.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir).filter(|path| path.exists()) else {
        return (Config::default(), None);
    };
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "settings not loaded, using defaults");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    Ok(toml::from_str(&fs::read_to_string(path)?)?)
}

/// Writes `settings.toml` into `base_dir`, or into the resolved config
/// directory when `None`. Does nothing if no directory can be resolved.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    match get_config_path_with_override(base_dir) {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

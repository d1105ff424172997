// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the portal.
//!
//! This module provides localization capabilities using the Fluent localization system.
//!
//! # Features
//!
//! - Closed set of supported locales ([`Locale`])
//! - Embedded `.ftl` catalogs with fallback to a secondary locale
//! - Counted lookups whose `[one]`/`[few]`/`[many]`/`[other]` variant is
//!   picked by Fluent's CLDR plural rules
//! - URL-driven locale resolution and the navigation guard that applies it
//! - Relative "time ago" phrases

pub mod fluent;
pub mod locale;
pub mod resolver;
pub mod time_ago;

pub use fluent::I18n;
pub use locale::Locale;
pub use resolver::{GuardOutcome, LocaleGuard, LocaleResolution, LocaleResolver};

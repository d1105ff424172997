// SPDX-License-Identifier: MPL-2.0
//! The closed set of locales the portal ships translations for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A supported UI locale.
///
/// Only locales with an embedded catalog are representable, so an active
/// locale can never fall outside the supported set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Every supported locale, in catalog order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ru];

    /// Short code used in URLs, storage and the `Accept-Language` header.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Matches a URL path segment against the supported codes.
    ///
    /// Only the exact code is accepted: `EN` and `en-US` are unsupported.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| segment == locale.code())
    }

    /// Maps a full language identifier (e.g. an OS locale such as `ru-RU`)
    /// onto a supported locale by its language subtag.
    pub fn from_langid(langid: &LanguageIdentifier) -> Option<Self> {
        Self::from_segment(langid.language.as_str())
    }

    /// Language identifier for Fluent bundles and plural rules.
    pub fn langid(self) -> LanguageIdentifier {
        self.code().parse().unwrap_or_default()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string does not name a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLocale(pub String);

impl fmt::Display for UnsupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale: {}", self.0)
    }
}

impl std::error::Error for UnsupportedLocale {}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|locale| code.eq_ignore_ascii_case(locale.code()))
            .ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

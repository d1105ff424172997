// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events describe failures the portal recovers from on its own (a missing
//! CSRF token, a corrected locale, a storage write that did not land) so
//! they stay inspectable after the fact instead of only scrolling past in
//! the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// The CSRF handshake failed; the request went out without the header
    /// (or was aborted, depending on policy).
    CsrfUnavailable {
        /// Short reason code (`fetch-failed`, `transport`, `token-missing`).
        reason: String,
        /// Human-readable failure description.
        detail: String,
        /// The request the token was meant for.
        url: String,
    },

    /// The navigation guard redirected to a locale-prefixed path.
    LocaleRedirect { from: String, to: String },

    /// A client storage write failed; the in-memory value was still updated.
    StorageWriteFailed { key: String, error: String },

    /// A settings or storage file could not be loaded; defaults were used.
    LoadWarning { warning: String },
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            at: Utc::now(),
            kind,
        }
    }

    pub fn is_csrf_failure(&self) -> bool {
        matches!(self.kind, DiagnosticEventKind::CsrfUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::LocaleRedirect {
            from: "/faq".into(),
            to: "/en/faq".into(),
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "locale_redirect");
        assert_eq!(json["to"], "/en/faq");
        assert!(json["at"].is_string());
    }

    #[test]
    fn csrf_failure_predicate() {
        let event = DiagnosticEvent::new(DiagnosticEventKind::CsrfUnavailable {
            reason: "fetch-failed".into(),
            detail: "status 500".into(),
            url: "/api/x".into(),
        });
        assert!(event.is_csrf_failure());
        let other = DiagnosticEvent::new(DiagnosticEventKind::LoadWarning {
            warning: "w".into(),
        });
        assert!(!other.is_csrf_failure());
    }
}

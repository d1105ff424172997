// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for recoverable failures.
//!
//! Every recorded event is emitted through `tracing` and kept in a bounded
//! ring buffer, so callers (and tests) can check what the portal silently
//! recovered from.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event with a [`DiagnosticEventKind`]
//! - [`Diagnostics`]: Cloneable shared handle used by the guard and the signer

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{DiagnosticEvent, DiagnosticEventKind};

use std::sync::{Arc, Mutex, PoisonError};

/// Shared diagnostics log.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    buffer: Arc<Mutex<CircularBuffer<DiagnosticEvent>>>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl Diagnostics {
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(CircularBuffer::new(capacity))),
        }
    }

    /// Logs the event and appends it to the buffer.
    pub fn record(&self, kind: DiagnosticEventKind) {
        emit(&kind);
        let event = DiagnosticEvent::new(kind);
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Snapshot of the buffered events, oldest first.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// The `count` most recent events, newest first.
    pub fn recent(&self, count: usize) -> Vec<DiagnosticEvent> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recent(count)
            .cloned()
            .collect()
    }

    /// Events dropped because the buffer was full.
    pub fn evicted(&self) -> u64 {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .evicted()
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

fn emit(kind: &DiagnosticEventKind) {
    match kind {
        DiagnosticEventKind::CsrfUnavailable {
            reason,
            detail,
            url,
        } => {
            tracing::warn!(%reason, %url, error = %detail, "CSRF token unavailable");
        }
        DiagnosticEventKind::LocaleRedirect { from, to } => {
            tracing::debug!(%from, %to, "locale redirect");
        }
        DiagnosticEventKind::StorageWriteFailed { key, error } => {
            tracing::warn!(%key, %error, "client storage write failed");
        }
        DiagnosticEventKind::LoadWarning { warning } => {
            tracing::warn!(%warning, "falling back to defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn csrf_event() -> DiagnosticEventKind {
        DiagnosticEventKind::CsrfUnavailable {
            reason: "fetch-failed".into(),
            detail: "CSRF fetch failed with HTTP status 500".into(),
            url: "http://localhost/api/profile/".into(),
        }
    }

    #[test]
    fn record_appends_in_order() {
        let diagnostics = Diagnostics::default();
        diagnostics.record(csrf_event());
        diagnostics.record(DiagnosticEventKind::LoadWarning {
            warning: "notification-config-load-error".into(),
        });

        let events = diagnostics.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_csrf_failure());
        assert!(!events[1].is_csrf_failure());
    }

    #[test]
    fn clones_share_the_buffer() {
        let diagnostics = Diagnostics::default();
        diagnostics.clone().record(csrf_event());
        assert_eq!(diagnostics.len(), 1);
        diagnostics.clear();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn overflow_keeps_newest_and_counts_dropped() {
        let diagnostics = Diagnostics::new(BufferCapacity::new(0));
        let capacity = BufferCapacity::new(0).value();
        for i in 0..capacity + 3 {
            diagnostics.record(DiagnosticEventKind::LoadWarning {
                warning: format!("warning-{i}"),
            });
        }

        assert_eq!(diagnostics.len(), capacity);
        assert_eq!(diagnostics.evicted(), 3);
        let newest = diagnostics.recent(1);
        assert_eq!(
            newest[0].kind,
            DiagnosticEventKind::LoadWarning {
                warning: format!("warning-{}", capacity + 2)
            }
        );
    }

    #[traced_test]
    #[test]
    fn csrf_failure_is_logged_as_warning() {
        Diagnostics::default().record(csrf_event());
        assert!(logs_contain("CSRF token unavailable"));
        assert!(logs_contain("fetch-failed"));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Locale resolution from the leading URL path segment.
//!
//! [`LocaleResolver`] is the pure decision: accept the segment or redirect
//! to a default-prefixed path. [`LocaleGuard`] runs it before every route
//! resolution and applies the side effects: switching the translation
//! context, persisting the locale under [`LOCALE_KEY`] and recording
//! redirects.

use super::fluent::I18n;
use super::locale::Locale;
use crate::app::storage::{ClientStorage, LOCALE_KEY};
use crate::diagnostics::{DiagnosticEventKind, Diagnostics};
use crate::router::Location;

/// Outcome of inspecting a location's leading segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleResolution {
    /// The segment names a supported locale. `rest` is the remaining path,
    /// always starting with `/`.
    Accept { locale: Locale, rest: String },

    /// The segment is missing or unsupported; navigate here instead.
    Redirect { locale: Locale, location: Location },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleResolver {
    default_locale: Locale,
}

impl LocaleResolver {
    pub fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Inspects an app-relative location (mount prefix already removed).
    ///
    /// An unsupported first segment cannot be told apart from a page name,
    /// so the whole path is kept behind the default-locale prefix.
    pub fn resolve(&self, location: &Location) -> LocaleResolution {
        let path = location.path();
        let trimmed = path.trim_start_matches('/');
        let (segment, rest) = match trimmed.split_once('/') {
            Some((segment, rest)) => (segment, format!("/{}", rest)),
            None => (trimmed, "/".to_string()),
        };

        match Locale::from_segment(segment) {
            Some(locale) => LocaleResolution::Accept { locale, rest },
            None => {
                let prefixed = if path == "/" {
                    format!("/{}", self.default_locale.code())
                } else {
                    format!("/{}{}", self.default_locale.code(), path)
                };
                LocaleResolution::Redirect {
                    locale: self.default_locale,
                    location: location.with_path(&prefixed),
                }
            }
        }
    }
}

/// Result of running the guard for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Continue to route resolution with `rest` as the locale-less path.
    Proceed { locale: Locale, rest: String },
    /// Abandon this navigation and start a new one at `location`.
    Redirect(Location),
}

/// Navigation guard applying locale resolution before each route.
#[derive(Debug, Clone)]
pub struct LocaleGuard {
    resolver: LocaleResolver,
    storage: ClientStorage,
    diagnostics: Diagnostics,
}

impl LocaleGuard {
    pub fn new(resolver: LocaleResolver, storage: ClientStorage, diagnostics: Diagnostics) -> Self {
        Self {
            resolver,
            storage,
            diagnostics,
        }
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// Runs before the destination view is resolved. Never fails: storage
    /// problems are recorded and navigation continues.
    pub fn before_enter(&self, i18n: &mut I18n, location: &Location) -> GuardOutcome {
        match self.resolver.resolve(location) {
            LocaleResolution::Accept { locale, rest } => {
                self.activate(i18n, locale);
                GuardOutcome::Proceed { locale, rest }
            }
            LocaleResolution::Redirect {
                locale,
                location: target,
            } => {
                self.diagnostics.record(DiagnosticEventKind::LocaleRedirect {
                    from: location.to_string(),
                    to: target.to_string(),
                });
                self.activate(i18n, locale);
                GuardOutcome::Redirect(target)
            }
        }
    }

    fn activate(&self, i18n: &mut I18n, locale: Locale) {
        i18n.set_locale(locale);
        if self.storage.get_item(LOCALE_KEY).as_deref() == Some(locale.code()) {
            return;
        }
        if let Err(error) = self.storage.set_item(LOCALE_KEY, locale.code()) {
            self.diagnostics
                .record(DiagnosticEventKind::StorageWriteFailed {
                    key: LOCALE_KEY.to_string(),
                    error: error.to_string(),
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(default_locale: Locale) -> (LocaleGuard, ClientStorage, Diagnostics) {
        let storage = ClientStorage::in_memory();
        let diagnostics = Diagnostics::default();
        let guard = LocaleGuard::new(
            LocaleResolver::new(default_locale),
            storage.clone(),
            diagnostics.clone(),
        );
        (guard, storage, diagnostics)
    }

    fn i18n() -> I18n {
        I18n::new(Locale::En, Locale::En).unwrap()
    }

    #[test]
    fn supported_segment_is_accepted_with_rest() {
        let resolver = LocaleResolver::new(Locale::En);
        assert_eq!(
            resolver.resolve(&Location::parse("/ru/articles")),
            LocaleResolution::Accept {
                locale: Locale::Ru,
                rest: "/articles".into()
            }
        );
        assert_eq!(
            resolver.resolve(&Location::parse("/en")),
            LocaleResolution::Accept {
                locale: Locale::En,
                rest: "/".into()
            }
        );
        assert_eq!(
            resolver.resolve(&Location::parse("/en/")),
            LocaleResolution::Accept {
                locale: Locale::En,
                rest: "/".into()
            }
        );
    }

    #[test]
    fn missing_segment_redirects_with_default_prefix() {
        let resolver = LocaleResolver::new(Locale::Ru);
        let cases = [
            ("/", "/ru"),
            ("/login", "/ru/login"),
            ("/faq?x=1#q", "/ru/faq?x=1#q"),
        ];
        for (input, expected) in cases {
            match resolver.resolve(&Location::parse(input)) {
                LocaleResolution::Redirect { locale, location } => {
                    assert_eq!(locale, Locale::Ru);
                    assert_eq!(location.to_string(), expected, "input {input}");
                }
                other => panic!("expected redirect for {input}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unsupported_segment_keeps_whole_path_behind_prefix() {
        let resolver = LocaleResolver::new(Locale::En);
        match resolver.resolve(&Location::parse("/fr/login")) {
            LocaleResolution::Redirect { location, .. } => {
                assert_eq!(location.path(), "/en/fr/login")
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn case_variant_segment_redirects() {
        let (guard, storage, _) = guard(Locale::En);
        let mut i18n = i18n();

        let outcome = guard.before_enter(&mut i18n, &Location::parse("/EN/faq"));

        assert_eq!(
            outcome,
            GuardOutcome::Redirect(Location::parse("/en/EN/faq"))
        );
        assert_eq!(storage.get_item(LOCALE_KEY), Some("en".to_string()));
    }

    #[test]
    fn guard_persists_accepted_locale() {
        let (guard, storage, diagnostics) = guard(Locale::En);
        let mut i18n = i18n();

        let outcome = guard.before_enter(&mut i18n, &Location::parse("/ru/quiz"));

        assert_eq!(
            outcome,
            GuardOutcome::Proceed {
                locale: Locale::Ru,
                rest: "/quiz".into()
            }
        );
        assert_eq!(storage.get_item(LOCALE_KEY), Some("ru".to_string()));
        assert_eq!(i18n.current_locale(), Locale::Ru);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn guard_redirect_persists_default_and_records_it() {
        let (guard, storage, diagnostics) = guard(Locale::En);
        storage.set_item(LOCALE_KEY, "ru").unwrap();
        let mut i18n = i18n();
        i18n.set_locale(Locale::Ru);

        let outcome = guard.before_enter(&mut i18n, &Location::parse("/de/partner"));

        assert_eq!(
            outcome,
            GuardOutcome::Redirect(Location::parse("/en/de/partner"))
        );
        assert_eq!(storage.get_item(LOCALE_KEY), Some("en".to_string()));
        assert_eq!(i18n.current_locale(), Locale::En);
        let events = diagnostics.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            DiagnosticEventKind::LocaleRedirect {
                from: "/de/partner".into(),
                to: "/en/de/partner".into()
            }
        );
    }

    #[test]
    fn guard_storage_failure_does_not_block_navigation() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory where the storage file should be makes every write fail.
        let blocked = temp_dir.path().join("storage.cbor");
        std::fs::create_dir_all(&blocked).unwrap();
        let (storage, _) = ClientStorage::open_at(blocked);
        let diagnostics = Diagnostics::default();
        let guard = LocaleGuard::new(
            LocaleResolver::new(Locale::En),
            storage.clone(),
            diagnostics.clone(),
        );
        let mut i18n = i18n();

        let outcome = guard.before_enter(&mut i18n, &Location::parse("/ru"));

        assert!(matches!(outcome, GuardOutcome::Proceed { locale: Locale::Ru, .. }));
        assert_eq!(storage.get_item(LOCALE_KEY), Some("ru".to_string()));
        assert!(matches!(
            diagnostics.events()[0].kind,
            DiagnosticEventKind::StorageWriteFailed { .. }
        ));
    }
}

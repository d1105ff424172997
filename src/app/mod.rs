// SPDX-License-Identifier: MPL-2.0
//! Application root: wires configuration, client storage, localization,
//! routing and the request signer together.
//!
//! `App` is what a launcher builds once at startup. Every component that
//! needs shared state (storage, diagnostics) receives a clone of the same
//! handle, so a locale persisted by the navigation guard is what the signer
//! sends as `Accept-Language` on the next bearer request.

pub mod paths;
pub mod storage;

use crate::config::{self, Config};
use crate::diagnostics::{DiagnosticEventKind, Diagnostics};
use crate::error::Result;
use crate::http::RequestSigner;
use crate::i18n::{time_ago, I18n, Locale, LocaleGuard, LocaleResolver};
use crate::router::{ResolvedRoute, Router};
use std::fmt;
use std::path::PathBuf;
use storage::{ClientStorage, LOCALE_KEY};

/// Launch options, usually parsed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional default-locale override (e.g. `ru`, `en-US`).
    pub lang: Option<String>,
    /// Optional data directory override (for the storage file).
    /// Takes precedence over `PORTAL_FRONT_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `PORTAL_FRONT_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}

pub struct App {
    pub i18n: I18n,
    config: Config,
    storage: ClientStorage,
    diagnostics: Diagnostics,
    router: Router,
    signer: RequestSigner,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", &self.i18n.current_locale())
            .field("base_path", &self.router.base_path())
            .field("api", &self.signer.base_url().as_str())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl App {
    /// Loads settings and storage from their directories, falling back to
    /// defaults (and recording a warning) when either cannot be read.
    ///
    /// Directory flags take precedence over [`paths::init_cli_overrides`]
    /// and the environment.
    pub fn new(flags: Flags) -> Result<Self> {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.as_ref().map(PathBuf::from));
        let (storage, storage_warning) =
            ClientStorage::open(flags.data_dir.as_ref().map(PathBuf::from));

        Self::from_parts(
            config,
            flags.lang.as_deref(),
            storage,
            config_warning.into_iter().chain(storage_warning),
        )
    }

    /// Builds the app from already-loaded parts.
    pub fn from_parts(
        config: Config,
        cli_lang: Option<&str>,
        storage: ClientStorage,
        warnings: impl IntoIterator<Item = String>,
    ) -> Result<Self> {
        let diagnostics = Diagnostics::new(config.diagnostics.buffer_capacity());
        for warning in warnings {
            diagnostics.record(DiagnosticEventKind::LoadWarning { warning });
        }

        let default_locale = config.resolve_default_locale(cli_lang);
        // The last persisted locale is active until the first navigation.
        let initial_locale = storage
            .get_item(LOCALE_KEY)
            .and_then(|code| Locale::from_segment(&code))
            .unwrap_or(default_locale);
        let i18n = I18n::new(initial_locale, config.fallback_locale())?;

        let guard = LocaleGuard::new(
            LocaleResolver::new(default_locale),
            storage.clone(),
            diagnostics.clone(),
        );
        let router = Router::new(config.router.base_path.clone(), guard);
        let signer = RequestSigner::new(&config.api, storage.clone(), diagnostics.clone())?;

        tracing::info!(
            %default_locale,
            %initial_locale,
            base_path = %config.router.base_path,
            api = %config.api.base_url,
            "portal client initialized"
        );

        Ok(Self {
            i18n,
            config,
            storage,
            diagnostics,
            router,
            signer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> &ClientStorage {
        &self.storage
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Resolves `url` through the locale guard and the route table,
    /// following guard redirects.
    pub fn navigate(&mut self, url: &str) -> Result<ResolvedRoute> {
        self.router.resolve(&mut self.i18n, url)
    }

    /// Relative-time phrase for a past millisecond timestamp in the active
    /// locale.
    pub fn time_since(&self, timestamp_ms: i64) -> String {
        time_ago::time_since(&self.i18n, timestamp_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::View;
    use tempfile::tempdir;

    fn app(config: Config) -> App {
        App::from_parts(config, None, ClientStorage::in_memory(), Vec::new()).unwrap()
    }

    #[test]
    fn cli_lang_sets_default_locale() {
        let app = App::from_parts(
            Config::default(),
            Some("ru"),
            ClientStorage::in_memory(),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(app.router().guard().resolver().default_locale(), Locale::Ru);
        assert_eq!(app.i18n.current_locale(), Locale::Ru);
    }

    #[test]
    fn persisted_locale_is_active_before_first_navigation() {
        let storage = ClientStorage::in_memory();
        storage.set_item(LOCALE_KEY, "ru").unwrap();
        let app =
            App::from_parts(Config::default(), Some("en"), storage, Vec::new()).unwrap();
        assert_eq!(app.i18n.current_locale(), Locale::Ru);
    }

    #[test]
    fn navigation_updates_shared_storage() {
        let mut app = app(Config::default());
        let route = app.navigate("/ru/personal").unwrap();

        assert_eq!(route.view, View::Personal);
        assert_eq!(app.storage().get_item(LOCALE_KEY), Some("ru".to_string()));
        assert_eq!(app.i18n.tr("view-personal"), "Личный кабинет");
    }

    #[test]
    fn load_warnings_become_diagnostics() {
        let app = App::from_parts(
            Config::default(),
            None,
            ClientStorage::in_memory(),
            vec!["notification-config-load-error".to_string()],
        )
        .unwrap();
        let events = app.diagnostics().events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            DiagnosticEventKind::LoadWarning {
                warning: "notification-config-load-error".into()
            }
        );
    }

    #[test]
    fn new_reads_from_override_directories() {
        let config_dir = tempdir().unwrap();
        let data_dir = tempdir().unwrap();
        let config = Config {
            router: config::RouterConfig {
                base_path: "/portal/".to_string(),
            },
            ..Config::default()
        };
        config::save_with_override(&config, Some(config_dir.path().to_path_buf())).unwrap();

        let app = App::new(Flags {
            lang: None,
            data_dir: Some(data_dir.path().to_string_lossy().into_owned()),
            config_dir: Some(config_dir.path().to_string_lossy().into_owned()),
        })
        .unwrap();

        assert_eq!(app.router().base_path(), "/portal/");
        assert_eq!(
            app.storage().path(),
            Some(data_dir.path().join(storage::STORAGE_FILE))
        );
        assert!(app.diagnostics().is_empty());
    }

    #[test]
    fn configured_csrf_policy_reaches_signer() {
        let mut config = Config::default();
        config.api.csrf_policy = config::CsrfPolicy::Abort;
        assert_eq!(app(config).signer().csrf_policy(), config::CsrfPolicy::Abort);
    }

    #[test]
    fn invalid_api_url_fails_startup() {
        let mut config = Config::default();
        config.api.base_url = "::not a url::".to_string();
        let result = App::from_parts(config, None, ClientStorage::in_memory(), Vec::new());
        assert!(result.is_err());
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Resolution of the directories holding `settings.toml` and the client
//! storage file.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`PORTAL_FRONT_DATA_DIR`, `PORTAL_FRONT_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "PortalFront";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "PORTAL_FRONT_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PORTAL_FRONT_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` CLI values.
///
/// Only the first call takes effect; later calls are ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let _ = CLI_DATA_DIR.set(data_dir.map(PathBuf::from));
    let _ = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from));
}

#[derive(Debug, Clone, Copy)]
enum AppDir {
    Data,
    Config,
}

impl AppDir {
    fn cli(self) -> Option<PathBuf> {
        let cell = match self {
            AppDir::Data => &CLI_DATA_DIR,
            AppDir::Config => &CLI_CONFIG_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn env(self) -> Option<PathBuf> {
        let name = match self {
            AppDir::Data => ENV_DATA_DIR,
            AppDir::Config => ENV_CONFIG_DIR,
        };
        std::env::var_os(name)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }

    fn platform(self) -> Option<PathBuf> {
        let base = match self {
            AppDir::Data => dirs::data_dir(),
            AppDir::Config => dirs::config_dir(),
        };
        base.map(|dir| dir.join(APP_NAME))
    }

    fn resolve(self, override_path: Option<PathBuf>) -> Option<PathBuf> {
        override_path
            .or_else(|| self.cli())
            .or_else(|| self.env())
            .or_else(|| self.platform())
    }
}

/// Returns the directory holding client storage (tokens, persisted locale).
///
/// Returns `None` if the data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Data.resolve(override_path)
}

/// Returns the directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    AppDir::Config.resolve(override_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests touching them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn platform_dirs_are_distinct() {
        if let (Some(data), Some(config)) = (AppDir::Data.platform(), AppDir::Config.platform()) {
            assert!(data.ends_with(APP_NAME));
            assert!(config.ends_with(APP_NAME));
        }
    }

    #[test]
    fn app_data_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = get_app_data_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn app_config_dir_contains_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }

    #[test]
    fn override_path_takes_precedence_for_data_dir() {
        let override_path = PathBuf::from("/custom/data/path");
        let result = get_app_data_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));
    }

    #[test]
    fn override_path_takes_precedence_for_config_dir() {
        let override_path = PathBuf::from("/custom/config/path");
        let result = get_app_config_dir_with_override(Some(override_path.clone()));
        assert_eq!(result, Some(override_path));
    }

    #[test]
    fn env_var_overrides_default_data_dir() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/test/data/dir");

        assert_eq!(get_app_data_dir(), Some(PathBuf::from("/test/data/dir")));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn empty_env_var_uses_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "");

        if let Some(path) = get_app_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }

        std::env::remove_var(ENV_CONFIG_DIR);
    }
}

//! Configuration management (native mode).

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::app::AppSettings;

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    login: LoginConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_server_url")]
    url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Path to log file (if set, logs will be written to file in addition to stdout)
    log_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoginConfig {
    #[serde(default)]
    clear_password_on_failure: bool,
}

fn default_server_url() -> String {
    vyzio_types::DEFAULT_SERVER_URL.to_string()
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the authentication service
    pub server_url: String,
    /// Path to log file
    pub log_file: Option<PathBuf>,
    /// Log level (if set, used when RUST_LOG is not)
    pub log_level: Option<String>,
    /// Clear the password field after a rejected login
    pub clear_password_on_failure: bool,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `config.toml` in user config directory (~/.config/vyzio/ on Linux)
    /// 2. `.vyzio.toml` in current directory
    ///
    /// Environment variables use the `VYZIO_` prefix with `__` separating the
    /// section from the key, e.g. `VYZIO_SERVER__URL`.
    pub fn from_figment(
        server_url: Option<String>,
        log_level: Option<String>,
        log_file: Option<PathBuf>,
        clear_password_on_failure: Option<bool>,
    ) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(".vyzio.toml"));
        let user_config = directories::ProjectDirs::from("", "", "vyzio")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // Build figment with priority: defaults < user config < local config < env vars < CLI args
        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile::default()));

        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("VYZIO_").split("__"));

        if let Some(url) = server_url {
            figment = figment.merge(Serialized::default("server.url", url));
        }
        if let Some(level) = log_level {
            figment = figment.merge(Serialized::default("logging.log_level", level));
        }
        if let Some(path) = log_file {
            figment = figment.merge(Serialized::default("logging.log_file", path));
        }
        if let Some(clear) = clear_password_on_failure {
            figment = figment.merge(Serialized::default("login.clear_password_on_failure", clear));
        }

        let config_file: ConfigFile = figment.extract()?;

        Ok(Self {
            server_url: config_file.server.url,
            log_file: config_file.logging.log_file,
            log_level: config_file.logging.log_level,
            clear_password_on_failure: config_file.login.clear_password_on_failure,
        })
    }

    /// Settings passed on to the application.
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            clear_password_on_failure: self.clear_password_on_failure,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            log_file: None,
            log_level: None,
            clear_password_on_failure: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        std::env::remove_var("VYZIO_SERVER__URL");
        std::env::remove_var("VYZIO_LOGIN__CLEAR_PASSWORD_ON_FAILURE");
        std::env::remove_var("VYZIO_LOGGING__LOG_LEVEL");
    }

    /// Run `f` with `dir` as the working directory.
    fn in_dir<T>(dir: &TempDir, f: impl FnOnce() -> T) -> T {
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        let result = f();
        // Restore before the temp dir is dropped (ignore errors)
        let _ = std::env::set_current_dir(original_dir);
        result
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = in_dir(&temp_dir, || Config::from_figment(None, None, None, None)).unwrap();

        assert_eq!(config.server_url, vyzio_types::DEFAULT_SERVER_URL);
        assert!(config.log_file.is_none());
        assert!(!config.clear_password_on_failure);
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"
[server]
url = "https://vyzio.example.com"

[logging]
log_level = "debug"

[login]
clear_password_on_failure = true
"#;
        fs::write(temp_dir.path().join(".vyzio.toml"), config_content).unwrap();

        let config = in_dir(&temp_dir, || Config::from_figment(None, None, None, None)).unwrap();

        assert_eq!(config.server_url, "https://vyzio.example.com");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.clear_password_on_failure);
    }

    #[test]
    #[serial]
    fn test_from_figment_env_vars_override_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".vyzio.toml"),
            "[server]\nurl = \"http://from-file:8000\"",
        )
        .unwrap();
        std::env::set_var("VYZIO_SERVER__URL", "http://from-env:8000");
        std::env::set_var("VYZIO_LOGIN__CLEAR_PASSWORD_ON_FAILURE", "true");

        let config = in_dir(&temp_dir, || Config::from_figment(None, None, None, None));
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.server_url, "http://from-env:8000");
        assert!(config.clear_password_on_failure);
    }

    #[test]
    #[serial]
    fn test_from_figment_cli_overrides_env_and_config() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".vyzio.toml"),
            "[server]\nurl = \"http://from-file:8000\"",
        )
        .unwrap();
        std::env::set_var("VYZIO_SERVER__URL", "http://from-env:8000");

        let config = in_dir(&temp_dir, || {
            Config::from_figment(
                Some("http://from-cli:8000".to_string()),
                Some("warn".to_string()),
                Some(PathBuf::from("vyzio.log")),
                Some(true),
            )
        });
        clear_env();
        let config = config.unwrap();

        assert_eq!(config.server_url, "http://from-cli:8000");
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.log_file, Some(PathBuf::from("vyzio.log")));
        assert_eq!(
            config.app_settings(),
            AppSettings {
                clear_password_on_failure: true
            }
        );
    }

    #[test]
    #[serial]
    fn test_from_figment_rejects_invalid_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(".vyzio.toml"),
            "[login]\nclear_password_on_failure = \"sometimes\"",
        )
        .unwrap();

        let result = in_dir(&temp_dir, || Config::from_figment(None, None, None, None));

        assert!(result.is_err());
    }
}

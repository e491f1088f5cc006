//! # Configuration Loader / 配置加载器
//!
//! `load_config` is pure data loading: whatever is in the file becomes an
//! [`AppConfig`], empty values included. Defaults are applied afterwards, in
//! one place, by [`resolve_config`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use ju_core::config::AppConfig;
use ju_core::snapshot::SNAPSHOT_KEY;
use ju_infra::DirsAppDirsAdapter;

const CONFIG_DIR_NAME: &str = "joinus";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Platform config file location, e.g. `~/.config/joinus/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the explicit config file, or the platform one. A file that does not
/// exist yields an empty config; a file that exists but is broken is an error.
pub fn load_config_or_empty(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match explicit.or_else(default_config_path) {
        Some(path) if path.exists() => load_config(&path),
        _ => Ok(AppConfig::empty()),
    }
}

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub snapshot_key: String,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
}

pub fn resolve_config(
    config: &AppConfig,
    app_dirs: &DirsAppDirsAdapter,
) -> anyhow::Result<ResolvedConfig> {
    let data_dir = if config.data_dir.as_os_str().is_empty() {
        app_dirs.app_data_root()?
    } else {
        config.data_dir.clone()
    };

    let snapshot_key = match config.snapshot_key.trim() {
        "" => SNAPSHOT_KEY.to_string(),
        key => key.to_string(),
    };

    let log_dir = (!config.log_dir.as_os_str().is_empty()).then(|| config.log_dir.clone());
    let log_filter = (!config.log_filter.trim().is_empty()).then(|| config.log_filter.clone());

    Ok(ResolvedConfig {
        data_dir,
        snapshot_key,
        log_dir,
        log_filter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_config_reads_valid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
                [storage]
                data_dir = "/srv/joinus"
                snapshot_key = "kiosk-form"

                [logging]
                dir = "/var/log/joinus"
                "#,
            )
            .unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/joinus"));
        assert_eq!(config.snapshot_key, "kiosk-form");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/joinus"));
        assert_eq!(config.log_filter, "");
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[storage\ndata_dir = ").unwrap();

        let err = load_config(temp_file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_missing_explicit_file_yields_empty_config() {
        let temp_dir = TempDir::new().unwrap();

        let config = load_config_or_empty(Some(temp_dir.path().join("absent.toml"))).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_resolve_applies_defaults_for_empty_values() {
        let temp_dir = TempDir::new().unwrap();
        let app_dirs = DirsAppDirsAdapter::with_base_data_local_dir(temp_dir.path().to_path_buf());

        let resolved = resolve_config(&AppConfig::empty(), &app_dirs).unwrap();

        assert!(resolved.data_dir.starts_with(temp_dir.path()));
        assert_eq!(resolved.snapshot_key, "join-us-form-v1");
        assert_eq!(resolved.log_dir, None);
        assert_eq!(resolved.log_filter, None);
    }

    #[test]
    fn test_resolve_keeps_configured_values() {
        let config = AppConfig {
            data_dir: PathBuf::from("/srv/joinus"),
            snapshot_key: "kiosk-form".into(),
            log_dir: PathBuf::from("/var/log/joinus"),
            log_filter: "debug".into(),
        };

        let resolved = resolve_config(&config, &DirsAppDirsAdapter::new()).unwrap();

        assert_eq!(resolved.data_dir, PathBuf::from("/srv/joinus"));
        assert_eq!(resolved.snapshot_key, "kiosk-form");
        assert_eq!(resolved.log_dir, Some(PathBuf::from("/var/log/joinus")));
        assert_eq!(resolved.log_filter.as_deref(), Some("debug"));
    }
}

//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML → DTO mapping
//!
//! ## Prohibited
//!
//! **No validation logic and no default value calculation.** Missing values
//! map to empty values; the host decides what an empty value means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the snapshot file (may be empty: use the platform default)
    pub data_dir: PathBuf,

    /// Storage key of the snapshot (may be empty: use the built-in key)
    pub snapshot_key: String,

    /// Directory for rolling log files (empty: no file logging)
    pub log_dir: PathBuf,

    /// Log filter directives, same syntax as `RUST_LOG` (may be empty)
    pub log_filter: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// ```toml
    /// [storage]
    /// data_dir = "/var/lib/joinus"
    /// snapshot_key = "join-us-form-v1"
    ///
    /// [logging]
    /// dir = "/var/log/joinus"
    /// filter = "info,ju_app=debug"
    /// ```
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            snapshot_key: str_at("storage", "snapshot_key"),
            log_dir: PathBuf::from(str_at("logging", "dir")),
            log_filter: str_at("logging", "filter"),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            snapshot_key: String::new(),
            log_dir: PathBuf::new(),
            log_filter: String::new(),
        }
    }
}

use std::path::PathBuf;

const APP_DIR_NAME: &str = "joinus";

/// Directory name under the platform data dir. `JU_PROFILE` lets several
/// independent sessions coexist on one machine.
fn resolved_app_dir_name() -> String {
    match std::env::var("JU_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Adapter rooted at `base` instead of the system data-local directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }

    /// Application data root, e.g. `~/.local/share/joinus`.
    pub fn app_data_root(&self) -> anyhow::Result<PathBuf> {
        let base = self
            .base_data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("local data directory is unavailable"))?;
        Ok(base.join(resolved_app_dir_name()))
    }
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

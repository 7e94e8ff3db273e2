use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RclonewError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the rclone remote to operate on (e.g. "gdrive")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remote: String,
    #[serde(default = "default_rclone_binary")]
    pub rclone_binary: String,
    /// Directory where comparison reports are written
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
    #[serde(default = "default_vfs_cache_mode")]
    pub vfs_cache_mode: String,
}

fn default_rclone_binary() -> String {
    "rclone".to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_vfs_cache_mode() -> String {
    "writes".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: String::new(),
            rclone_binary: default_rclone_binary(),
            results_dir: default_results_dir(),
            vfs_cache_mode: default_vfs_cache_mode(),
        }
    }
}

pub const VFS_CACHE_MODES: [&str; 4] = ["off", "minimal", "writes", "full"];

impl AppConfig {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RclonewError::Config("Could not determine home directory".to_string()))?;
        Ok(home.join(".config").join("rclonew"))
    }

    /// Explicit path if given, otherwise `~/.config/rclonew/config.yaml`
    pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())),
            None => Ok(Self::config_dir()?.join("config.yaml")),
        }
    }

    /// Load the config file and apply environment overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_file(explicit)?;

        if let Ok(remote) = std::env::var("RCLONEW_REMOTE") {
            if !remote.is_empty() {
                config.remote = remote;
            }
        }

        Ok(config)
    }

    /// Load exactly what is stored on disk, without environment overrides
    pub fn load_file(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::config_path(explicit)?;

        if !path.exists() {
            return Err(RclonewError::Config(format!(
                "Config file not found: {}. Run 'rclonew init' first.",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_yaml(&content)?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Stored config for editing; defaults when no file exists yet
    pub fn load_for_update(explicit: Option<&Path>) -> Result<Self> {
        if Self::config_path(explicit)?.exists() {
            Self::load_file(explicit)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config text. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let parsed: Option<AppConfig> = serde_yaml::from_str(content)
            .map_err(|e| RclonewError::Config(format!("Invalid config: {}", e)))?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn save(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        let path = Self::config_path(explicit)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| RclonewError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }

    /// The configured remote, or an error telling the user how to set one
    pub fn remote(&self) -> Result<&str> {
        if self.remote.is_empty() {
            return Err(RclonewError::Config(
                "No remote configured. Set one with 'rclonew config set remote <name>'".to_string(),
            ));
        }
        Ok(&self.remote)
    }

    /// Directory for comparison reports, with `~` expanded
    pub fn results_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.results_dir).as_ref())
    }

    pub fn validate(&self) -> Result<()> {
        self.remote()?;

        if self.remote.contains(':') {
            return Err(RclonewError::Config(format!(
                "Remote '{}' must be a bare remote name without ':'",
                self.remote
            )));
        }

        if self.rclone_binary.trim().is_empty() {
            return Err(RclonewError::Config("rclone_binary must not be empty".to_string()));
        }

        if !VFS_CACHE_MODES.contains(&self.vfs_cache_mode.as_str()) {
            return Err(RclonewError::Config(format!(
                "Invalid vfs_cache_mode '{}'. Supported modes: {:?}",
                self.vfs_cache_mode, VFS_CACHE_MODES
            )));
        }

        Ok(())
    }

    /// Update one field by key, as used by `config set`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "remote" => self.remote = value.to_string(),
            "rclone_binary" | "rclone-binary" => self.rclone_binary = value.to_string(),
            "results_dir" | "results-dir" => self.results_dir = value.to_string(),
            "vfs_cache_mode" | "vfs-cache-mode" => self.vfs_cache_mode = value.to_string(),
            _ => {
                return Err(RclonewError::Config(format!(
                    "Unknown config key: {}. Available keys: remote, rclone_binary, results_dir, vfs_cache_mode",
                    key
                )))
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.remote.is_empty());
        assert_eq!(config.rclone_binary, "rclone");
        assert_eq!(config.results_dir, "results");
        assert_eq!(config.vfs_cache_mode, "writes");
    }

    #[test]
    fn test_from_yaml_minimal() {
        let config = AppConfig::from_yaml("remote: gdrive\n").unwrap();
        assert_eq!(config.remote, "gdrive");
        assert_eq!(config.rclone_binary, "rclone");
        assert_eq!(config.vfs_cache_mode, "writes");
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_from_yaml_invalid() {
        let result = AppConfig::from_yaml("remote: [unclosed");
        assert!(matches!(result, Err(RclonewError::Config(_))));
    }

    #[test]
    fn test_remote_required() {
        let config = AppConfig::default();
        assert!(config.remote().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_colon_in_remote() {
        let config = AppConfig {
            remote: "gdrive:".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_cache_mode() {
        let mut config = AppConfig {
            remote: "gdrive".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.vfs_cache_mode = "sometimes".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_set_known_and_unknown_keys() {
        let mut config = AppConfig::default();
        config.set("remote", "s3").unwrap();
        config.set("results-dir", "/tmp/reports").unwrap();
        assert_eq!(config.remote, "s3");
        assert_eq!(config.results_dir, "/tmp/reports");
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = AppConfig {
            remote: "gdrive".to_string(),
            vfs_cache_mode: "full".to_string(),
            ..Default::default()
        };
        let written = config.save(Some(&path)).unwrap();
        assert_eq!(written, path);

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.vfs_cache_mode, "full");
        assert_eq!(loaded.results_dir, "results");
    }

    #[test]
    fn test_load_for_update_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_for_update(Some(&dir.path().join("new.yaml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_for_update_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "remote: [unclosed").unwrap();

        let result = AppConfig::load_for_update(Some(&path));
        assert!(matches!(result, Err(RclonewError::Config(ref m)) if m.contains("Invalid config")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        match AppConfig::load(Some(&path)) {
            Err(RclonewError::Config(msg)) => assert!(msg.contains("Config file not found")),
            other => panic!("unexpected: {:?}", other),
        }
    }
}

//! TOML-based configuration for pkgprobe.
//!
//! Supports a config file (pkgprobe.toml) with environment variable
//! expansion.
//!
//! Example configuration:
//! ```toml
//! [worker]
//! path = "${HOME}/bin/pkgprobe-worker"
//! embedded = false
//!
//! [analyze]
//! timeout_seconds = 10
//! manifest = "./package/package.json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Worker configuration.
    pub worker: WorkerSettings,

    /// Analysis configuration.
    pub analyze: AnalyzeSettings,
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the worker binary (if not using embedded).
    pub path: Option<String>,

    /// Use the embedded worker binary.
    pub embedded: bool,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            embedded: true,
        }
    }
}

/// Analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzeSettings {
    /// How long to wait for the worker's response, in seconds.
    pub timeout_seconds: u64,

    /// Manifest to analyze instead of the fixed default location
    /// (supports ${ENV_VAR} expansion).
    pub manifest: Option<String>,
}

impl Default for AnalyzeSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            manifest: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `PKGPROBE_CONFIG`
    /// 2. `./pkgprobe.toml`
    /// 3. `~/.config/pkgprobe/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("PKGPROBE_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("pkgprobe.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pkgprobe").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Get the worker binary path.
    ///
    /// Returns the configured path (env-expanded) if set, otherwise searches
    /// well-known locations and `$PATH`.
    pub fn worker_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.worker.path {
            let expanded = expand_env_vars(path).ok()?;
            return Some(PathBuf::from(expanded));
        }

        let candidates = [
            "pkgprobe-worker",
            "./pkgprobe-worker",
            "./worker/pkgprobe-worker",
        ];

        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Some(path);
            }
        }

        // Try PATH
        if let Ok(output) = std::process::Command::new("which")
            .arg("pkgprobe-worker")
            .output()
        {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Some(PathBuf::from(path));
                }
            }
        }

        None
    }

    /// Get the configured manifest override, env-expanded.
    pub fn manifest_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        match &self.analyze.manifest {
            Some(manifest) => Ok(Some(PathBuf::from(expand_env_vars(manifest)?))),
            None => Ok(None),
        }
    }
}

/// Expand `${VAR}` references in a string.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated reference; keep the remainder literally.
            break;
        };

        result.push_str(&rest[..start]);
        let name = &after[..end];
        let value =
            env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()))?;
        result.push_str(&value);
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    Ok(result)
}

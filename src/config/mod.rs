//! Configuration module for pkgprobe.

mod settings;

pub use settings::{expand_env_vars, AnalyzeSettings, Settings, SettingsError, WorkerSettings};

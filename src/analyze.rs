//! End-to-end single-shot analysis cycle.
//!
//! This module provides the high-level API for one request/response cycle:
//!
//! ```text
//! resolve manifest path → spawn worker → dispatch once → await result
//! ```
//!
//! The caller renders the returned [`Outcome`]; see `render`.
//!
//! # Example
//!
//! ```ignore
//! use pkgprobe::analyze;
//! use pkgprobe::config::Settings;
//!
//! let settings = Settings::load()?;
//! let manifest = analyze::default_manifest_path()?;
//! let outcome = analyze::run_with_settings(&settings, &manifest).await?;
//! ```

use std::path::{Path, PathBuf};

use crate::config::{Settings, SettingsError};
use crate::project::{ProjectAnalyzer, WorkerProjectAnalyzer};
use crate::worker::protocol::Outcome;
use crate::worker::{WorkerClient, WorkerError};

/// Fixed location of the request manifest, relative to the directory that
/// contains the harness executable.
const MANIFEST_SEGMENTS: [&str; 2] = ["package", "package.json"];

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur before a result is received.
///
/// Worker-reported analysis failures are not errors at this level; they come
/// back as [`Outcome::ErrorMessage`].
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("cannot resolve the request manifest path: {0}")]
    PathResolution(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Worker(#[from] WorkerError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

// ============================================================================
// Request Path Resolution
// ============================================================================

/// Compute the default request path: the directory containing the harness
/// executable joined with the fixed `package/package.json` segments.
///
/// # Errors
///
/// Returns [`HarnessError::PathResolution`] if the executable's own
/// directory cannot be determined.
pub fn default_manifest_path() -> HarnessResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| HarnessError::PathResolution(e.to_string()))?;
    let base = exe.parent().ok_or_else(|| {
        HarnessError::PathResolution(format!(
            "executable {} has no parent directory",
            exe.display()
        ))
    })?;
    Ok(resolve_manifest(base))
}

/// Join the fixed manifest segments onto `base`.
pub fn resolve_manifest(base: &Path) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in MANIFEST_SEGMENTS {
        path.push(segment);
    }
    path
}

// ============================================================================
// The Cycle
// ============================================================================

/// Drive one request/response cycle against `analyzer`.
///
/// Dispatches exactly once and waits for the single result. Worker-reported
/// error text is carried through verbatim inside the returned [`Outcome`].
pub async fn run<A: ProjectAnalyzer>(analyzer: &A, manifest: &Path) -> HarnessResult<Outcome> {
    Ok(analyzer.analyze(manifest).await?)
}

/// Spawn the worker described by `settings` and run one cycle against it.
///
/// The worker handle lives exactly as long as this call; the child process
/// is killed when the handle drops.
pub async fn run_with_settings(settings: &Settings, manifest: &Path) -> HarnessResult<Outcome> {
    let client = WorkerClient::spawn_with_settings(settings).await?;
    let analyzer = WorkerProjectAnalyzer::with_client(client);
    run(&analyzer, manifest).await
}

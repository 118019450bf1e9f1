//! Embedded worker binary support.
//!
//! This module provides functionality to extract and run an embedded copy of
//! the pre-built analyzer binary. The binary is embedded at compile time
//! using `include_bytes!`.
//!
//! # Build Requirements
//!
//! To embed the worker binary:
//! 1. Place a pre-built `pkgprobe-worker` at `worker/bin/pkgprobe-worker`
//! 2. Build with the `embedded-worker` feature: `cargo build --features embedded-worker`
//!
//! If the binary is not available at compile time, the feature will fail to
//! compile.

use std::path::PathBuf;

use super::error::{WorkerError, WorkerResult};

/// Embedded worker binary (included at compile time).
#[cfg(feature = "embedded-worker")]
static EMBEDDED_WORKER: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/pkgprobe-worker"));

/// Get the path where the embedded worker should be extracted.
#[cfg(feature = "embedded-worker")]
fn get_extraction_path() -> WorkerResult<PathBuf> {
    use std::fs;

    // Use a cache directory so we don't extract on every run
    let cache_dir = dirs::cache_dir().ok_or_else(|| {
        WorkerError::SpawnFailed(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine cache directory",
        ))
    })?;

    let probe_cache = cache_dir.join("pkgprobe");
    fs::create_dir_all(&probe_cache).map_err(WorkerError::SpawnFailed)?;

    // Include version in path for cache invalidation
    let version = env!("CARGO_PKG_VERSION");
    let worker_path = probe_cache.join(format!("pkgprobe-worker-{}", version));

    Ok(worker_path)
}

/// Extract the embedded worker binary to the cache directory.
///
/// Returns the path to the extracted binary. If it already exists with the
/// correct size, it is reused.
#[cfg(feature = "embedded-worker")]
pub fn extract_worker() -> WorkerResult<PathBuf> {
    use std::fs;
    use std::io::Write;

    let worker_path = get_extraction_path()?;

    if worker_path.exists() {
        if let Ok(metadata) = fs::metadata(&worker_path) {
            if metadata.len() as usize == EMBEDDED_WORKER.len() {
                return Ok(worker_path);
            }
        }
    }

    let mut file = fs::File::create(&worker_path).map_err(WorkerError::SpawnFailed)?;
    file.write_all(EMBEDDED_WORKER)
        .map_err(WorkerError::SpawnFailed)?;

    // Set executable permissions (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = file
            .metadata()
            .map_err(WorkerError::SpawnFailed)?
            .permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&worker_path, permissions).map_err(WorkerError::SpawnFailed)?;
    }

    Ok(worker_path)
}

/// Extract the embedded worker binary (stub for when the feature is disabled).
#[cfg(not(feature = "embedded-worker"))]
pub fn extract_worker() -> WorkerResult<PathBuf> {
    Err(WorkerError::BinaryNotFound(
        "embedded worker not available; build with --features embedded-worker or set worker.path"
            .to_string(),
    ))
}

/// Check if the embedded worker is available.
#[cfg(feature = "embedded-worker")]
pub fn is_embedded_available() -> bool {
    true
}

/// Check if the embedded worker is available (stub for when the feature is disabled).
#[cfg(not(feature = "embedded-worker"))]
pub fn is_embedded_available() -> bool {
    false
}

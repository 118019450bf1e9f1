//! ProjectAnalyzer trait definition.

use std::path::Path;

use async_trait::async_trait;

use crate::worker::protocol::Outcome;
use crate::worker::WorkerError;

/// Result type for analysis operations.
pub type AnalyzeResult<T> = Result<T, WorkerError>;

/// Contract of the analyzer worker as seen by the harness.
///
/// Exactly one call yields exactly one [`Outcome`]: either the analyzed
/// project description or the worker's error text. The analyzer opens and
/// interprets the manifest itself; the caller only supplies the path.
#[async_trait]
pub trait ProjectAnalyzer: Send + Sync {
    /// Ask the analyzer to read and interpret the manifest at `manifest`.
    async fn analyze(&self, manifest: &Path) -> AnalyzeResult<Outcome>;
}

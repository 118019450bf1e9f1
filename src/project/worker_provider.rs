//! Worker-backed ProjectAnalyzer implementation.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::provider::{AnalyzeResult, ProjectAnalyzer};
use crate::worker::protocol::Outcome;
use crate::worker::WorkerClient;

/// ProjectAnalyzer implementation that dispatches to the external worker
/// process via [`WorkerClient`].
pub struct WorkerProjectAnalyzer {
    client: Arc<WorkerClient>,
}

impl WorkerProjectAnalyzer {
    /// Create a new analyzer over a shared client.
    pub fn new(client: Arc<WorkerClient>) -> Self {
        Self { client }
    }

    /// Create a new analyzer over an owned client.
    pub fn with_client(client: WorkerClient) -> Self {
        Self::new(Arc::new(client))
    }
}

#[async_trait]
impl ProjectAnalyzer for WorkerProjectAnalyzer {
    async fn analyze(&self, manifest: &Path) -> AnalyzeResult<Outcome> {
        self.client.analyze_manifest(manifest).await
    }
}

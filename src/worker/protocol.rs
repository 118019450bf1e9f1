//! Protocol types for worker communication.
//!
//! The worker speaks NDJSON: one request envelope per line on stdin, one
//! response envelope per line on stdout. The analyzed project data has no
//! schema on this side of the channel; whatever structure the worker
//! produces is carried as-is.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "project.analyze").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the analysis succeeded.
    pub success: bool,
    /// Analyzed project data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error text (present if success = false).
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Analyze Operation
// ============================================================================

/// Parameters for `project.analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeParams {
    /// Absolute path to the package manifest the worker should read.
    pub manifest: String,
}

/// The single result of one analysis request.
///
/// The two cases are discriminated by the envelope's `success` tag, never by
/// inspecting the payload's runtime shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The worker could not analyze the manifest. The text is the final
    /// user-facing message and is surfaced verbatim on stderr.
    ErrorMessage(String),
    /// The analyzed project description, rendered fully expanded on stdout.
    Payload(serde_json::Value),
}

impl Outcome {
    /// Whether this outcome is a worker-reported error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorMessage(_))
    }
}

impl From<ResponseEnvelope> for Outcome {
    fn from(envelope: ResponseEnvelope) -> Self {
        if envelope.success {
            Outcome::Payload(envelope.result.unwrap_or(serde_json::Value::Null))
        } else {
            Outcome::ErrorMessage(
                envelope
                    .error
                    .unwrap_or_else(|| "worker reported an unspecified error".to_string()),
            )
        }
    }
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const ANALYZE: &str = "project.analyze";
}

//! Analyzer seam between the harness and the worker process.
//!
//! The harness consumes the worker through the [`ProjectAnalyzer`] trait;
//! [`WorkerProjectAnalyzer`] is the production implementation backed by the
//! external worker process. Tests substitute scripted implementations.

mod provider;
mod worker_provider;

pub use provider::{AnalyzeResult, ProjectAnalyzer};
pub use worker_provider::WorkerProjectAnalyzer;

//! # pkgprobe
//!
//! A single-shot harness around the pre-built `pkgprobe-worker` analyzer:
//! resolve a package-manifest path, hand it to the worker over a message
//! channel, and render whatever comes back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Request (manifest path)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [worker client, NDJSON stdin]
//! ┌─────────────────────────────────────────────────────────┐
//! │         pkgprobe-worker (pre-built child process)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [NDJSON stdout, one envelope]
//! ┌─────────────────────────────────────────────────────────┐
//! │      Outcome: error text  │  analyzed project data      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render]
//!              stderr (verbatim)  │  stdout (fully expanded)
//! ```
//!
//! Exactly one request is dispatched per invocation and exactly one result
//! comes back. The wait is bounded by a configurable timeout, and the worker
//! process is killed when its handle drops.

pub mod analyze;
pub mod config;
pub mod project;
pub mod render;
pub mod worker;

pub use analyze::{default_manifest_path, run, run_with_settings, HarnessError, HarnessResult};
pub use worker::protocol::Outcome;

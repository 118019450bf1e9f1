//! Worker communication module.
//!
//! This module provides async communication with the pre-built analyzer
//! worker process. The worker reads and interprets package manifests; the
//! harness never opens the manifest itself, it only passes the path.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  pkgprobe Harness (Rust + Tokio)                │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                    WorkerClient (Async)                   │  │
//! │  │  - Spawns the analyzer as a child process                 │  │
//! │  │  - NDJSON protocol over stdin/stdout                      │  │
//! │  │  - Request IDs correlate the single response              │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │                              │                                  │
//! │               stdin (NDJSON) │ stdout (NDJSON)                  │
//! │                              ▼                                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │            pkgprobe-worker (pre-built child process)            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pkgprobe::worker::WorkerClient;
//!
//! let client = WorkerClient::spawn("./pkgprobe-worker").await?;
//!
//! // One request, one result
//! let outcome = client.analyze_manifest("/srv/app/package/package.json").await?;
//!
//! // Worker is killed when the client drops
//! ```

mod client;
pub mod embedded;
mod error;
pub mod protocol;

pub use client::{PendingOutcome, WorkerClient};
pub use error::{WorkerError, WorkerResult};

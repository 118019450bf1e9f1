//! Async client for the pre-built analyzer worker process.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{oneshot, Mutex};

use super::error::{WorkerError, WorkerResult};
use super::protocol::{methods, AnalyzeParams, Outcome, RequestEnvelope, ResponseEnvelope};
use crate::config::Settings;

/// Default timeout for requests (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Map of pending request IDs to their response channels.
type PendingMap = Arc<Mutex<HashMap<String, oneshot::Sender<ResponseEnvelope>>>>;

/// Async client for the analyzer worker.
///
/// The client spawns the worker as a child process and communicates via
/// NDJSON (newline-delimited JSON) over stdin/stdout. Each request carries a
/// unique ID; a background reader task routes the worker's response to the
/// matching waiter. The harness only ever has one request in flight, but the
/// ID correlation means a late or duplicate line from a misbehaving worker
/// is discarded instead of being delivered to the wrong caller.
///
/// The child process is killed when the client drops, so the worker's
/// lifetime is scoped to the single request/response cycle that owns it.
///
/// # Example
///
/// ```ignore
/// use pkgprobe::worker::WorkerClient;
///
/// let client = WorkerClient::spawn("./pkgprobe-worker").await?;
/// let outcome = client.analyze_manifest("/srv/app/package/package.json").await?;
/// ```
pub struct WorkerClient {
    /// Writer for sending requests to worker stdin.
    stdin: Arc<Mutex<BufWriter<ChildStdin>>>,

    /// Pending request IDs awaiting a response.
    pending: PendingMap,

    /// Handle to the worker child process.
    _child: Child,

    /// Handle to the background reader task.
    _reader_task: tokio::task::JoinHandle<()>,

    /// Request timeout duration.
    timeout: Duration,
}

impl WorkerClient {
    /// Spawn a new worker process with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::SpawnFailed`] if the worker process cannot be
    /// started.
    pub async fn spawn<P: AsRef<Path>>(worker_path: P) -> WorkerResult<Self> {
        Self::spawn_with_timeout(worker_path, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).await
    }

    /// Spawn a new worker process with a custom request timeout.
    pub async fn spawn_with_timeout<P: AsRef<Path>>(
        worker_path: P,
        timeout: Duration,
    ) -> WorkerResult<Self> {
        Self::spawn_with_args::<P, &str>(worker_path, &[], timeout).await
    }

    /// Spawn a worker with command-line arguments and a custom timeout.
    pub async fn spawn_with_args<P: AsRef<Path>, S: AsRef<str>>(
        worker_path: P,
        args: &[S],
        timeout: Duration,
    ) -> WorkerResult<Self> {
        let mut command = Command::new(worker_path.as_ref());
        for arg in args {
            command.arg(arg.as_ref());
        }
        let mut child = command
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(WorkerError::SpawnFailed)?;

        let stdin = child.stdin.take().expect("stdin not captured");
        let stdout = child.stdout.take().expect("stdout not captured");

        let stdin = Arc::new(Mutex::new(BufWriter::new(stdin)));
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let reader_task = Self::spawn_reader_task(stdout, pending.clone());

        Ok(Self {
            stdin,
            pending,
            _child: child,
            _reader_task: reader_task,
            timeout,
        })
    }

    /// Spawn a worker using settings configuration.
    ///
    /// Resolves the worker binary via the embedded copy (if available and
    /// configured), then the configured path, then well-known locations.
    pub async fn spawn_with_settings(settings: &Settings) -> WorkerResult<Self> {
        let worker_path = Self::resolve_worker_path(settings)?;
        let timeout = Duration::from_secs(settings.analyze.timeout_seconds);
        Self::spawn_with_timeout(worker_path, timeout).await
    }

    /// Resolve the worker binary path from settings.
    fn resolve_worker_path(settings: &Settings) -> WorkerResult<PathBuf> {
        if settings.worker.embedded && super::embedded::is_embedded_available() {
            return super::embedded::extract_worker();
        }

        settings.worker_path().ok_or_else(|| {
            WorkerError::BinaryNotFound(
                "set worker.path in pkgprobe.toml or build with --features embedded-worker"
                    .to_string(),
            )
        })
    }

    /// Spawn the background task that reads responses from the worker.
    fn spawn_reader_task(stdout: ChildStdout, pending: PendingMap) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF - worker exited
                        break;
                    }
                    Ok(_) => match serde_json::from_str::<ResponseEnvelope>(&line) {
                        Ok(resp) => {
                            let mut pending = pending.lock().await;
                            if let Some(tx) = pending.remove(&resp.id) {
                                let _ = tx.send(resp);
                            }
                            // A response with an unknown ID has no waiter; drop it.
                        }
                        Err(e) => {
                            eprintln!("worker: failed to parse response: {}", e);
                        }
                    },
                    Err(e) => {
                        eprintln!("worker: read error: {}", e);
                        break;
                    }
                }
            }

            // Drop every pending sender so waiters observe WorkerExited.
            pending.lock().await.clear();
        })
    }

    /// Dispatch one analysis request without waiting for the response.
    ///
    /// This is the fire-and-forget half of the cycle: the envelope is
    /// written to the worker's stdin and a one-shot receiver is registered
    /// under the request ID. Await the returned [`PendingOutcome`] to get
    /// the single result.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the stdin write fails.
    pub async fn submit(&self, params: AnalyzeParams) -> WorkerResult<PendingOutcome> {
        let id = uuid::Uuid::new_v4().to_string();

        let request = RequestEnvelope {
            id: id.clone(),
            method: methods::ANALYZE.to_string(),
            params: serde_json::to_value(&params).map_err(WorkerError::SerializeFailed)?,
        };
        let line = serde_json::to_string(&request).map_err(WorkerError::SerializeFailed)? + "\n";

        // Register the response channel before writing so the reader task
        // cannot race past us.
        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self.pending.lock().await;
            pending.insert(id.clone(), tx);
        }

        let write_result = {
            let mut stdin = self.stdin.lock().await;
            match stdin.write_all(line.as_bytes()).await {
                Ok(()) => stdin.flush().await,
                Err(e) => Err(e),
            }
        };
        if let Err(e) = write_result {
            self.pending.lock().await.remove(&id);
            return Err(WorkerError::WriteFailed(e));
        }

        Ok(PendingOutcome {
            id,
            rx,
            pending: self.pending.clone(),
            timeout: self.timeout,
        })
    }

    /// Send one analysis request and wait for the single result.
    pub async fn analyze_manifest<P: AsRef<Path>>(&self, manifest: P) -> WorkerResult<Outcome> {
        let params = AnalyzeParams {
            manifest: manifest.as_ref().display().to_string(),
        };
        self.submit(params).await?.wait().await
    }

    /// Get the current request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// A dispatched request waiting for its single response.
///
/// Obtained from [`WorkerClient::submit`]; consumed by [`wait`](Self::wait).
/// The response is delivered at most once.
pub struct PendingOutcome {
    id: String,
    rx: oneshot::Receiver<ResponseEnvelope>,
    pending: PendingMap,
    timeout: Duration,
}

impl PendingOutcome {
    /// Wait for the worker's response, bounded by the client's timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Timeout`] if the worker does not respond in
    /// time (the pending entry is removed so nothing leaks), or
    /// [`WorkerError::WorkerExited`] if the worker went away first.
    pub async fn wait(self) -> WorkerResult<Outcome> {
        match tokio::time::timeout(self.timeout, self.rx).await {
            Ok(Ok(envelope)) => Ok(envelope.into()),
            Ok(Err(_)) => Err(WorkerError::WorkerExited),
            Err(_) => {
                self.pending.lock().await.remove(&self.id);
                Err(WorkerError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

//! pkgprobe CLI - analyze a package manifest via the external worker.
//!
//! Usage:
//!   pkgprobe [MANIFEST] [--worker <path>] [--timeout <secs>] [--config <path>]
//!
//! With no arguments the harness analyzes the manifest at the fixed location
//! next to its own binary (package/package.json). The analyzed project is
//! printed fully expanded on stdout; an analysis failure reported by the
//! worker is printed verbatim on stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pkgprobe::analyze::{self, HarnessError, HarnessResult};
use pkgprobe::config::Settings;
use pkgprobe::render;
use pkgprobe::worker::protocol::Outcome;

#[derive(Parser)]
#[command(name = "pkgprobe")]
#[command(about = "Analyze a package manifest via the pkgprobe-worker process")]
#[command(version)]
struct Cli {
    /// Manifest to analyze (defaults to package/package.json next to this binary)
    manifest: Option<PathBuf>,

    /// Path to the worker binary (overrides configuration)
    #[arg(long)]
    worker: Option<PathBuf>,

    /// Seconds to wait for the worker's response
    #[arg(long)]
    timeout: Option<u64>,

    /// Configuration file to load instead of the default locations
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Some(worker) = &cli.worker {
        settings.worker.path = Some(worker.display().to_string());
        settings.worker.embedded = false;
    }
    if let Some(timeout) = cli.timeout {
        settings.analyze.timeout_seconds = timeout;
    }

    let manifest = match resolve_request(&cli, &settings) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match analyze::run_with_settings(&settings, &manifest).await {
        Ok(Outcome::Payload(project)) => {
            println!("{}", render::expanded(&project));
            ExitCode::SUCCESS
        }
        Ok(Outcome::ErrorMessage(message)) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, pkgprobe::config::SettingsError> {
    match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

/// Pick the request path: CLI argument, then config override, then the fixed
/// default location. Relative paths are anchored at the current directory.
fn resolve_request(cli: &Cli, settings: &Settings) -> HarnessResult<PathBuf> {
    let chosen = match &cli.manifest {
        Some(path) => Some(path.clone()),
        None => settings.manifest_path()?,
    };

    match chosen {
        Some(path) if path.is_absolute() => Ok(path),
        Some(path) => {
            let cwd = std::env::current_dir()
                .map_err(|e| HarnessError::PathResolution(e.to_string()))?;
            Ok(cwd.join(path))
        }
        None => analyze::default_manifest_path(),
    }
}

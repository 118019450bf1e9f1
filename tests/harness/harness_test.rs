//! Integration tests for the single-shot harness cycle.
//!
//! The worker contract is scripted in-process here; these tests pin the
//! one-request/one-result properties without spawning a child process.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use pkgprobe::analyze;
use pkgprobe::project::{AnalyzeResult, ProjectAnalyzer};
use pkgprobe::render;
use pkgprobe::worker::protocol::Outcome;

/// Scripted analyzer that returns a fixed outcome and counts dispatches.
struct ScriptedAnalyzer {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl ScriptedAnalyzer {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectAnalyzer for ScriptedAnalyzer {
    async fn analyze(&self, _manifest: &Path) -> AnalyzeResult<Outcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}

fn sample_project() -> serde_json::Value {
    json!({
        "name": "demo",
        "version": "1.0.0",
        "dependencies": {}
    })
}

#[tokio::test]
async fn error_text_is_carried_verbatim() {
    let analyzer = ScriptedAnalyzer::new(Outcome::ErrorMessage("bad package file".to_string()));

    let outcome = analyze::run(&analyzer, Path::new("/srv/app/package/package.json"))
        .await
        .unwrap();

    // The worker's text is the final user-facing message: no wrapping, no
    // translation, no payload on the other stream.
    assert_eq!(outcome, Outcome::ErrorMessage("bad package file".to_string()));
}

#[tokio::test]
async fn payload_is_rendered_fully_expanded() {
    let analyzer = ScriptedAnalyzer::new(Outcome::Payload(sample_project()));

    let outcome = analyze::run(&analyzer, Path::new("/srv/app/package/package.json"))
        .await
        .unwrap();

    let Outcome::Payload(project) = outcome else {
        panic!("expected a payload outcome");
    };
    let text = render::expanded(&project);
    assert!(text.contains("\"name\": \"demo\""));
    assert!(text.contains("\"version\": \"1.0.0\""));
    assert!(text.contains("\"dependencies\": {}"));
}

#[tokio::test]
async fn exactly_one_dispatch_per_run() {
    let analyzer = ScriptedAnalyzer::new(Outcome::Payload(sample_project()));

    analyze::run(&analyzer, Path::new("/srv/app/package/package.json"))
        .await
        .unwrap();

    assert_eq!(analyzer.calls(), 1);
}

#[tokio::test]
async fn result_lands_on_exactly_one_stream() {
    // The outcome is a two-case tagged value, so a run renders on stdout or
    // on stderr, never both and never neither.
    let success = ScriptedAnalyzer::new(Outcome::Payload(sample_project()));
    let failure = ScriptedAnalyzer::new(Outcome::ErrorMessage("bad package file".to_string()));
    let manifest = Path::new("/srv/app/package/package.json");

    let ok = analyze::run(&success, manifest).await.unwrap();
    let err = analyze::run(&failure, manifest).await.unwrap();

    assert!(!ok.is_error());
    assert!(err.is_error());
}

#[tokio::test]
async fn empty_payload_still_renders() {
    let analyzer = ScriptedAnalyzer::new(Outcome::Payload(json!({})));

    let outcome = analyze::run(&analyzer, Path::new("/srv/app/package/package.json"))
        .await
        .unwrap();

    let Outcome::Payload(project) = outcome else {
        panic!("expected a payload outcome");
    };
    assert_eq!(render::expanded(&project), "{}");
}

#[tokio::test]
async fn identical_runs_render_identically() {
    let analyzer = ScriptedAnalyzer::new(Outcome::Payload(sample_project()));
    let manifest = Path::new("/srv/app/package/package.json");

    let first = analyze::run(&analyzer, manifest).await.unwrap();
    let second = analyze::run(&analyzer, manifest).await.unwrap();

    let (Outcome::Payload(a), Outcome::Payload(b)) = (first, second) else {
        panic!("expected payload outcomes");
    };
    assert_eq!(render::expanded(&a), render::expanded(&b));
}

#[tokio::test]
async fn manifest_in_a_scratch_dir_reaches_the_analyzer() {
    // The harness passes the path through untouched; the analyzer is the
    // one that opens the file.
    struct PathEcho;

    #[async_trait]
    impl ProjectAnalyzer for PathEcho {
        async fn analyze(&self, manifest: &Path) -> AnalyzeResult<Outcome> {
            Ok(Outcome::Payload(json!({
                "manifest": manifest.display().to_string()
            })))
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let manifest = analyze::resolve_manifest(dir.path());

    let outcome = analyze::run(&PathEcho, &manifest).await.unwrap();
    let Outcome::Payload(project) = outcome else {
        panic!("expected a payload outcome");
    };
    assert_eq!(project["manifest"], manifest.display().to_string());
}

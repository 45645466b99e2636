//! Concurrent multi-algorithm runner.
//!
//! Each algorithm runs on a tokio blocking thread under its own time budget.
//! Grading is CPU-bound and synchronous, so the async side only waits.
//! A timed-out task is abandoned, not interrupted: the blocking thread finishes
//! in the background and its result is discarded.

use crate::error::{CliError, Result};
use cmap_domain::RawProposition;
use cmap_scoring::{score, ScoringError, ScoringOptions, ScoringResult};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::{task, time};
use tracing::{debug, warn};

/// Outcome of running one algorithm.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    /// Algorithm name as requested
    pub algorithm: String,

    /// Whether grading finished with a result
    pub success: bool,

    /// Scoring result on success
    pub result: Option<ScoringResult>,

    /// Error message on failure
    pub error: Option<String>,

    /// Wall-clock time spent
    pub elapsed_ms: u64,
}

impl ExecutionReport {
    fn from_outcome(algorithm: String, outcome: Result<ScoringResult>, elapsed: Duration) -> Self {
        let elapsed_ms = elapsed.as_millis() as u64;
        match outcome {
            Ok(result) => Self {
                algorithm,
                success: true,
                result: Some(result),
                error: None,
                elapsed_ms,
            },
            Err(e) => {
                warn!("{} failed: {}", algorithm, e);
                Self {
                    algorithm,
                    success: false,
                    result: None,
                    error: Some(e.to_string()),
                    elapsed_ms,
                }
            }
        }
    }
}

/// Run a grading job on a blocking thread, bounded by `budget`.
async fn run_blocking<F>(algorithm: &str, budget: Duration, job: F) -> Result<ScoringResult>
where
    F: FnOnce() -> std::result::Result<ScoringResult, ScoringError> + Send + 'static,
{
    let handle = task::spawn_blocking(job);
    let result = time::timeout(budget, handle)
        .await
        .map_err(|_| CliError::Timeout {
            algorithm: algorithm.to_string(),
            secs: budget.as_secs(),
        })???;
    Ok(result)
}

/// Run every named algorithm concurrently against the same pair of maps.
///
/// Reports come back in request order. A failing or timed-out algorithm
/// produces a failed report and never affects the others.
pub async fn run_algorithms(
    names: &[String],
    master: Arc<Vec<RawProposition>>,
    student: Arc<Vec<RawProposition>>,
    options: &ScoringOptions,
    timeout_secs: u64,
) -> Vec<ExecutionReport> {
    let budget = Duration::from_secs(timeout_secs);

    let handles: Vec<_> = names
        .iter()
        .map(|name| {
            let name = name.clone();
            let master = Arc::clone(&master);
            let student = Arc::clone(&student);
            let options = options.clone();

            tokio::spawn(async move {
                let started = Instant::now();
                let algorithm = name.clone();
                let outcome = run_blocking(&name, budget, move || {
                    score(&algorithm, &master, &student, &options)
                })
                .await;
                debug!("{} finished in {:?}", name, started.elapsed());
                ExecutionReport::from_outcome(name, outcome, started.elapsed())
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for (name, handle) in names.iter().zip(handles) {
        let report = match handle.await {
            Ok(report) => report,
            Err(e) => ExecutionReport::from_outcome(name.clone(), Err(e.into()), Duration::ZERO),
        };
        reports.push(report);
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> (Arc<Vec<RawProposition>>, Arc<Vec<RawProposition>>) {
        let master = vec![
            RawProposition::new("m1", "A", "B", "causes"),
            RawProposition::new("m2", "B", "C", "causes"),
        ];
        let student = vec![RawProposition::new("s1", "A", "B", "causes")];
        (Arc::new(master), Arc::new(student))
    }

    #[tokio::test]
    async fn test_reports_in_request_order() {
        let (master, student) = maps();
        let names = vec!["lea".to_string(), "mcclure".to_string(), "novak".to_string()];

        let reports =
            run_algorithms(&names, master, student, &ScoringOptions::default(), 30).await;

        let order: Vec<_> = reports.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(order, vec!["lea", "mcclure", "novak"]);
        assert!(reports.iter().all(|r| r.success));
        assert_eq!(reports[1].result.as_ref().map(|r| r.total_score), Some(3));
    }

    #[tokio::test]
    async fn test_unknown_algorithm_isolated() {
        let (master, student) = maps();
        let names = vec!["greedy".to_string(), "mcclure".to_string()];

        let reports =
            run_algorithms(&names, master, student, &ScoringOptions::default(), 30).await;

        assert!(!reports[0].success);
        assert!(reports[0].result.is_none());
        assert!(reports[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("greedy")));
        assert!(reports[1].success);
    }

    #[tokio::test]
    async fn test_timeout() {
        let outcome = run_blocking("slow", Duration::from_millis(20), || {
            std::thread::sleep(Duration::from_millis(300));
            Err(ScoringError::Config("unreachable".to_string()))
        })
        .await;

        assert!(matches!(
            outcome,
            Err(CliError::Timeout { ref algorithm, .. }) if algorithm == "slow"
        ));
    }

    #[tokio::test]
    async fn test_panicking_job_reported() {
        let outcome = run_blocking("broken", Duration::from_secs(5), || {
            panic!("grading bug");
        })
        .await;

        assert!(matches!(outcome, Err(CliError::Join(_))));
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let (master, student) = maps();
        let reports = run_algorithms(
            &["lea".to_string()],
            master,
            student,
            &ScoringOptions::default(),
            30,
        )
        .await;

        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["algorithm"], "lea");
        assert_eq!(json[0]["success"], true);
        assert_eq!(json[0]["result"]["detail"]["kind"], "causal");
    }
}

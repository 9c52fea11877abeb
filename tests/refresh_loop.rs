#![cfg(feature = "native")]

//! RefreshLoop driven by a scripted fetcher

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

use leadwatch::state::FETCH_ERROR_LABEL;
use leadwatch::{
    run_cycle, DashboardSession, DataFetcher, ErrorMergePolicy, FetchBundle, FetchError,
    FetchResult, Lead, PipelineStatus, RefreshConfig, RefreshLoop, Resource, Stats,
};

/// Replays a fixed list of outcomes, then hangs
#[derive(Clone)]
struct ScriptedFetcher {
    script: Arc<Mutex<VecDeque<FetchResult<FetchBundle>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    fn new(outcomes: Vec<FetchResult<FetchBundle>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataFetcher for ScriptedFetcher {
    async fn fetch(&self) -> FetchResult<FetchBundle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(outcome) => outcome,
            None => std::future::pending().await,
        }
    }
}

fn lead(name: &str) -> Lead {
    Lead {
        company_name: name.to_string(),
        email: format!("contact@{}.example", name.to_lowercase()),
        website: None,
        description: String::new(),
        industry: None,
        timestamp: "2024-01-15 10:30:00".to_string(),
        enriched: false,
        serp_data: None,
    }
}

fn bundle(names: &[&str], status: PipelineStatus, errors: &[&str]) -> FetchResult<FetchBundle> {
    Ok(FetchBundle {
        leads: names.iter().map(|n| lead(n)).collect(),
        stats: Stats {
            total_leads: names.len() as u64,
            enriched_leads: 0,
            last_update: "2024-01-15T10:30:00Z".to_string(),
            status,
        },
        errors: errors.iter().map(|e| e.to_string()).collect(),
        total_errors: None,
    })
}

fn refused() -> FetchResult<FetchBundle> {
    Err(FetchError::Transport {
        resource: Resource::Leads,
        message: "connection refused".to_string(),
    })
}

fn config(interval: Duration) -> RefreshConfig {
    RefreshConfig {
        interval,
        ..RefreshConfig::default()
    }
}

async fn wait_for<F>(rx: &mut watch::Receiver<DashboardSession>, predicate: F) -> DashboardSession
where
    F: FnMut(&DashboardSession) -> bool,
{
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for session state")
        .expect("refresh loop stopped")
        .clone()
}

#[tokio::test]
async fn test_first_cycle_runs_on_start() {
    let fetcher = ScriptedFetcher::new(vec![bundle(&["Acme", "Globex"], PipelineStatus::Active, &[])]);
    let handle = RefreshLoop::new(fetcher.clone(), config(Duration::from_secs(3600))).spawn();
    let mut rx = handle.subscribe();

    let session = wait_for(&mut rx, |s| s.counters().succeeded == 1).await;

    assert!(!session.is_loading());
    assert_eq!(session.leads().len(), 2);
    assert_eq!(session.trend().len(), 1);
    assert!(session.last_refresh().is_some());
    assert_eq!(fetcher.calls(), 1);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_cycles_repeat() {
    let fetcher = ScriptedFetcher::new(vec![
        bundle(&["Acme"], PipelineStatus::Active, &[]),
        refused(),
        bundle(&["Acme", "Globex", "Initech"], PipelineStatus::Warning, &["Crunchbase quota exceeded"]),
    ]);
    let handle = RefreshLoop::new(fetcher.clone(), config(Duration::from_millis(20))).spawn();
    let mut rx = handle.subscribe();

    let last = wait_for(&mut rx, |s| s.counters().succeeded == 2).await;
    assert_eq!(last.counters().failed, 1);
    assert_eq!(last.leads().len(), 3);
    assert_eq!(last.stats().status, PipelineStatus::Warning);
    assert_eq!(last.trend().len(), 2);
    assert_eq!(
        last.errors().entries(),
        &[
            "Error fetching data: /api/leads: connection refused".to_string(),
            "Crunchbase quota exceeded".to_string(),
        ]
    );

    handle.shutdown().await;
}

#[tokio::test]
async fn test_failed_cycle_keeps_data() {
    let fetcher = ScriptedFetcher::new(vec![bundle(&["Acme"], PipelineStatus::Active, &[]), refused()]);
    let mut session = DashboardSession::default();

    run_cycle(&fetcher, &mut session).await;
    let report = run_cycle(&fetcher, &mut session).await;

    assert!(matches!(report, Some(leadwatch::CycleReport::Failed { .. })));
    assert!(!session.is_loading());
    assert_eq!(session.leads().len(), 1);
    assert_eq!(session.trend().len(), 1);
    assert_eq!(session.errors().len(), 1);
    assert!(session.errors().entries()[0].starts_with(FETCH_ERROR_LABEL));
}

#[tokio::test]
async fn test_shutdown_discards_in_flight_fetch() {
    // Empty script: the first fetch never completes
    let fetcher = ScriptedFetcher::new(Vec::new());
    let handle = RefreshLoop::new(fetcher.clone(), config(Duration::from_millis(10))).spawn();
    let mut rx = handle.subscribe();

    wait_for(&mut rx, |s| s.is_loading()).await;
    handle.shutdown().await;

    // The sender is gone and the last published state is still mid-cycle
    assert!(rx.changed().await.is_err());
    let last = rx.borrow().clone();
    assert!(last.is_loading());
    assert_eq!(last.counters().succeeded + last.counters().failed, 0);
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_replace_policy_swaps_backend_errors() {
    let fetcher = ScriptedFetcher::new(vec![
        bundle(&[], PipelineStatus::Active, &["first"]),
        bundle(&[], PipelineStatus::Active, &["second", "third"]),
    ]);
    let config = RefreshConfig {
        interval: Duration::from_millis(20),
        error_policy: ErrorMergePolicy::Replace,
        ..RefreshConfig::default()
    };
    let handle = RefreshLoop::new(fetcher, config).spawn();
    let mut rx = handle.subscribe();

    let session = wait_for(&mut rx, |s| s.counters().succeeded == 2).await;
    assert_eq!(session.errors().entries(), &["second".to_string(), "third".to_string()]);

    handle.shutdown().await;
}

#[tokio::test]
async fn test_run_cycle_skips_when_in_flight() {
    let fetcher = ScriptedFetcher::new(vec![bundle(&["Acme"], PipelineStatus::Active, &[])]);
    let mut session = DashboardSession::default();

    session.begin_cycle();
    assert!(run_cycle(&fetcher, &mut session).await.is_none());
    assert_eq!(fetcher.calls(), 0);
}

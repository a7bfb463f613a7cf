//! End-to-end run scenarios against an in-memory integrity service.

use async_trait::async_trait;
use integrity_monitor::domain::{
    CheckDescriptor, CheckSummary, DataElementRef, IntegritySummaries, OrgUnit,
};
use integrity_monitor::error::Result;
use integrity_monitor::monitor::{
    CompletionPoller, DataValue, IntegrityService, MappingPipeline, PollerConfig,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted service: reports the checks as running for a fixed number of
/// polls, then serves canned summaries and data element matches, recording
/// every published value.
struct ScriptedService {
    running_polls: usize,
    polls_seen: AtomicUsize,
    summaries_fetches: AtomicUsize,
    summaries: IntegritySummaries,
    elements_by_code: HashMap<String, Vec<DataElementRef>>,
    published: Mutex<Vec<DataValue>>,
}

impl ScriptedService {
    fn new(running_polls: usize) -> Self {
        let mut summaries = IntegritySummaries::new();
        summaries.insert("A".to_string(), CheckSummary { count: 3 });

        let mut elements_by_code = HashMap::new();
        elements_by_code.insert(
            "C1".to_string(),
            vec![DataElementRef {
                id: "M1".to_string(),
            }],
        );

        Self {
            running_polls,
            polls_seen: AtomicUsize::new(0),
            summaries_fetches: AtomicUsize::new(0),
            summaries,
            elements_by_code,
            published: Mutex::new(Vec::new()),
        }
    }

    fn catalog() -> Vec<CheckDescriptor> {
        vec![
            CheckDescriptor {
                name: "A".to_string(),
                code: "C1".to_string(),
            },
            CheckDescriptor {
                name: "B".to_string(),
                code: "C2".to_string(),
            },
        ]
    }
}

#[async_trait]
impl IntegrityService for ScriptedService {
    async fn fetch_integrity_checks(&self) -> Result<Vec<CheckDescriptor>> {
        Ok(Self::catalog())
    }

    async fn trigger_all_summaries(&self) -> Result<()> {
        Ok(())
    }

    async fn trigger_selected_summaries(&self, _checks: &[String]) -> Result<()> {
        Ok(())
    }

    async fn fetch_running_checks(&self) -> Result<Vec<String>> {
        let seen = self.polls_seen.fetch_add(1, Ordering::SeqCst);
        if seen < self.running_polls {
            Ok(vec!["A".to_string()])
        } else {
            Ok(vec![])
        }
    }

    async fn fetch_completed_summaries(&self) -> Result<IntegritySummaries> {
        self.summaries_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.summaries.clone())
    }

    async fn fetch_level1_org_units(&self) -> Result<Vec<OrgUnit>> {
        Ok(vec![OrgUnit {
            id: "OU1".to_string(),
        }])
    }

    async fn find_data_elements_by_code(&self, code: &str) -> Result<Vec<DataElementRef>> {
        Ok(self.elements_by_code.get(code).cloned().unwrap_or_default())
    }

    async fn publish_data_value(&self, value: &DataValue) -> Result<u16> {
        self.published.lock().unwrap().push(value.clone());
        Ok(201)
    }
}

fn fast_poller() -> CompletionPoller {
    CompletionPoller::new(PollerConfig {
        settle: Duration::ZERO,
        interval: Duration::ZERO,
        max_attempts: 10,
    })
}

#[tokio::test]
async fn monitored_check_is_polled_to_completion_and_published() {
    let service = ScriptedService::new(1);

    let summaries = fast_poller().run(&service).await.unwrap();
    // One non-empty poll, one empty poll, one summaries fetch.
    assert_eq!(service.polls_seen.load(Ordering::SeqCst), 2);
    assert_eq!(service.summaries_fetches.load(Ordering::SeqCst), 1);

    let org_units = service.fetch_level1_org_units().await.unwrap();
    let pipeline = MappingPipeline::new(vec!["A".to_string()]);
    let report = pipeline
        .run(
            &service,
            &summaries,
            &ScriptedService::catalog(),
            "20240101",
            &org_units[0].id,
        )
        .await;

    assert_eq!(report.published, 1);
    let published = service.published.lock().unwrap();
    assert_eq!(published.as_slice(), &[DataValue::new("M1", "OU1", "20240101", 3)]);
}

#[tokio::test]
async fn unresolvable_checks_skip_but_never_abort_the_run() {
    let service = ScriptedService::new(0);

    let summaries = fast_poller().run(&service).await.unwrap();

    // "ghost" has no summary, "B" has a summary-less catalog entry, "A"
    // resolves; order of the monitored list is preserved.
    let pipeline = MappingPipeline::new(vec![
        "ghost".to_string(),
        "B".to_string(),
        "A".to_string(),
    ]);
    let report = pipeline
        .run(
            &service,
            &summaries,
            &ScriptedService::catalog(),
            "20240101",
            "OU1",
        )
        .await;

    assert_eq!(report.missing_summary, 2);
    assert_eq!(report.published, 1);
    assert_eq!(service.published.lock().unwrap().len(), 1);
}

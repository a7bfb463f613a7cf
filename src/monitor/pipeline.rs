//! Mapping pipeline: completed check summaries to published data values.
//!
//! Every miss along the way is a logged skip; one bad check never stops the
//! rest of the list.

use tracing::{info, warn};

use crate::domain::{CheckDescriptor, IntegritySummaries};
use crate::monitor::publisher::DataValue;
use crate::monitor::IntegrityService;

/// Per-run outcome counts, logged at the end of the run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Values the server accepted (2xx)
    pub published: usize,
    /// Monitored names with no completed summary
    pub missing_summary: usize,
    /// Monitored names that resolved to no data element
    pub missing_data_element: usize,
    /// Write calls that failed or were rejected
    pub publish_failures: usize,
}

pub struct MappingPipeline {
    /// Check names to process, in order; duplicates are processed once per
    /// occurrence
    monitored: Vec<String>,
}

impl MappingPipeline {
    pub fn new(monitored: Vec<String>) -> Self {
        Self { monitored }
    }

    /// Resolve and publish one data value per monitored check.
    ///
    /// For each name: summary by exact name, descriptor by linear catalog
    /// scan (first match wins), data element by code lookup (first match
    /// wins), then an immediate unbatched write.
    pub async fn run<S: IntegrityService + ?Sized>(
        &self,
        service: &S,
        summaries: &IntegritySummaries,
        catalog: &[CheckDescriptor],
        period: &str,
        org_unit: &str,
    ) -> RunReport {
        let mut report = RunReport::default();

        for name in &self.monitored {
            let Some(summary) = summaries.get(name) else {
                warn!("Summary not found for check: {}", name);
                report.missing_summary += 1;
                continue;
            };

            let descriptor = catalog.iter().find(|check| check.name == *name);
            let code = match descriptor {
                Some(check) if !check.code.is_empty() => check.code.as_str(),
                Some(_) => {
                    warn!("Check has no code, data element not found: {}", name);
                    report.missing_data_element += 1;
                    continue;
                }
                None => {
                    warn!("Check not present in catalog, data element not found: {}", name);
                    report.missing_data_element += 1;
                    continue;
                }
            };

            let matches = match service.find_data_elements_by_code(code).await {
                Ok(matches) => matches,
                Err(e) => {
                    warn!("Data element lookup failed for check {}: {}", name, e);
                    report.missing_data_element += 1;
                    continue;
                }
            };
            let Some(element) = matches.first() else {
                warn!("Data element not found for check: {}", name);
                report.missing_data_element += 1;
                continue;
            };

            let value = DataValue::new(element.id.clone(), org_unit, period, summary.count);
            match service.publish_data_value(&value).await {
                Ok(status) if (200..300).contains(&status) => {
                    info!(
                        check = %name,
                        data_element = %value.data_element,
                        count = value.value,
                        "Published data value"
                    );
                    report.published += 1;
                }
                Ok(status) => {
                    warn!("Publish rejected with HTTP {} for check: {}", status, name);
                    report.publish_failures += 1;
                }
                Err(e) => {
                    warn!("Publish failed for check {}: {}", name, e);
                    report.publish_failures += 1;
                }
            }
        }

        report
    }
}

//! Trait seam over the remote integrity API.
//!
//! The poller and the mapping pipeline only see this trait, so their control
//! flow can be exercised against a mock without a server.

use async_trait::async_trait;

use crate::domain::{CheckDescriptor, DataElementRef, IntegritySummaries, OrgUnit};
use crate::error::Result;
use crate::monitor::publisher::DataValue;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntegrityService: Send + Sync {
    /// List all integrity check definitions
    async fn fetch_integrity_checks(&self) -> Result<Vec<CheckDescriptor>>;

    /// Start server-side computation of all check summaries
    async fn trigger_all_summaries(&self) -> Result<()>;

    /// Start server-side computation for a subset of checks
    async fn trigger_selected_summaries(&self, checks: &[String]) -> Result<()>;

    /// Names of checks whose computation is still running
    async fn fetch_running_checks(&self) -> Result<Vec<String>>;

    /// All completed summaries, keyed by check name
    async fn fetch_completed_summaries(&self) -> Result<IntegritySummaries>;

    /// Organisation units at the top of the hierarchy (level 1)
    async fn fetch_level1_org_units(&self) -> Result<Vec<OrgUnit>>;

    /// Data elements whose code equals `code`
    async fn find_data_elements_by_code(&self, code: &str) -> Result<Vec<DataElementRef>>;

    /// Submit one data value; returns the raw HTTP status code
    async fn publish_data_value(&self, value: &DataValue) -> Result<u16>;
}

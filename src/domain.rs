//! Wire shapes exchanged with the DHIS2 API.
//!
//! The server attaches many fields beyond the ones the monitor reads; serde
//! ignores unknown fields, so only the consumed subset is modeled here.

use serde::Deserialize;
use std::collections::HashMap;

/// One integrity check definition from `/api/dataIntegrity`
#[derive(Debug, Clone, Deserialize)]
pub struct CheckDescriptor {
    pub name: String,
    /// Code matched against a data element code; checks without one
    /// cannot be mapped to a data element
    #[serde(default)]
    pub code: String,
}

/// Completed result for one check; `count` is the number of violations
#[derive(Debug, Clone, Deserialize)]
pub struct CheckSummary {
    #[serde(default)]
    pub count: u64,
}

/// Completed summaries keyed by check name
pub type IntegritySummaries = HashMap<String, CheckSummary>;

/// A data element matched by code lookup
#[derive(Debug, Clone, Deserialize)]
pub struct DataElementRef {
    pub id: String,
}

/// Envelope for `/api/dataElements?fields=id&filter=code:eq:<code>`
#[derive(Debug, Deserialize)]
pub struct DataElementsResponse {
    #[serde(default, rename = "dataElements")]
    pub data_elements: Vec<DataElementRef>,
}

/// One organisation unit from `/api/organisationUnits`
#[derive(Debug, Clone, Deserialize)]
pub struct OrgUnit {
    pub id: String,
}

/// Envelope for `/api/organisationUnits?level=1`
#[derive(Debug, Deserialize)]
pub struct OrgUnitsResponse {
    #[serde(default, rename = "organisationUnits")]
    pub organisation_units: Vec<OrgUnit>,
}

//! The data value write shape for republishing check results.

/// Attribute option combo attached to every published value
pub const ATTRIBUTE_OPTION_COMBO: &str = "HllvX50cXC0";

/// Data set the monitored values belong to
pub const DATA_SET: &str = "ySAQjSSyLQg";

/// One fully derived data value, published exactly once per resolved check.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataValue {
    pub data_element: String,
    pub org_unit: String,
    pub period: String,
    pub value: u64,
}

impl DataValue {
    pub fn new(
        data_element: impl Into<String>,
        org_unit: impl Into<String>,
        period: impl Into<String>,
        value: u64,
    ) -> Self {
        Self {
            data_element: data_element.into(),
            org_unit: org_unit.into(),
            period: period.into(),
            value,
        }
    }

    /// Query pairs for the `/api/dataValues` write call; `co` and `ds` are
    /// fixed, the rest come from the record
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("de", self.data_element.clone()),
            ("co", ATTRIBUTE_OPTION_COMBO.to_string()),
            ("ds", DATA_SET.to_string()),
            ("ou", self.org_unit.clone()),
            ("pe", self.period.clone()),
            ("value", self.value.to_string()),
        ]
    }
}

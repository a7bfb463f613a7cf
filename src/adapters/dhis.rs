//! DHIS2 REST adapter.
//!
//! A thin authenticated client over the eight endpoints the monitor uses.
//! Credentials are folded into a Basic auth default header at construction;
//! the client is never reconfigured afterwards. Every operation returns a
//! typed `Result` so callers can tell an empty payload from a failed call.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{
    CheckDescriptor, DataElementRef, DataElementsResponse, IntegritySummaries, OrgUnit,
    OrgUnitsResponse,
};
use crate::error::{MonitorError, Result};
use crate::monitor::publisher::DataValue;
use crate::monitor::IntegrityService;

#[derive(Debug)]
pub struct DhisClient {
    http: Client,
    base_url: String,
}

impl DhisClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let credentials = BASE64_STANDARD.encode(format!("{}:{}", username, password));
        let mut auth = HeaderValue::from_str(&format!("Basic {}", credentials))
            .map_err(|e| MonitorError::Auth(format!("invalid credential bytes: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent("integrity-monitor/0.1")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ensure_success(response: &Response, endpoint: &str) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(MonitorError::Api {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        Self::ensure_success(&response, endpoint)?;
        Ok(response.json().await?)
    }

    async fn post_ack(&self, endpoint: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("POST {}", url);
        let response = self.http.post(&url).send().await?;
        // The ack body is not used for control flow.
        Self::ensure_success(&response, endpoint)
    }
}

#[async_trait]
impl IntegrityService for DhisClient {
    async fn fetch_integrity_checks(&self) -> Result<Vec<CheckDescriptor>> {
        self.get_json("/api/dataIntegrity").await
    }

    async fn trigger_all_summaries(&self) -> Result<()> {
        self.post_ack("/api/dataIntegrity/summary").await
    }

    async fn trigger_selected_summaries(&self, checks: &[String]) -> Result<()> {
        let endpoint = format!("/api/dataIntegrity/summary?checks={}", checks.join(","));
        self.post_ack(&endpoint).await
    }

    async fn fetch_running_checks(&self) -> Result<Vec<String>> {
        self.get_json("/api/dataIntegrity/summary/running").await
    }

    async fn fetch_completed_summaries(&self) -> Result<IntegritySummaries> {
        self.get_json("/api/dataIntegrity/summary").await
    }

    async fn fetch_level1_org_units(&self) -> Result<Vec<OrgUnit>> {
        let response: OrgUnitsResponse = self.get_json("/api/organisationUnits?level=1").await?;
        Ok(response.organisation_units)
    }

    async fn find_data_elements_by_code(&self, code: &str) -> Result<Vec<DataElementRef>> {
        let endpoint = format!("/api/dataElements?fields=id&filter=code:eq:{}", code);
        let response: DataElementsResponse = self.get_json(&endpoint).await?;
        Ok(response.data_elements)
    }

    async fn publish_data_value(&self, value: &DataValue) -> Result<u16> {
        let url = format!("{}/api/dataValues", self.base_url);
        debug!("POST {} de={} pe={}", url, value.data_element, value.period);
        let response = self
            .http
            .post(&url)
            .query(&value.query_params())
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}

//! Church website roster client
//!
//! Reads the full-time missionary listing for a stake from the membership
//! records (LCR) API. Logging in is handled elsewhere; this client is handed
//! a bearer token and/or session cookie that were already obtained.

use crate::error::RosterError;
use crate::models::{decode_records, RawRecord};
use crate::types::RosterSource;
use async_trait::async_trait;
use mboard_common::config::RosterConfig;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::StatusCode;
use std::time::Duration;

const USER_AGENT: &str = "mboard/0.1.0";
const ROSTER_PATH: &str = "api/orgs/full-time-missionaries";

/// Membership records API client
pub struct LcrClient {
    http_client: reqwest::Client,
    roster_url: String,
    bearer_token: Option<String>,
    cookie: Option<String>,
}

impl LcrClient {
    pub fn new(config: &RosterConfig) -> Result<Self, RosterError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RosterError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            roster_url: roster_url(&config.base_url, config.parent_unit),
            bearer_token: config.bearer_token.clone(),
            cookie: config.cookie.clone(),
        })
    }

    pub fn roster_url(&self) -> &str {
        &self.roster_url
    }
}

/// Listing URL for a parent unit
pub fn roster_url(base_url: &str, parent_unit: u64) -> String {
    format!(
        "{}/{}?lang=eng&unitNumber={}",
        base_url.trim_end_matches('/'),
        ROSTER_PATH,
        parent_unit
    )
}

#[async_trait]
impl RosterSource for LcrClient {
    fn source_id(&self) -> &'static str {
        "LCR"
    }

    async fn fetch_roster(&self) -> Result<Vec<RawRecord>, RosterError> {
        tracing::debug!(url = %self.roster_url, "Querying roster API");

        let mut request = self
            .http_client
            .get(&self.roster_url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RosterError::Network(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(RosterError::Unauthorized);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RosterError::Api(status.as_u16(), error_text));
        }

        let entries: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| RosterError::Parse(e.to_string()))?;
        let listed = entries.len();
        let records = decode_records(entries);

        tracing::debug!("LCR missionaries: {} of {} readable", records.len(), listed);

        Ok(records)
    }
}

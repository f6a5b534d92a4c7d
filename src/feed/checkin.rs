//! Check-in scraper client
//!
//! The reservation snapshot comes from a scraper that mirrors the booking
//! system and serves one JSON document per gym-local day. Days the scraper
//! has not captured come back as an error body rather than an empty
//! document; that is a normal state (early mornings, holidays) and maps to
//! `Ok(None)` here instead of an error.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::CheckinDay;

/// Read access to the check-in scraper, behind a trait so pollers and
/// services can run against canned data in tests.
#[async_trait]
pub trait CheckinApi: Send + Sync + 'static {
    /// Fetch the reservation snapshot for a gym-local date. `Ok(None)` means
    /// the scraper has no document for that day.
    async fn day(&self, date: NaiveDate) -> AppResult<Option<CheckinDay>>;

    /// Touch the scraper's health endpoint. Its free-tier host spins down
    /// when idle and takes the better part of a minute to come back, so the
    /// server pings it on a schedule.
    async fn ping_health(&self) -> AppResult<()>;
}

/// Error body the scraper returns for un-scraped days
#[derive(Deserialize)]
struct UpstreamError {
    error: Option<String>,
}

#[derive(Clone)]
pub struct CheckinClient {
    http: reqwest::Client,
    base_url: String,
}

impl CheckinClient {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn day_url(&self, date: NaiveDate) -> String {
        // The scraper keys documents as DD-MM-YYYY
        format!("{}/api/checkin/{}", self.base_url, date.format("%d-%m-%Y"))
    }
}

#[async_trait]
impl CheckinApi for CheckinClient {
    async fn day(&self, date: NaiveDate) -> AppResult<Option<CheckinDay>> {
        let response = self.http.get(self.day_url(date)).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.text().await?;

        if let Ok(UpstreamError {
            error: Some(message),
        }) = serde_json::from_str(&body)
        {
            debug!(%date, %message, "scraper has no data for this day");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::Feed(format!(
                "check-in fetch for {date} returned {status}"
            )));
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|err| AppError::Feed(format!("check-in payload for {date}: {err}")))
    }

    async fn ping_health(&self) -> AppResult<()> {
        let url = format!("{}/health", self.base_url);
        self.http.get(url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_url_uses_dashed_day_month_year() {
        let client = CheckinClient::new(reqwest::Client::new(), "https://scraper.test/");
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(
            client.day_url(date),
            "https://scraper.test/api/checkin/07-03-2025"
        );
    }

    #[test]
    fn trailing_slash_is_trimmed_once() {
        let client = CheckinClient::new(reqwest::Client::new(), "http://localhost:9000");
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            client.day_url(date),
            "http://localhost:9000/api/checkin/31-12-2025"
        );
    }
}

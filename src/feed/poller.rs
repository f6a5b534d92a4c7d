//! Background fetch loops
//!
//! Three long-lived tasks keep the display current: the sheet poller
//! rebuilds the rotation deck, the check-in poller refreshes the reservation
//! snapshot, and the keep-alive pinger stops the scraper's free-tier host
//! from spinning down. Every fetch cycle runs a bounded retry; a cycle that
//! still fails leaves the last good data in place, so a flaky upstream
//! degrades to a stale board instead of a blank one.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, warn};

use crate::carousel::{build_deck, CarouselEngine};
use crate::config::UpstreamConfig;
use crate::feed::retry::RetryPolicy;
use crate::feed::{CheckinApi, SheetApi};
use crate::services::display::DisplayService;

/// Pause after the first failed attempt; grows linearly per retry.
const RETRY_BASE_DELAY_MS: u64 = 1_000;

/// Today's date on the gym floor. The scraper keys documents by local day,
/// so the configured offset matters around midnight UTC.
pub fn gym_today(utc_offset_hours: i32) -> NaiveDate {
    (chrono::Utc::now() + chrono::Duration::hours(i64::from(utc_offset_hours))).date_naive()
}

fn retry_policy(cfg: &UpstreamConfig) -> RetryPolicy {
    RetryPolicy::new(cfg.fetch_retries as usize + 1, RETRY_BASE_DELAY_MS)
}

/// Poll the published sheet and swap fresh decks into the engine. The first
/// tick fires immediately so the display fills right after boot.
pub fn spawn_sheet_poller(
    sheet: Arc<dyn SheetApi>,
    engine: CarouselEngine,
    cfg: &UpstreamConfig,
    default_slide_ms: u64,
) -> JoinHandle<()> {
    let period = Duration::from_secs(cfg.sheet_refresh_secs.max(1));
    let retry = retry_policy(cfg);

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let result = retry
                .run(|attempt| {
                    let sheet = Arc::clone(&sheet);
                    async move {
                        if attempt > 0 {
                            debug!(attempt, "retrying sheet fetch");
                        }
                        sheet.rows().await
                    }
                })
                .await;

            match result {
                Ok(rows) => {
                    let deck = build_deck(&rows, default_slide_ms);
                    debug!(rows = rows.len(), slides = deck.len(), "sheet refreshed");
                    engine.set_deck(deck);
                }
                Err(err) => {
                    error!(error = %err, "sheet refresh failed, keeping current deck");
                    engine.mark_loaded();
                }
            }
        }
    })
}

/// Poll the check-in scraper for today's reservation snapshot.
pub fn spawn_checkin_poller(
    checkin: Arc<dyn CheckinApi>,
    display: Arc<DisplayService>,
    cfg: &UpstreamConfig,
    utc_offset_hours: i32,
) -> JoinHandle<()> {
    let period = Duration::from_secs(cfg.checkin_refresh_secs.max(1));
    let retry = retry_policy(cfg);

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let date = gym_today(utc_offset_hours);
            let result = retry
                .run(|attempt| {
                    let checkin = Arc::clone(&checkin);
                    async move {
                        if attempt > 0 {
                            debug!(attempt, "retrying check-in fetch");
                        }
                        checkin.day(date).await
                    }
                })
                .await;

            match result {
                Ok(day) => {
                    debug!(%date, has_data = day.is_some(), "check-in refreshed");
                    display.store_checkin(date, day);
                }
                Err(err) => {
                    error!(error = %err, "check-in refresh failed, keeping last snapshot");
                }
            }
        }
    })
}

/// Ping the scraper's health endpoint on a slow cadence so its host stays
/// warm. Failures are only worth a warning; the next ping will try again.
pub fn spawn_keep_alive(checkin: Arc<dyn CheckinApi>, cfg: &UpstreamConfig) -> JoinHandle<()> {
    let period = Duration::from_secs(cfg.keep_alive_secs.max(1));

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            match checkin.ping_health().await {
                Ok(()) => debug!("scraper keep-alive ok"),
                Err(err) => warn!(error = %err, "scraper keep-alive failed"),
            }
        }
    })
}

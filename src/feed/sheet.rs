//! Published-sheet client
//!
//! The rotation deck lives in a spreadsheet the coaches edit, published as
//! CSV. Parsing is deliberately forgiving: blank cells, junk ids and
//! durations typed as text all come through as raw rows and get normalized
//! while building the deck. A malformed row is skipped, not fatal; a body
//! that is not the sheet at all (say an HTML error page served with a 200)
//! is rejected so it cannot wipe the deck.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::models::SlideRow;

/// Read access to the published sheet.
#[async_trait]
pub trait SheetApi: Send + Sync + 'static {
    async fn rows(&self) -> AppResult<Vec<SlideRow>>;
}

#[derive(Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    url: String,
}

impl SheetClient {
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl SheetApi for SheetClient {
    async fn rows(&self) -> AppResult<Vec<SlideRow>> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Feed(format!("sheet fetch returned {status}")));
        }
        let body = response.text().await?;
        parse_rows(&body)
    }
}

/// Parse published-sheet CSV into raw slide rows.
pub fn parse_rows(csv_text: &str) -> AppResult<Vec<SlideRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    // A response without the type column is not the sheet
    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h.eq_ignore_ascii_case("type")) {
        return Err(AppError::Feed(
            "sheet response has no type column".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<SlideRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => warn!(error = %err, "skipping malformed sheet row"),
        }
    }
    Ok(rows)
}

// src/fetch.rs
use std::thread::sleep;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use tracing::{debug, error, warn};
use url::Url;

/// Form field the booking endpoint keys the lookup on.
pub const BOOKING_FIELD: &str = "BookingNumber";

// The endpoint only serves the detail page to what looks like a browser.
const SPOOFED_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.47 Safari/537.36";
const SPOOFED_REFERER: &str = "https://coeapps.eugene-or.gov/EPDDispatchLog/Search";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 2;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Build the blocking client carrying the fixed header set and an explicit
/// per-request timeout.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(SPOOFED_USER_AGENT));
    headers.insert(REFERER, HeaderValue::from_static(SPOOFED_REFERER));

    Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("building HTTP client")
}

fn post_booking(client: &Client, url: &Url, id: i64) -> Result<String> {
    debug!(%url, id, "requesting booking detail");
    client
        .post(url.clone())
        .form(&[(BOOKING_FIELD, id.to_string())])
        .send()
        .with_context(|| format!("POST {} failed", url))?
        .error_for_status()
        .with_context(|| format!("non-success status from {}", url))?
        .text()
        .with_context(|| format!("reading body from {}", url))
}

/// Fetch the booking detail page for `id`, retrying transient failures with
/// exponential backoff before surfacing the error to the caller.
pub fn fetch_booking_page(client: &Client, url: &Url, id: i64) -> Result<String> {
    let mut attempts = 0;
    loop {
        match post_booking(client, url, id) {
            Ok(body) => return Ok(body),
            Err(e) if attempts < MAX_RETRIES => {
                attempts += 1;
                let backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempts - 1);
                warn!(id, attempt = attempts, delay_ms = backoff, error = %e, "retrying");
                sleep(Duration::from_millis(backoff));
            }
            Err(e) => {
                error!(id, error = %e, "exhausted retries");
                return Err(e);
            }
        }
    }
}

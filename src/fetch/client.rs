// src/fetch/client.rs
use crate::fetch::FetchError;
use rand::Rng;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; PropertyBot/1.0; +https://example.com/bot-info)";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const POLITE_DELAY: Duration = Duration::from_secs(1);

const MAX_ATTEMPTS: u64 = 3;
const MAX_BACKOFF_SECS: u64 = 8;
const JITTER_MAX_SECS: u64 = 2;

/// Blocking HTTP client for listing pages. Owns the politeness policy:
/// declared user agent, request timeout, retry with capped backoff plus
/// jitter, and a delay after every successful fetch. The extraction core
/// never sees any of this; it only receives the final body.
pub struct ListingClient {
    client: Client,
    delay: Duration,
}

impl ListingClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_delay(POLITE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Build(e.to_string()))?;

        Ok(Self { client, delay })
    }

    /// Download one page body.
    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetch_response(url)?
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    /// Download one resource as raw bytes (image previews).
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_response(url)?
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    fn fetch_response(&self, url: &str) -> Result<Response, FetchError> {
        let mut last_err = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_fetch(url) {
                Ok(resp) => {
                    // Polite delay before the caller moves on to the next
                    // request.
                    std::thread::sleep(self.delay);
                    return Ok(resp);
                }
                Err(e) => {
                    eprintln!("⚠️ Fetch attempt {attempt} failed for {url}: {e}");
                    last_err = Some(e);

                    if attempt < MAX_ATTEMPTS {
                        let base = std::cmp::min(2 * attempt, MAX_BACKOFF_SECS);
                        let jitter = rand::thread_rng().gen_range(0..=JITTER_MAX_SECS);
                        std::thread::sleep(Duration::from_secs(base + jitter));
                    }
                }
            }
        }

        Err(last_err.unwrap_or_else(|| FetchError::Network("retry loop failed".into())))
    }

    fn try_fetch(&self, url: &str) -> Result<Response, FetchError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(format!("HTTP {status} for {url}")));
        }

        Ok(resp)
    }
}

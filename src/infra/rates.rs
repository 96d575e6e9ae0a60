#![allow(dead_code)]

//! Thin client for the exchangerate-api.com quote endpoint.
//!
//! One GET per lookup, a fixed surcharge on top of the quoted base rate, and
//! a hardcoded fallback when anything at all goes wrong. The public lookup
//! is total: a rate outage degrades the session, it never blocks it.

use std::{
    collections::HashMap,
    time::{Duration, SystemTime},
};

use reqwest::{Client, Url};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{RateQuote, RateSource};

const DEFAULT_QUOTE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT: &str = "landed-cost-calculator/0.1.0";

/// The calculator prices USD purchases in CAD; this is the key read out of
/// the quote payload.
const TARGET_CURRENCY: &str = "CAD";

/// Fixed surcharge applied to every quoted base rate.
const RATE_SURCHARGE: Decimal = dec!(1.02);

/// Base rate assumed when the quote source is unreachable.
const FALLBACK_BASE_RATE: Decimal = dec!(1.35);

#[derive(Debug, Error)]
pub enum RateClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("quote payload has no {0} rate")]
    MissingRate(&'static str),
    #[error("quote payload carried an unusable rate: {0}")]
    MalformedRate(f64),
}

/// Response shape of the quote endpoint. Anything that doesn't deserialize
/// into this counts as a failed lookup.
#[derive(Debug, Deserialize)]
struct LatestRatesDto {
    rates: HashMap<String, f64>,
}

#[derive(Clone)]
pub struct RateClient {
    http: Client,
    quote_url: Url,
}

impl RateClient {
    pub fn new() -> Result<Self, RateClientError> {
        Self::with_quote_url(DEFAULT_QUOTE_URL)
    }

    pub fn with_quote_url(url: &str) -> Result<Self, RateClientError> {
        let quote_url = Url::parse(url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, quote_url })
    }

    /// Current USD→CAD rate with the surcharge applied.
    ///
    /// Never errors: any failure (connection, status, payload shape,
    /// missing key) collapses into the fallback quote so the calculator
    /// keeps working offline.
    pub async fn get_exchange_rate(&self) -> RateQuote {
        match self.fetch_base_rate().await {
            Ok(base) => RateQuote {
                rate: base * RATE_SURCHARGE,
                source: RateSource::Live,
                fetched_at: SystemTime::now(),
            },
            Err(error) => {
                println!("[rates] Quote lookup failed: {error}; using fallback rate.");
                fallback_quote()
            }
        }
    }

    async fn fetch_base_rate(&self) -> Result<Decimal, RateClientError> {
        let response = self
            .http
            .get(self.quote_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let payload: LatestRatesDto = response.json().await?;

        let raw = payload
            .rates
            .get(TARGET_CURRENCY)
            .copied()
            .ok_or(RateClientError::MissingRate(TARGET_CURRENCY))?;
        if !raw.is_finite() || raw <= 0.0 {
            return Err(RateClientError::MalformedRate(raw));
        }
        Decimal::from_f64(raw).ok_or(RateClientError::MalformedRate(raw))
    }
}

/// The quote handed out when the remote source cannot be used, surcharge
/// included.
pub fn fallback_quote() -> RateQuote {
    RateQuote {
        rate: FALLBACK_BASE_RATE * RATE_SURCHARGE,
        source: RateSource::Fallback,
        fetched_at: SystemTime::now(),
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn fallback_rate_is_the_surcharged_constant() {
        let quote = fallback_quote();
        assert_eq!(quote.rate, dec!(1.377));
        assert_eq!(quote.source, RateSource::Fallback);
    }

    #[tokio::test]
    async fn live_rate_gets_the_surcharge() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200)
                    .json_body(json!({"base": "USD", "rates": {"CAD": 1.35, "EUR": 0.91}}));
            })
            .await;

        let client = RateClient::with_quote_url(&server.url("/v4/latest/USD")).unwrap();
        let quote = client.get_exchange_rate().await;

        mock.assert_async().await;
        assert_eq!(quote.rate, dec!(1.377));
        assert_eq!(quote.source, RateSource::Live);
    }

    #[tokio::test]
    async fn missing_target_currency_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).json_body(json!({"rates": {"EUR": 0.91}}));
            })
            .await;

        let client = RateClient::with_quote_url(&server.url("/v4/latest/USD")).unwrap();
        let quote = client.get_exchange_rate().await;

        assert_eq!(quote.rate, dec!(1.377));
        assert_eq!(quote.source, RateSource::Fallback);
    }

    #[tokio::test]
    async fn malformed_payload_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).body("not json at all");
            })
            .await;

        let client = RateClient::with_quote_url(&server.url("/v4/latest/USD")).unwrap();
        let quote = client.get_exchange_rate().await;

        assert!(quote.is_fallback());
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(500);
            })
            .await;

        let client = RateClient::with_quote_url(&server.url("/v4/latest/USD")).unwrap();
        let quote = client.get_exchange_rate().await;

        assert!(quote.is_fallback());
    }

    #[tokio::test]
    async fn unreachable_host_falls_back() {
        // Port 1 is essentially never bound; the connection is refused.
        let client = RateClient::with_quote_url("http://127.0.0.1:1/v4/latest/USD").unwrap();
        let quote = client.get_exchange_rate().await;

        assert_eq!(quote.rate, dec!(1.377));
        assert!(quote.is_fallback());
    }

    #[tokio::test]
    async fn non_positive_rate_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v4/latest/USD");
                then.status(200).json_body(json!({"rates": {"CAD": 0.0}}));
            })
            .await;

        let client = RateClient::with_quote_url(&server.url("/v4/latest/USD")).unwrap();
        let quote = client.get_exchange_rate().await;

        assert!(quote.is_fallback());
    }
}

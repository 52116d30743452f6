//! Yahoo Finance daily history over the public v8 chart REST endpoint.

use crate::{error::FetchError, period::Period, source::PriceDataSource};
use async_trait::async_trait;
use pairs_analytics::TimeSeries;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub mod chart;

/// Yahoo chart client configuration
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// API base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Yahoo rejects requests without a browser-like user agent
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) pairs-data/0.1".to_string(),
        }
    }
}

impl YahooConfig {
    /// Defaults overridden by `PAIRS_YAHOO_URL` and `PAIRS_HTTP_TIMEOUT_SECS` when set.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = match std::env::var("PAIRS_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map(Duration::from_secs).unwrap_or_else(|_| {
                warn!(%raw, "unparsable PAIRS_HTTP_TIMEOUT_SECS, using default");
                defaults.timeout
            }),
            Err(_) => defaults.timeout,
        };

        Self {
            base_url: std::env::var("PAIRS_YAHOO_URL").unwrap_or(defaults.base_url),
            timeout,
            user_agent: defaults.user_agent,
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// [`PriceDataSource`] backed by the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    config: YahooConfig,
    http: Client,
}

impl YahooClient {
    pub fn new(config: YahooConfig) -> Result<Self, FetchError> {
        Url::parse(&config.base_url)
            .map_err(|error| FetchError::Config(format!("{}: {error}", config.base_url)))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// `{base}/v8/finance/chart/{ticker}?range={period}&interval=1d&events=div,splits`
    pub fn chart_url(&self, ticker: &str, period: Period) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|error| FetchError::Config(format!("{}: {error}", self.config.base_url)))?;

        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Config(format!("{} cannot be a base URL", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);

        url.query_pairs_mut()
            .append_pair("range", period.as_str())
            .append_pair("interval", "1d")
            .append_pair("events", "div,splits");

        Ok(url)
    }
}

#[async_trait]
impl PriceDataSource for YahooClient {
    async fn fetch(&self, ticker: &str, period: Period) -> Result<TimeSeries, FetchError> {
        let url = self.chart_url(ticker, period)?;
        debug!(%ticker, %period, %url, "requesting Yahoo chart");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Unknown symbols come back as 404 with a chart error payload
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            warn!(%ticker, %status, "Yahoo chart request failed");
            return Err(FetchError::Http(format!(
                "Yahoo chart request for {ticker} failed with status {status}"
            )));
        }

        let chart = serde_json::from_str::<chart::ChartResponse>(&body)?;
        let series = chart::into_series(ticker, chart)?;

        info!(
            %ticker,
            %period,
            rows = series.len(),
            first = ?series.index().first(),
            last = ?series.index().last(),
            "fetched price history"
        );
        Ok(series)
    }
}

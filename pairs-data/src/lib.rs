//! # Pairs-Data
//! Daily price history sources feeding [`pairs_analytics`].
//!
//! Every source implements [`PriceDataSource`], returning an immutable
//! [`TimeSeries`](pairs_analytics::TimeSeries) that always carries the standard OHLCV
//! columns. Callers fetch each ticker once per analysis run and treat the result as a
//! snapshot.
//!
//! Transient failures are reported, never retried here.

/// All [`Error`](std::error::Error)s generated in Pairs-Data.
pub mod error;

/// Supported history lengths.
pub mod period;

/// [`PriceDataSource`] trait and the in-memory [`StaticSource`].
pub mod source;

/// Yahoo Finance chart API client.
pub mod yahoo;

pub use error::FetchError;
pub use period::Period;
pub use source::{PriceDataSource, StaticSource};
pub use yahoo::{YahooClient, YahooConfig};

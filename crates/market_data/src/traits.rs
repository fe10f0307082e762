use async_trait::async_trait;
use common::models::{Instrument, Quote, Timeframe};

#[cfg(test)]
use mockall::automock;

use crate::error::FetchError;

/// A market-data provider able to answer "latest bar for this cell".
///
/// Implementations perform exactly one attempt per call. Any problem, from a
/// timeout to a half-filled payload, comes back as an `Err` and never as a
/// partially populated [`Quote`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, instrument: &Instrument, timeframe: &Timeframe)
    -> Result<Quote, FetchError>;
}

pub trait RemoteResponse<T> {
    fn to_domain(&self) -> Result<T, FetchError>;
}

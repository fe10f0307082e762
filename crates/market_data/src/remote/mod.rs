pub mod time_series_response;
pub mod twelvedata_client;

pub use time_series_response::{RawPrice, TimeSeriesBar, TimeSeriesResponse};
pub use twelvedata_client::TwelveDataClient;

use common::models::Quote;
use serde::Deserialize;

use crate::error::FetchError;
use crate::traits::RemoteResponse;

/// Body of `GET /time_series`. Error payloads share the envelope and only
/// carry `status`, `code` and `message`.
#[derive(Debug, Deserialize)]
pub struct TimeSeriesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub values: Vec<TimeSeriesBar>,
}

#[derive(Debug, Deserialize)]
pub struct TimeSeriesBar {
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub close: Option<RawPrice>,
    #[serde(default)]
    pub high: Option<RawPrice>,
    #[serde(default)]
    pub low: Option<RawPrice>,
}

/// Prices normally arrive as decimal strings, occasionally as JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl RawPrice {
    fn parse(&self, field: &str) -> Result<f64, FetchError> {
        match self {
            RawPrice::Number(v) => Ok(*v),
            RawPrice::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| FetchError::MalformedQuote(format!("{field} is not a number: {s:?}"))),
        }
    }
}

impl TimeSeriesResponse {
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

fn required_price(field: &str, value: &Option<RawPrice>) -> Result<f64, FetchError> {
    value
        .as_ref()
        .ok_or_else(|| FetchError::MalformedQuote(format!("{field} is missing")))?
        .parse(field)
}

impl RemoteResponse<Quote> for TimeSeriesResponse {
    fn to_domain(&self) -> Result<Quote, FetchError> {
        if self.is_error() {
            return Err(FetchError::Provider {
                code: self.code.unwrap_or_default(),
                message: self.message.clone().unwrap_or_default(),
            });
        }

        // Series come newest first.
        let bar = self.values.first().ok_or(FetchError::EmptySeries)?;

        let close = required_price("close", &bar.close)?;
        let high = required_price("high", &bar.high)?;
        let low = required_price("low", &bar.low)?;

        Ok(Quote::new(close, high, low)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> TimeSeriesResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn latest_bar_becomes_a_rounded_quote() {
        let body = r#"{
            "meta": {"symbol": "EUR/USD", "interval": "1h", "currency_base": "Euro"},
            "values": [
                {"datetime": "2024-03-01 10:00:00", "open": "1.08", "high": "1.0855512",
                 "low": "1.0799949", "close": "1.0843217"},
                {"datetime": "2024-03-01 09:00:00", "open": "1.07", "high": "1.09",
                 "low": "1.06", "close": "1.07"}
            ],
            "status": "ok"
        }"#;

        let quote = decode(body).to_domain().unwrap();

        assert_eq!(quote.close(), 1.08432);
        assert_eq!(quote.high(), 1.08555);
        assert_eq!(quote.low(), 1.07999);
    }

    #[test]
    fn numeric_prices_are_accepted() {
        let body = r#"{"values": [{"close": 151.2, "high": 151.5, "low": 150.9}], "status": "ok"}"#;

        let quote = decode(body).to_domain().unwrap();

        assert_eq!(quote.close(), 151.2);
    }

    #[test]
    fn provider_error_payload_is_reported() {
        let body = r#"{"code": 429, "message": "You have run out of API credits", "status": "error"}"#;

        let err = decode(body).to_domain().unwrap_err();

        match err {
            FetchError::Provider { code, message } => {
                assert_eq!(code, 429);
                assert!(message.contains("API credits"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_series_is_not_a_quote() {
        let err = decode(r#"{"values": [], "status": "ok"}"#)
            .to_domain()
            .unwrap_err();
        assert!(matches!(err, FetchError::EmptySeries));

        let err = decode(r#"{"status": "ok"}"#).to_domain().unwrap_err();
        assert!(matches!(err, FetchError::EmptySeries));
    }

    #[test]
    fn partial_bar_is_rejected() {
        let missing = r#"{"values": [{"close": "1.1", "high": "1.2"}], "status": "ok"}"#;
        let err = decode(missing).to_domain().unwrap_err();
        assert!(matches!(err, FetchError::MalformedQuote(ref m) if m.contains("low")));

        let garbage = r#"{"values": [{"close": "n/a", "high": "1.2", "low": "1.0"}], "status": "ok"}"#;
        let err = decode(garbage).to_domain().unwrap_err();
        assert!(matches!(err, FetchError::MalformedQuote(ref m) if m.contains("close")));

        let infinite = r#"{"values": [{"close": "inf", "high": "1.2", "low": "1.0"}], "status": "ok"}"#;
        let err = decode(infinite).to_domain().unwrap_err();
        assert!(matches!(err, FetchError::MalformedQuote(_)));
    }
}

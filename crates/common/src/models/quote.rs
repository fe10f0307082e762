use serde::Serialize;
use thiserror::Error;

pub const PRICE_DECIMALS: i32 = 5;

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round_price(value: f64) -> f64 {
    round_to(value, PRICE_DECIMALS)
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidQuote {
    #[error("{field} price is not finite: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Latest close/high/low for one instrument at one timeframe.
///
/// Only constructible through [`Quote::new`], so every price is finite and
/// already rounded to [`PRICE_DECIMALS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    close: f64,
    high: f64,
    low: f64,
}

impl Quote {
    pub fn new(close: f64, high: f64, low: f64) -> Result<Self, InvalidQuote> {
        for (field, value) in [("close", close), ("high", high), ("low", low)] {
            if !value.is_finite() {
                return Err(InvalidQuote::NonFinite { field, value });
            }
        }

        Ok(Self {
            close: round_price(close),
            high: round_price(high),
            low: round_price(low),
        })
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }
}

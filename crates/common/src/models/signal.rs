use serde::Serialize;

use super::{Instrument, Quote, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Buy,
    Sell,
    /// No classifier was available to decide.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signal {
    pub direction: Direction,
    /// `None` when the classifier gives no probability estimate.
    pub confidence: Option<f64>,
}

impl Signal {
    pub fn unknown() -> Self {
        Self {
            direction: Direction::Unknown,
            confidence: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// One row of the signal response, flattened for the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalRecord {
    #[serde(rename = "currency_pair")]
    pub instrument: Instrument,
    #[serde(rename = "time_frame")]
    pub timeframe: Timeframe,
    #[serde(rename = "signal")]
    pub direction: Direction,
    pub price: f64,
    pub high: f64,
    pub low: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub confidence: Option<f64>,
}

impl SignalRecord {
    pub fn new(
        instrument: Instrument,
        timeframe: Timeframe,
        quote: &Quote,
        signal: Signal,
        risk: RiskLevels,
    ) -> Self {
        Self {
            instrument,
            timeframe,
            direction: signal.direction,
            price: quote.close(),
            high: quote.high(),
            low: quote.low(),
            stop_loss: risk.stop_loss,
            take_profit: risk.take_profit,
            confidence: signal.confidence,
        }
    }
}

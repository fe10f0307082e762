pub mod instrument;
pub mod quote;
pub mod signal;
pub mod timeframe;

pub use instrument::Instrument;
pub use quote::{InvalidQuote, PRICE_DECIMALS, Quote, round_price, round_to};
pub use signal::{Direction, RiskLevels, Signal, SignalRecord};
pub use timeframe::Timeframe;

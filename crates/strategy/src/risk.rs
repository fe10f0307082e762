use common::models::{Direction, RiskLevels, round_price};

const LOWER_FACTOR: f64 = 0.995;
const UPPER_FACTOR: f64 = 1.005;

/// Fixed 0.5% stop-loss / take-profit bands around the close.
///
/// `Unknown` uses the sell-side band.
pub fn compute(direction: Direction, close: f64) -> RiskLevels {
    let (stop_factor, profit_factor) = match direction {
        Direction::Buy => (LOWER_FACTOR, UPPER_FACTOR),
        Direction::Sell | Direction::Unknown => (UPPER_FACTOR, LOWER_FACTOR),
    };

    RiskLevels {
        stop_loss: round_price(close * stop_factor),
        take_profit: round_price(close * profit_factor),
    }
}

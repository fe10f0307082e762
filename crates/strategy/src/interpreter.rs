use common::models::{Direction, Signal, round_to};

use crate::inference::ClassifierOutput;

/// Label the classifier was trained to emit for an upward move.
pub const BUY_CLASS: i64 = 1;
pub const CONFIDENCE_DECIMALS: i32 = 2;

/// Turns classifier output into a direction and confidence.
///
/// `None` stands for "no classifier loaded" and yields [`Direction::Unknown`].
/// Any concrete class other than [`BUY_CLASS`] reads as a sell.
pub fn interpret(output: Option<&ClassifierOutput>) -> Signal {
    let Some(output) = output else {
        return Signal::unknown();
    };

    let direction = if output.predicted_class == BUY_CLASS {
        Direction::Buy
    } else {
        Direction::Sell
    };

    Signal {
        direction,
        confidence: output.class_probabilities.as_deref().and_then(confidence),
    }
}

fn confidence(probabilities: &[f64]) -> Option<f64> {
    probabilities
        .iter()
        .copied()
        .filter(|p| p.is_finite())
        .reduce(f64::max)
        .map(|p| round_to(p, CONFIDENCE_DECIMALS))
}

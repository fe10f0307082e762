use common::models::Quote;

/// Column order the classifier was trained with. Changing it requires a
/// retrained artifact.
pub const FEATURE_NAMES: [&str; 3] = ["close", "high", "low"];
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_quote(quote: &Quote) -> Self {
        Self([quote.close(), quote.high(), quote.low()])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|v| *v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_follow_close_high_low_order() {
        let quote = Quote::new(1.1, 1.105, 1.095).unwrap();

        let features = FeatureVector::from_quote(&quote);

        assert_eq!(features.as_slice(), &[1.1, 1.105, 1.095]);
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_NAMES, ["close", "high", "low"]);
    }

    #[test]
    fn f32_view_keeps_order() {
        let quote = Quote::new(151.234, 151.5, 150.75).unwrap();

        let values = FeatureVector::from_quote(&quote).to_f32();

        assert_eq!(values, vec![151.234_f32, 151.5_f32, 150.75_f32]);
    }
}

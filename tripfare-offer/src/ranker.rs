use crate::features::OfferFeatures;

/// Share of the relevance score driven by price.
pub const PRICE_WEIGHT: f64 = 0.5;
/// Share of the relevance score driven by journey time.
pub const DURATION_WEIGHT: f64 = 0.3;
/// Share of the relevance score driven by the number of stops.
pub const STOPS_WEIGHT: f64 = 0.2;

pub const NONSTOP_PENALTY: f64 = 0.0;
pub const ONE_STOP_PENALTY: f64 = 0.2;
pub const MULTI_STOP_PENALTY: f64 = 0.4;

/// Score given to offers whose price cannot be compared; sorts after
/// every real score.
pub const INVALID_SCORE: f64 = f64::INFINITY;

/// Fixed step penalty for layovers.
pub fn stops_penalty(stops: i64) -> f64 {
    match stops {
        0 => NONSTOP_PENALTY,
        1 => ONE_STOP_PENALTY,
        _ => MULTI_STOP_PENALTY,
    }
}

/// Relevance ("Recommended") scoring for one result set.
///
/// Price and duration are normalised against the largest finite values in
/// the set, so a ranker is only meaningful for the offers it was built from.
/// Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceRanker {
    max_price: f64,
    max_duration: f64,
}

impl RelevanceRanker {
    pub fn new(max_price: f64, max_duration: f64) -> Self {
        Self { max_price, max_duration }
    }

    /// Derive the normalisation bounds from a whole result set. A set with
    /// no usable values falls back to a bound of 1.
    pub fn for_offers(features: &[OfferFeatures]) -> Self {
        let max_price = finite_max(features.iter().map(|f| f.price));
        let max_duration = finite_max(features.iter().map(|f| f.duration_minutes as f64));
        Self::new(max_price.unwrap_or(1.0), max_duration.unwrap_or(1.0))
    }

    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    pub fn score(&self, features: &OfferFeatures) -> f64 {
        let price = features.price;
        let duration = features.duration_minutes as f64;
        if !price.is_finite() || !duration.is_finite() {
            return INVALID_SCORE;
        }

        let normalized_price = if self.max_price > 0.0 { price / self.max_price } else { 0.0 };
        let normalized_duration = if self.max_duration > 0.0 { duration / self.max_duration } else { 0.0 };

        normalized_price * PRICE_WEIGHT
            + normalized_duration * DURATION_WEIGHT
            + stops_penalty(features.stops) * STOPS_WEIGHT
    }
}

fn finite_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(price: f64, duration_minutes: u64, stops: i64) -> OfferFeatures {
        OfferFeatures { price, duration_minutes, stops }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_stops_penalty_steps() {
        assert_eq!(stops_penalty(0), 0.0);
        assert_eq!(stops_penalty(1), 0.2);
        assert_eq!(stops_penalty(2), 0.4);
        assert_eq!(stops_penalty(5), 0.4);
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert_close(PRICE_WEIGHT + DURATION_WEIGHT + STOPS_WEIGHT, 1.0);
    }

    #[test]
    fn test_worked_relevance_example() {
        let a = features(100.0, 60, 0);
        let b = features(100.0, 60, 2);
        let c = features(200.0, 120, 0);
        let ranker = RelevanceRanker::for_offers(&[a, b, c]);

        assert_eq!(ranker.max_price(), 200.0);
        assert_eq!(ranker.max_duration(), 120.0);
        assert_close(ranker.score(&a), 0.4);
        assert_close(ranker.score(&b), 0.48);
        assert_close(ranker.score(&c), 0.8);
    }

    #[test]
    fn test_bounds_ignore_non_finite_prices() {
        let ranker = RelevanceRanker::for_offers(&[
            features(f64::NAN, 30, 0),
            features(f64::INFINITY, 90, 0),
            features(80.0, 45, 0),
        ]);
        assert_eq!(ranker.max_price(), 80.0);
        assert_eq!(ranker.max_duration(), 90.0);
    }

    #[test]
    fn test_bounds_default_to_one_without_usable_values() {
        let ranker = RelevanceRanker::for_offers(&[]);
        assert_eq!(ranker.max_price(), 1.0);
        assert_eq!(ranker.max_duration(), 1.0);

        let ranker = RelevanceRanker::for_offers(&[features(f64::NAN, 0, 0)]);
        assert_eq!(ranker.max_price(), 1.0);
        assert_eq!(ranker.max_duration(), 0.0);
    }

    #[test]
    fn test_non_positive_bounds_zero_the_normalised_terms() {
        let ranker = RelevanceRanker::new(0.0, -5.0);
        assert_close(ranker.score(&features(50.0, 30, 1)), 0.2 * STOPS_WEIGHT);
    }

    #[test]
    fn test_invalid_price_scores_worst() {
        let ranker = RelevanceRanker::new(100.0, 100.0);
        assert_eq!(ranker.score(&features(f64::NAN, 10, 0)), INVALID_SCORE);
        assert_eq!(ranker.score(&features(f64::INFINITY, 10, 0)), INVALID_SCORE);
    }
}

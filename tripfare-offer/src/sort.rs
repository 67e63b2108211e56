use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};
use tripfare_core::OfferShape;

use crate::features::OfferFeatures;
use crate::ranker::RelevanceRanker;

/// Orderings offered on the results page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Weighted blend of price, duration and stops.
    #[default]
    Relevant,
    PriceAsc,
    PriceDesc,
    DurationAsc,
}

impl SortMode {
    /// Dropdown order.
    pub const ALL: [SortMode; 4] = [
        SortMode::Relevant,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::DurationAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Relevant => "relevant",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::DurationAsc => "duration_asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Relevant => "Recommended",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
            SortMode::DurationAsc => "Duration: Shortest First",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort mode: {0}")]
pub struct UnknownSortMode(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownSortMode(s.to_string()))
    }
}

/// Sort results by a mode name as sent by the results page.
///
/// Unknown names leave the order untouched and `None` yields an empty list;
/// neither is an error. The input is never modified.
pub fn sort_flights<T: OfferShape + Clone>(offers: Option<&[T]>, mode: &str) -> Vec<T> {
    let Some(offers) = offers else {
        return Vec::new();
    };

    match mode.parse::<SortMode>() {
        Ok(mode) => sort_offers(offers, Some(mode)),
        Err(err) => {
            debug!("{}, keeping original order", err);
            sort_offers(offers, None)
        }
    }
}

/// Return a reordered copy of `offers`. `None` means "no ordering" and
/// returns a plain copy. Equal keys keep their input order.
pub fn sort_offers<T: OfferShape + Clone>(offers: &[T], mode: Option<SortMode>) -> Vec<T> {
    if offers.is_empty() {
        return Vec::new();
    }
    let Some(mode) = mode else {
        return offers.to_vec();
    };

    let order = sorted_indices(offers, mode);
    order.into_iter().map(|i| offers[i].clone()).collect()
}

/// Positions of `offers` in sorted order.
pub fn sorted_indices<T: OfferShape>(offers: &[T], mode: SortMode) -> Vec<usize> {
    let features: Vec<OfferFeatures> = offers.iter().map(OfferFeatures::extract).collect();

    let (keys, descending): (Vec<f64>, bool) = match mode {
        SortMode::PriceAsc => (features.iter().map(OfferFeatures::price_or_zero).collect(), false),
        SortMode::PriceDesc => (features.iter().map(OfferFeatures::price_or_zero).collect(), true),
        SortMode::DurationAsc => (features.iter().map(|f| f.duration_minutes as f64).collect(), false),
        SortMode::Relevant => {
            let ranker = RelevanceRanker::for_offers(&features);
            let invalid = features.iter().filter(|f| !f.is_rankable()).count();
            if invalid > 0 {
                warn!(invalid, total = offers.len(), "Offers without a usable price ranked last");
            }
            (features.iter().map(|f| ranker.score(f)).collect(), false)
        }
    };

    debug!(mode = %mode, count = offers.len(), "Sorting offers");

    let mut order: Vec<usize> = (0..offers.len()).collect();
    // `sort_by` is stable: ties keep input order.
    order.sort_by(|&a, &b| {
        let ordering = compare_keys(keys[a], keys[b]);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    order
}

fn compare_keys(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tripfare_core::{OfferShape, Service};

use crate::features::OfferFeatures;
use crate::sort::{sort_offers, SortMode};

/// Layover buckets from the results sidebar. With nothing ticked every
/// offer passes; otherwise an offer passes if it falls in any ticked bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StopsFilter {
    pub nonstop: bool,
    pub one_stop: bool,
    pub two_plus: bool,
}

impl StopsFilter {
    pub fn is_empty(&self) -> bool {
        !(self.nonstop || self.one_stop || self.two_plus)
    }

    pub fn matches(&self, stops: i64) -> bool {
        self.is_empty()
            || (self.nonstop && stops == 0)
            || (self.one_stop && stops == 1)
            || (self.two_plus && stops >= 2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResultFilter {
    pub stops: StopsFilter,
    /// Airline names to keep; empty keeps all.
    pub airlines: Vec<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
}

impl ResultFilter {
    pub fn matches<T: OfferShape + ?Sized>(&self, offer: &T) -> bool {
        let features = OfferFeatures::extract(offer);

        if !self.stops.matches(features.stops) {
            return false;
        }

        if !self.airlines.is_empty() {
            let airline = offer.airline_name();
            if !self.airlines.iter().any(|a| Some(a.as_str()) == airline) {
                return false;
            }
        }

        // NaN fails both comparisons, so unpriced offers drop out once a
        // bound is set.
        let min_ok = self.min_price.map_or(true, |min| features.price >= min);
        let max_ok = self.max_price.map_or(true, |max| features.price <= max);
        min_ok && max_ok
    }
}

/// Filter then sort one page of results.
///
/// Only flight results carry stops and airlines, so every other service is
/// returned as a plain copy.
pub fn refine<T: OfferShape + Clone>(
    service: Service,
    offers: &[T],
    filter: &ResultFilter,
    mode: Option<SortMode>,
) -> Vec<T> {
    if service != Service::Flights {
        return offers.to_vec();
    }

    let kept: Vec<T> = offers.iter().filter(|o| filter.matches(*o)).cloned().collect();
    tracing::debug!(before = offers.len(), after = kept.len(), "Filtered results");

    sort_offers(&kept, mode)
}

/// Cheapest and dearest price in a result set, used for the price slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
}

impl PriceStats {
    /// Offers without a finite price are ignored; an empty set is `0..0`.
    pub fn from_offers<T: OfferShape>(offers: &[T]) -> Self {
        offers
            .iter()
            .map(|o| OfferFeatures::extract(o).price)
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<Self>, price| {
                Some(match acc {
                    None => Self { min: price, max: price },
                    Some(stats) => Self { min: stats.min.min(price), max: stats.max.max(price) },
                })
            })
            .unwrap_or_default()
    }
}

/// Airline names in the order they first appear.
pub fn distinct_airlines<T: OfferShape>(offers: &[T]) -> Vec<String> {
    let mut seen = HashSet::new();
    offers
        .iter()
        .filter_map(|o| o.airline_name())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn results() -> Vec<Value> {
        vec![
            json!({ "id": 1, "airlineName": "Emirates", "price": 640, "duration": "13h", "stops": 0 }),
            json!({ "id": 2, "airlineName": "Qatar Airways", "price": 410, "duration": "16h20m", "stops": 1 }),
            json!({ "id": 3, "airlineName": "Emirates", "price": 380, "duration": "19h", "stops": 2 }),
            json!({ "id": 4, "airlineName": "Lufthansa", "price": "N/A", "duration": "15h", "stops": 1 }),
            json!({ "id": 5, "price": { "total": "520.00" }, "itineraries": [{ "duration": "PT14H", "segments": [1, 2] }] }),
        ]
    }

    fn ids(offers: &[Value]) -> Vec<i64> {
        offers.iter().map(|o| o["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let offers = results();
        let filter = ResultFilter::default();
        assert!(offers.iter().all(|o| filter.matches(o)));
    }

    #[test]
    fn test_stop_buckets_are_ored() {
        let filter = ResultFilter {
            stops: StopsFilter { nonstop: true, two_plus: true, ..Default::default() },
            ..Default::default()
        };
        let kept = refine(Service::Flights, &results(), &filter, None);
        assert_eq!(ids(&kept), vec![1, 3]);
    }

    #[test]
    fn test_nested_offers_use_segment_stops() {
        let filter = ResultFilter {
            stops: StopsFilter { one_stop: true, ..Default::default() },
            ..Default::default()
        };
        let kept = refine(Service::Flights, &results(), &filter, None);
        assert_eq!(ids(&kept), vec![2, 4, 5]);
    }

    #[test]
    fn test_airline_filter() {
        let filter = ResultFilter { airlines: vec!["Emirates".to_string()], ..Default::default() };
        let kept = refine(Service::Flights, &results(), &filter, Some(SortMode::PriceAsc));
        assert_eq!(ids(&kept), vec![3, 1]);
    }

    #[test]
    fn test_price_bounds_are_inclusive_and_drop_unpriced() {
        let filter = ResultFilter { min_price: Some(410.0), max_price: Some(640.0), ..Default::default() };
        let kept = refine(Service::Flights, &results(), &filter, Some(SortMode::PriceDesc));
        assert_eq!(ids(&kept), vec![1, 5, 2]);
    }

    #[test]
    fn test_non_flight_services_pass_through() {
        let filter = ResultFilter { min_price: Some(10_000.0), ..Default::default() };
        let offers = results();
        let kept = refine(Service::Hotels, &offers, &filter, Some(SortMode::PriceAsc));
        assert_eq!(kept, offers);
    }

    #[test]
    fn test_filter_deserializes_from_camel_case() {
        let filter: ResultFilter = serde_json::from_value(json!({
            "stops": { "oneStop": true },
            "airlines": ["Emirates"],
            "maxPrice": 500
        }))
        .unwrap();
        assert!(filter.stops.one_stop && !filter.stops.nonstop);
        assert_eq!(filter.max_price, Some(500.0));
        assert_eq!(filter.min_price, None);
    }

    #[test]
    fn test_price_stats() {
        assert_eq!(PriceStats::from_offers(&results()), PriceStats { min: 380.0, max: 640.0 });
        assert_eq!(PriceStats::from_offers::<Value>(&[]), PriceStats { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_distinct_airlines_in_first_seen_order() {
        assert_eq!(distinct_airlines(&results()), vec!["Emirates", "Qatar Airways", "Lufthansa"]);
    }
}

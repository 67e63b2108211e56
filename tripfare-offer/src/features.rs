use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tripfare_core::{OfferShape, RawPrice};

use crate::duration::parse_duration;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid float prefix pattern")
});

/// Canonical ranking inputs for one offer, whichever payload shape it
/// arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OfferFeatures {
    /// May be NaN or infinite when the source price is garbage.
    pub price: f64,
    pub duration_minutes: u64,
    pub stops: i64,
}

impl OfferFeatures {
    pub fn extract<T: OfferShape + ?Sized>(offer: &T) -> Self {
        Self {
            price: extract_price(offer),
            duration_minutes: extract_duration(offer),
            stops: extract_stops(offer),
        }
    }

    /// Price used by the price-ordered sorts, where garbage counts as free.
    pub fn price_or_zero(&self) -> f64 {
        if self.price.is_nan() {
            0.0
        } else {
            self.price
        }
    }

    /// Whether relevance scoring can use this offer at all.
    pub fn is_rankable(&self) -> bool {
        self.price.is_finite()
    }
}

fn extract_price<T: OfferShape + ?Sized>(offer: &T) -> f64 {
    let total = offer.price_total();
    if total.is_present() {
        return coerce_price(total);
    }

    let flat = offer.price();
    if flat.is_present() {
        coerce_price(flat)
    } else {
        0.0
    }
}

fn coerce_price(raw: RawPrice<'_>) -> f64 {
    match raw {
        RawPrice::Missing => 0.0,
        RawPrice::Number(n) => n,
        RawPrice::Text(s) => parse_float_prefix(s),
        RawPrice::Flag(_) | RawPrice::Structured => f64::NAN,
    }
}

fn extract_duration<T: OfferShape + ?Sized>(offer: &T) -> u64 {
    match offer.itinerary_duration().filter(|d| !d.is_empty()) {
        Some(duration) => parse_duration(Some(duration)),
        None => parse_duration(offer.duration()),
    }
}

fn extract_stops<T: OfferShape + ?Sized>(offer: &T) -> i64 {
    match offer.segment_count() {
        Some(segments) if segments > 0 => segments as i64 - 1,
        _ => offer.stops().unwrap_or(0),
    }
}

/// Lenient float parse: reads the longest numeric prefix after leading
/// whitespace (`"150.5 USD"` is 150.5) and yields NaN when there is none.
pub fn parse_float_prefix(text: &str) -> f64 {
    FLOAT_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

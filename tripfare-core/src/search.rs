use serde::{Deserialize, Serialize};

/// Product lines searchable from the booking widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    #[default]
    Flights,
    Hotels,
    Cabs,
    Cruises,
    Insurance,
    Buses,
    Packages,
}

impl Service {
    pub fn label(self) -> &'static str {
        match self {
            Service::Flights => "Flights",
            Service::Hotels => "Hotels",
            Service::Cabs => "Car Rental",
            Service::Cruises => "Cruises",
            Service::Insurance => "Insurance",
            Service::Buses => "Bus",
            Service::Packages => "Packages",
        }
    }
}

/// Borrowed view of a price-like field before any numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawPrice<'a> {
    Missing,
    Number(f64),
    Text(&'a str),
    Flag(bool),
    /// Arrays, objects and anything else that is not a scalar.
    Structured,
}

impl<'a> RawPrice<'a> {
    pub fn from_value(value: Option<&'a serde_json::Value>) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => RawPrice::Missing,
            Some(serde_json::Value::Number(n)) => n.as_f64().map_or(RawPrice::Structured, RawPrice::Number),
            Some(serde_json::Value::String(s)) => RawPrice::Text(s),
            Some(serde_json::Value::Bool(b)) => RawPrice::Flag(*b),
            Some(_) => RawPrice::Structured,
        }
    }

    /// Whether the value would count as "present" in a loosely typed payload
    /// (non-zero number, non-empty string, `true`, or any structure).
    pub fn is_present(&self) -> bool {
        match self {
            RawPrice::Missing => false,
            RawPrice::Number(n) => *n != 0.0 && !n.is_nan(),
            RawPrice::Text(s) => !s.is_empty(),
            RawPrice::Flag(b) => *b,
            RawPrice::Structured => true,
        }
    }
}

/// Read access to the fields the ranker cares about, regardless of which
/// payload shape carried them.
pub trait OfferShape {
    /// `price.total` of the nested shape.
    fn price_total(&self) -> RawPrice<'_>;
    /// The top-level `price` field, whatever its type.
    fn price(&self) -> RawPrice<'_>;
    /// `itineraries[0].duration`.
    fn itinerary_duration(&self) -> Option<&str>;
    fn duration(&self) -> Option<&str>;
    /// Number of entries in `itineraries[0].segments`.
    fn segment_count(&self) -> Option<usize>;
    fn stops(&self) -> Option<i64>;
    fn airline_name(&self) -> Option<&str>;
}

/// Offers are ranked as untyped JSON so that both payload shapes, and any
/// fields the ranker does not read, survive the results pipeline untouched.
impl OfferShape for serde_json::Value {
    fn price_total(&self) -> RawPrice<'_> {
        RawPrice::from_value(self.get("price").and_then(|p| p.get("total")))
    }

    fn price(&self) -> RawPrice<'_> {
        RawPrice::from_value(self.get("price"))
    }

    fn itinerary_duration(&self) -> Option<&str> {
        first_itinerary(self)?.get("duration")?.as_str()
    }

    fn duration(&self) -> Option<&str> {
        self.get("duration")?.as_str()
    }

    fn segment_count(&self) -> Option<usize> {
        first_itinerary(self)?.get("segments")?.as_array().map(Vec::len)
    }

    fn stops(&self) -> Option<i64> {
        let stops = self.get("stops")?;
        stops.as_i64().or_else(|| {
            stops
                .as_f64()
                .filter(|s| s.fract() == 0.0 && s.is_finite())
                .map(|s| s as i64)
        })
    }

    fn airline_name(&self) -> Option<&str> {
        self.get("airlineName")?.as_str()
    }
}

fn first_itinerary(value: &serde_json::Value) -> Option<&serde_json::Value> {
    value.get("itineraries")?.as_array()?.first()
}

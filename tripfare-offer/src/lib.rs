pub mod display;
pub mod duration;
pub mod features;
pub mod filter;
pub mod ranker;
pub mod sort;

pub use display::{format_duration_label, stops_label};
pub use duration::parse_duration;
pub use features::OfferFeatures;
pub use filter::{distinct_airlines, refine, PriceStats, ResultFilter, StopsFilter};
pub use ranker::RelevanceRanker;
pub use sort::{sort_flights, sort_offers, SortMode, UnknownSortMode};

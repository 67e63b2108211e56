use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tripfare_core::{Currency, OfferShape, Service};
use tripfare_offer::{
    distinct_airlines, format_duration_label, refine, stops_label, OfferFeatures, PriceStats, ResultFilter, SortMode,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ResultsRequest {
    /// Offers in either the flat or the itinerary shape; echoed back untouched.
    #[serde(default)]
    pub offers: Vec<Value>,
    pub sort: Option<String>,
    #[serde(default)]
    pub service: Service,
    #[serde(default)]
    pub filter: ResultFilter,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub response_id: Uuid,
    pub ranked_at: DateTime<Utc>,
    pub service: Service,
    pub service_label: &'static str,
    pub sort: String,
    pub currency: Currency,
    pub total: usize,
    pub results: Vec<Value>,
    /// Card labels for `results`, index for index.
    pub labels: Vec<OfferLabels>,
    pub airlines: Vec<String>,
    pub price_stats: PriceStatsResponse,
}

#[derive(Debug, Serialize)]
pub struct OfferLabels {
    pub price: String,
    pub duration: String,
    pub stops: String,
}

impl OfferLabels {
    fn new(offer: &Value, currency: Currency) -> Self {
        let features = OfferFeatures::extract(offer);
        Self {
            price: currency.format_price(features.price),
            duration: format_duration_label(
                offer.itinerary_duration().filter(|d| !d.is_empty()).or(offer.duration()),
            ),
            stops: stops_label(features.stops),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceStatsResponse {
    pub min: f64,
    pub max: f64,
    pub min_label: String,
    pub max_label: String,
}

impl PriceStatsResponse {
    fn new(stats: PriceStats, currency: Currency) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            min_label: currency.format_price(stats.min),
            max_label: currency.format_price(stats.max),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SortOptionResponse {
    pub value: SortMode,
    pub label: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/results", post(rank_results))
        .route("/v1/results/sort-options", get(sort_options))
}

/// POST /v1/results
/// Filter, sort and summarise one page of search results
pub async fn rank_results(
    State(state): State<AppState>,
    payload: Result<Json<ResultsRequest>, JsonRejection>,
) -> Result<Json<ResultsResponse>, AppError> {
    let Json(req) = payload?;

    let currency = req
        .currency
        .as_deref()
        .map(str::parse::<Currency>)
        .transpose()?
        .unwrap_or(state.results.default_currency);

    let sort = req.sort.unwrap_or_else(|| state.results.default_sort.to_string());
    let mode = match sort.parse::<SortMode>() {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::debug!("{}, returning results unsorted", err);
            None
        }
    };

    let results = refine(req.service, &req.offers, &req.filter, mode);
    tracing::info!(
        service = ?req.service,
        sort = %sort,
        received = req.offers.len(),
        returned = results.len(),
        "Ranked results"
    );

    let labels = results.iter().map(|offer| OfferLabels::new(offer, currency)).collect();

    Ok(Json(ResultsResponse {
        response_id: Uuid::new_v4(),
        ranked_at: Utc::now(),
        service: req.service,
        service_label: req.service.label(),
        sort,
        currency,
        total: results.len(),
        labels,
        airlines: distinct_airlines(&req.offers),
        price_stats: PriceStatsResponse::new(PriceStats::from_offers(&req.offers), currency),
        results,
    }))
}

/// GET /v1/results/sort-options
pub async fn sort_options() -> Json<Vec<SortOptionResponse>> {
    Json(
        SortMode::ALL
            .into_iter()
            .map(|mode| SortOptionResponse { value: mode, label: mode.label() })
            .collect(),
    )
}

use std::sync::Arc;

use chrono::NaiveDate;
use fareday_core::{AirportDistanceTable, AirportEncoder, PriceModel};
use fareday_store::Artifacts;

/// Source of the reference "today" for validation and the search window.
pub type TodayFn = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub distances: Arc<AirportDistanceTable>,
    pub departure_encoder: Arc<dyn AirportEncoder>,
    pub arrival_encoder: Arc<dyn AirportEncoder>,
    pub model: Arc<dyn PriceModel>,
    pub today: TodayFn,
    /// Requests further ahead than this are rejected before the search.
    pub max_horizon_days: i64,
}

impl AppState {
    /// State backed by loaded artifacts and the local calendar date.
    pub fn from_artifacts(artifacts: Artifacts, max_horizon_days: i64) -> Self {
        Self {
            distances: Arc::new(artifacts.distances),
            departure_encoder: Arc::new(artifacts.departure_encoder),
            arrival_encoder: Arc::new(artifacts.arrival_encoder),
            model: Arc::new(artifacts.model),
            today: Arc::new(|| chrono::Local::now().date_naive()),
            max_horizon_days,
        }
    }
}

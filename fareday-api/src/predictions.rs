use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fareday_core::CoreError;
use fareday_forecast::{find_best_purchase_day, ContextBuilder, PredictionRequest};
use fareday_shared::models::events::PredictionIssuedEvent;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct BestDayResponse {
    pub request_id: Uuid,
    /// Model output for buying today.
    pub current_prediction: f64,
    pub predicted_price: Option<f64>,
    /// DD-MM-YYYY
    pub best_purchase_date: Option<String>,
    pub best_days_ago: Option<i64>,
    pub candidates_scored: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AirportsResponse {
    pub departure: Vec<String>,
    pub arrival: Vec<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/predictions/best-day", post(best_day))
        .route("/v1/airports", get(list_airports))
}

/// Validate, build the context, and run the best-day search.
pub fn predict(state: &AppState, req: &PredictionRequest) -> Result<BestDayResponse, AppError> {
    let today = (state.today)();
    let builder = ContextBuilder::new(
        state.departure_encoder.as_ref(),
        state.arrival_encoder.as_ref(),
        state.distances.as_ref(),
    )
    .with_max_horizon(state.max_horizon_days);
    let (features, ctx) = builder.build(req, today).map_err(AppError::Validation)?;

    let current_prediction = state.model.predict(&features).map_err(inference_error)?;
    let outcome = find_best_purchase_day(&ctx, state.model.as_ref()).map_err(inference_error)?;

    let request_id = Uuid::new_v4();
    let event = PredictionIssuedEvent {
        request_id,
        timestamp: Utc::now().timestamp(),
        departure_airport: req.departure_airport.trim().to_string(),
        arrival_airport: req.arrival_airport.trim().to_string(),
        departure_date: ctx.flight_date,
        candidates_scored: outcome.candidates_scored,
        best_days_ago: outcome.best.as_ref().map(|b| b.days_ago),
        predicted_price: outcome.best.as_ref().map(|b| b.predicted_price),
    };
    tracing::info!(
        event = %serde_json::to_string(&event).unwrap_or_default(),
        "PredictionIssued"
    );

    Ok(BestDayResponse {
        request_id,
        current_prediction,
        predicted_price: outcome.best.as_ref().map(|b| b.predicted_price),
        best_purchase_date: outcome.best.as_ref().map(|b| b.formatted_date()),
        best_days_ago: outcome.best.as_ref().map(|b| b.days_ago),
        candidates_scored: outcome.candidates_scored,
    })
}

fn inference_error(err: CoreError) -> AppError {
    AppError::InternalServerError(err.to_string())
}

/// Run [`predict`] on the blocking pool. The search calls the model once per
/// candidate day, which must not stall the async workers.
pub async fn predict_blocking(state: AppState, req: PredictionRequest) -> Result<BestDayResponse, AppError> {
    tokio::task::spawn_blocking(move || predict(&state, &req))
        .await
        .map_err(|err| AppError::InternalServerError(format!("prediction task failed: {}", err)))?
}

/// POST /v1/predictions/best-day
pub async fn best_day(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> Result<Json<BestDayResponse>, AppError> {
    predict_blocking(state, req).await.map(Json)
}

/// GET /v1/airports
pub async fn list_airports(State(state): State<AppState>) -> Json<AirportsResponse> {
    Json(AirportsResponse {
        departure: state.departure_encoder.classes().to_vec(),
        arrival: state.arrival_encoder.classes().to_vec(),
    })
}

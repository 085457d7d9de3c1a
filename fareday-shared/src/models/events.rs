use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PredictionIssuedEvent {
    pub request_id: Uuid,
    pub timestamp: i64,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_date: chrono::NaiveDate,
    pub candidates_scored: usize,
    pub best_days_ago: Option<i64>,
    pub predicted_price: Option<f64>,
}

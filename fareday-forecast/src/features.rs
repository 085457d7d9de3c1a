use chrono::{Datelike, NaiveDate};
use fareday_core::{AirportDistanceTable, AirportEncoder, FeatureVector, ValidationError};
use fareday_shared::HolidayProximity;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw prediction request as typed into the form or posted as JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PredictionRequest {
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    pub departure_airport: String,
    pub arrival_airport: String,
    /// YYYY-MM-DD
    pub departure_date: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub near_holiday: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(f64),
    Null,
    Other(IgnoredAny),
}

/// Strings and numbers pass through as text. `null`, booleans and anything
/// else become the empty string, which the parsers downstream reject or
/// treat as "unknown".
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match StringOrNumber::deserialize(d)? {
        StringOrNumber::Text(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
        StringOrNumber::Null | StringOrNumber::Other(_) => String::new(),
    })
}

/// Resolved, encoded values for one request. Shared read-only by every
/// candidate of the best-day search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionContext {
    pub price: f64,
    pub distance_km: u32,
    pub holiday: HolidayProximity,
    pub departure_airport_code: i64,
    pub arrival_airport_code: i64,
    pub flight_date: NaiveDate,
    pub today: NaiveDate,
}

impl PredictionContext {
    pub fn days_until_flight(&self) -> i64 {
        self.flight_date.signed_duration_since(self.today).num_days()
    }

    /// Weekday of the flight itself (0 = Monday), independent of purchase date.
    pub fn departure_weekday(&self) -> u32 {
        self.flight_date.weekday().num_days_from_monday()
    }

    /// Feature vector for buying on `purchase_date`. Only `daysAgo` depends
    /// on the purchase date.
    pub fn feature_vector(&self, purchase_date: NaiveDate) -> FeatureVector {
        FeatureVector {
            price: self.price,
            distance_km: self.distance_km as f64,
            holiday: self.holiday.one_hot(),
            departure_airport: self.departure_airport_code,
            arrival_airport: self.arrival_airport_code,
            days_ago: self.flight_date.signed_duration_since(purchase_date).num_days(),
            departure_weekday: self.departure_weekday(),
        }
    }
}

/// Validates raw requests against the loaded reference data and turns them
/// into feature vectors.
pub struct ContextBuilder<'a> {
    departure_encoder: &'a dyn AirportEncoder,
    arrival_encoder: &'a dyn AirportEncoder,
    distances: &'a AirportDistanceTable,
    max_horizon_days: Option<i64>,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(
        departure_encoder: &'a dyn AirportEncoder,
        arrival_encoder: &'a dyn AirportEncoder,
        distances: &'a AirportDistanceTable,
    ) -> Self {
        Self {
            departure_encoder,
            arrival_encoder,
            distances,
            max_horizon_days: None,
        }
    }

    /// Reject flights more than `days` ahead. The search scores one
    /// candidate per day, so this bounds the work per request.
    pub fn with_max_horizon(mut self, days: i64) -> Self {
        self.max_horizon_days = Some(days);
        self
    }

    /// Build the feature vector for buying today plus the reusable context.
    pub fn build(
        &self,
        req: &PredictionRequest,
        today: NaiveDate,
    ) -> Result<(FeatureVector, PredictionContext), ValidationError> {
        let dep = req.departure_airport.trim();
        let arr = req.arrival_airport.trim();

        // 1. Airports
        if dep == arr {
            return Err(ValidationError::SameAirport);
        }
        if !self.departure_encoder.contains(dep) {
            return Err(ValidationError::UnknownAirport(dep.to_string()));
        }
        if !self.arrival_encoder.contains(arr) {
            return Err(ValidationError::UnknownAirport(arr.to_string()));
        }

        // 2. Date
        let flight_date = parse_date(&req.departure_date)?;
        if flight_date <= today {
            return Err(ValidationError::PastDate);
        }
        if let Some(max) = self.max_horizon_days {
            if flight_date.signed_duration_since(today).num_days() > max {
                return Err(ValidationError::BeyondHorizon(max));
            }
        }

        let price = parse_price(&req.price)?;

        // 3. Distance
        let distance_km = self
            .distances
            .distance(dep, arr)
            .ok_or_else(|| ValidationError::NoDistanceData(dep.to_string(), arr.to_string()))?;

        // 4. Encode
        let departure_airport_code = self
            .departure_encoder
            .encode(dep)
            .map_err(|_| ValidationError::UnknownAirport(dep.to_string()))?;
        let arrival_airport_code = self
            .arrival_encoder
            .encode(arr)
            .map_err(|_| ValidationError::UnknownAirport(arr.to_string()))?;

        let context = PredictionContext {
            price,
            distance_km,
            holiday: HolidayProximity::from_flag(&req.near_holiday),
            departure_airport_code,
            arrival_airport_code,
            flight_date,
            today,
        };

        Ok((context.feature_vector(today), context))
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

fn parse_price(s: &str) -> Result<f64, ValidationError> {
    match s.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => Err(ValidationError::InvalidPrice(s.to_string())),
    }
}

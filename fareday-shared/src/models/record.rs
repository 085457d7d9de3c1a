use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::holiday::HolidayProximity;

/// One scraped price-history point, enriched with holiday context.
///
/// Column names match the training data set, hence the mixed casing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPriceRecord {
    #[serde(rename = "daysAgo")]
    pub days_ago: i64,
    #[serde(rename = "departureDate")]
    pub departure_date: NaiveDate,
    pub price: i64,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub is_public_holiday: bool,
    pub is_school_holiday: bool,
    pub airline: String,
    pub near_holiday: HolidayProximity,
    pub record_timestamp: NaiveDate,
}

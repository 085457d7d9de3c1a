use serde::Serialize;

pub const FEATURE_COUNT: usize = 9;

/// Column order the price model was trained on. Never reorder.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "price",
    "airport_distance_km",
    "near_holiday_-1.0",
    "near_holiday_0.0",
    "near_holiday_1.0",
    "departure_airport",
    "arrival_airport",
    "daysAgo",
    "departure_weekday",
];

/// Model input for one (flight, purchase date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub price: f64,
    pub distance_km: f64,
    /// One-hot `[before, on, after]` holiday flags.
    pub holiday: [f64; 3],
    pub departure_airport: i64,
    pub arrival_airport: i64,
    pub days_ago: i64,
    /// 0 = Monday.
    pub departure_weekday: u32,
}

impl FeatureVector {
    /// Same vector with only `daysAgo` replaced.
    pub fn with_days_ago(&self, days_ago: i64) -> Self {
        Self { days_ago, ..*self }
    }

    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.price,
            self.distance_km,
            self.holiday[0],
            self.holiday[1],
            self.holiday[2],
            self.departure_airport as f64,
            self.arrival_airport as f64,
            self.days_ago as f64,
            self.departure_weekday as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_order() {
        let fv = FeatureVector {
            price: 300.0,
            distance_km: 1750.0,
            holiday: [0.0, 1.0, 0.0],
            departure_airport: 4,
            arrival_airport: 2,
            days_ago: 5,
            departure_weekday: 1,
        };
        assert_eq!(
            fv.to_array(),
            [300.0, 1750.0, 0.0, 1.0, 0.0, 4.0, 2.0, 5.0, 1.0]
        );
        assert_eq!(fv.with_days_ago(3).to_array()[7], 3.0);
        assert_eq!(fv.with_days_ago(3).departure_weekday, 1);
    }
}

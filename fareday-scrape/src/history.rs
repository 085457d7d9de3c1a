//! Turning price-history chart points into training records.

use chrono::{Days, NaiveDate};
use fareday_shared::FlightPriceRecord;
use rand::Rng;
use serde::Deserialize;

use crate::holidays::HolidayCalendar;

/// A single point of the price-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPoint {
    /// Days before the scrape day the price was observed.
    pub history_days_ago: i64,
    pub price: i64,
}

/// Flight the history chart belongs to, as read from the search page.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedFlight {
    #[serde(rename = "departureDate")]
    pub departure_date: NaiveDate,
    pub departure_airport: String,
    pub arrival_airport: String,
}

/// One raw chart point as saved by the scraper: the flight it belongs to
/// plus the point's label text, e.g. `12 days ago €87`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartPointRow {
    #[serde(rename = "departureDate")]
    pub departure_date: NaiveDate,
    pub departure_airport: String,
    pub arrival_airport: String,
    pub label: String,
}

impl ChartPointRow {
    pub fn flight(&self) -> ScrapedFlight {
        ScrapedFlight {
            departure_date: self.departure_date,
            departure_airport: self.departure_airport.clone(),
            arrival_airport: self.arrival_airport.clone(),
        }
    }
}

/// First run of ASCII digits in `text`, or 0.
pub fn extract_number(text: &str) -> i64 {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Parse a chart point label such as `"23 days ago €412"` or `"Today €87"`.
///
/// The leading token is the age in days (`Today` or anything non-numeric is
/// 0). The price is the first number in the last token; a one-word label
/// has no price and yields 0. Digit grouping is not understood: `€1,204`
/// stops at the separator and reads as 1.
pub fn parse_history_label(label: &str) -> HistoryPoint {
    let parts: Vec<&str> = label.split(' ').collect();

    let history_days_ago = match parts.first() {
        Some(first) if !first.is_empty() && first.bytes().all(|b| b.is_ascii_digit()) => {
            first.parse().unwrap_or(0)
        }
        _ => 0,
    };

    let price = if parts.len() > 1 {
        parts.last().map(|p| extract_number(p)).unwrap_or(0)
    } else {
        0
    };

    HistoryPoint {
        history_days_ago,
        price,
    }
}

pub const AIRLINES: [(&str, f64); 3] = [
    ("Delta", 0.6),
    ("Republic American", 0.3),
    ("Other", 0.1),
];

/// Weighted pick from `AIRLINES`.
pub fn pick_airline<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    let total: f64 = AIRLINES.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen::<f64>() * total;
    for (name, weight) in AIRLINES {
        if roll < weight {
            return name;
        }
        roll -= weight;
    }
    AIRLINES[AIRLINES.len() - 1].0
}

/// Assembles records for one scrape run.
pub struct RecordBuilder<'a, R: Rng> {
    calendar: &'a HolidayCalendar,
    scrape_day: NaiveDate,
    rng: R,
}

impl<'a, R: Rng> RecordBuilder<'a, R> {
    pub fn new(calendar: &'a HolidayCalendar, scrape_day: NaiveDate, rng: R) -> Self {
        Self {
            calendar,
            scrape_day,
            rng,
        }
    }

    /// Absolute `daysAgo` is the distance from the scrape day to departure
    /// plus the age of the chart point.
    pub fn build(&mut self, flight: &ScrapedFlight, point: HistoryPoint) -> FlightPriceRecord {
        let days_ago = flight
            .departure_date
            .signed_duration_since(self.scrape_day)
            .num_days()
            .abs()
            + point.history_days_ago;
        let record_timestamp = flight
            .departure_date
            .checked_sub_days(Days::new(days_ago as u64))
            .unwrap_or(NaiveDate::MIN);

        FlightPriceRecord {
            days_ago,
            departure_date: flight.departure_date,
            price: point.price,
            departure_airport: flight.departure_airport.clone(),
            arrival_airport: flight.arrival_airport.clone(),
            is_public_holiday: self.calendar.is_public_holiday(flight.departure_date),
            is_school_holiday: self.calendar.is_school_holiday(flight.departure_date),
            airline: pick_airline(&mut self.rng).to_string(),
            near_holiday: self.calendar.near_holiday_status(flight.departure_date),
            record_timestamp,
        }
    }

    /// Build one record per raw chart point, in input order.
    pub fn annotate<I>(&mut self, rows: I) -> Vec<FlightPriceRecord>
    where
        I: IntoIterator<Item = ChartPointRow>,
    {
        rows.into_iter()
            .map(|row| self.build(&row.flight(), parse_history_label(&row.label)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::HolidayEntry;
    use fareday_shared::HolidayProximity;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_extract_number() {
        assert_eq!(extract_number("€1204"), 1204);
        assert_eq!(extract_number("BGN87.50"), 87);
        assert_eq!(extract_number("N/A"), 0);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!(
            parse_history_label("23 days ago €412"),
            HistoryPoint { history_days_ago: 23, price: 412 }
        );
        assert_eq!(
            parse_history_label("Today €87"),
            HistoryPoint { history_days_ago: 0, price: 87 }
        );
        assert_eq!(
            parse_history_label("Yesterday-ish €90"),
            HistoryPoint { history_days_ago: 0, price: 90 }
        );
        assert_eq!(
            parse_history_label("Today"),
            HistoryPoint { history_days_ago: 0, price: 0 }
        );
    }

    #[test]
    fn test_grouped_price_stops_at_separator() {
        assert_eq!(
            parse_history_label("23 days ago €1,204"),
            HistoryPoint { history_days_ago: 23, price: 1 }
        );
    }

    #[test]
    fn test_airline_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut delta = 0;
        for _ in 0..10_000 {
            let a = pick_airline(&mut rng);
            assert!(AIRLINES.iter().any(|(n, _)| *n == a));
            if a == "Delta" {
                delta += 1;
            }
        }
        assert!((5_500..6_500).contains(&delta), "delta picked {} times", delta);
    }

    #[test]
    fn test_record_assembly() {
        let public = vec![HolidayEntry { start_date: d(2025, 4, 21), end_date: d(2025, 4, 21) }];
        let cal = HolidayCalendar::new(&public, &[], 7);
        let mut builder = RecordBuilder::new(&cal, d(2025, 4, 1), StdRng::seed_from_u64(1));

        let flight = ScrapedFlight {
            departure_date: d(2025, 4, 20),
            departure_airport: "Eindhoven".to_string(),
            arrival_airport: "Sofia".to_string(),
        };
        let record = builder.build(&flight, parse_history_label("10 days ago €120"));

        assert_eq!(record.days_ago, 29);
        assert_eq!(record.record_timestamp, d(2025, 3, 22));
        assert_eq!(record.price, 120);
        assert!(!record.is_public_holiday);
        assert_eq!(record.near_holiday, HolidayProximity::Before);
    }

    #[test]
    fn test_annotate_csv_rows() {
        let csv = "\
departureDate,departure_airport,arrival_airport,label
2025-04-20,Eindhoven,Sofia,10 days ago €120
2025-04-21,Sofia,Eindhoven,Today €87
";
        let rows: Vec<ChartPointRow> = fareday_store::records::read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let public = vec![HolidayEntry { start_date: d(2025, 4, 21), end_date: d(2025, 4, 21) }];
        let cal = HolidayCalendar::new(&public, &[], 7);
        let mut builder = RecordBuilder::new(&cal, d(2025, 4, 1), StdRng::seed_from_u64(3));
        let records = builder.annotate(rows);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].departure_airport, "Eindhoven");
        assert_eq!(records[0].days_ago, 29);
        assert_eq!(records[0].price, 120);
        assert_eq!(records[0].near_holiday, HolidayProximity::Before);

        assert_eq!(records[1].departure_date, d(2025, 4, 21));
        assert_eq!(records[1].days_ago, 20);
        assert_eq!(records[1].record_timestamp, d(2025, 4, 1));
        assert_eq!(records[1].price, 87);
        assert!(records[1].is_public_holiday);
        assert_eq!(records[1].near_holiday, HolidayProximity::On);
        assert!(records.iter().all(|r| AIRLINES.iter().any(|(n, _)| *n == r.airline)));
    }
}

pub mod history;
pub mod holidays;

pub use history::{parse_history_label, ChartPointRow, HistoryPoint, RecordBuilder, ScrapedFlight};
pub use holidays::{HolidayCalendar, HolidayEntry, HolidaySource, OpenHolidaysClient};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Holiday request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid holiday payload: {0}")]
    Payload(#[from] serde_json::Error),
}

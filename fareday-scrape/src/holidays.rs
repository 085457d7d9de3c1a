//! Public and school holiday calendar used to tag scraped flights.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use fareday_shared::HolidayProximity;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{info, warn};

use crate::ScrapeError;

/// One holiday period as returned by the OpenHolidays API. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl HolidayEntry {
    /// Every date from start to end, inclusive.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take_while(move |d| *d <= self.end_date)
    }

    /// Parse a saved API response body.
    pub fn parse_list(json: &str) -> Result<Vec<HolidayEntry>, ScrapeError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetch holiday periods from `url`. A non-success response yields an
    /// empty list rather than an error.
    async fn fetch(&self, url: &str) -> Result<Vec<HolidayEntry>, ScrapeError>;
}

pub struct OpenHolidaysClient {
    client: reqwest::Client,
}

impl OpenHolidaysClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OpenHolidaysClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HolidaySource for OpenHolidaysClient {
    async fn fetch(&self, url: &str) -> Result<Vec<HolidayEntry>, ScrapeError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        entries_for_response(url, status, &body)
    }
}

/// Decode a holiday API response. A non-success status is logged and
/// treated as "no holidays" so one failing endpoint does not stop a run.
pub fn entries_for_response(
    url: &str,
    status: StatusCode,
    body: &str,
) -> Result<Vec<HolidayEntry>, ScrapeError> {
    if !status.is_success() {
        warn!(status = %status, url, "Failed to fetch holidays");
        return Ok(Vec::new());
    }
    HolidayEntry::parse_list(body)
}

/// Immutable set of holiday dates, split by kind.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    public: BTreeSet<NaiveDate>,
    school: BTreeSet<NaiveDate>,
    all: BTreeSet<NaiveDate>,
    window_days: u64,
}

impl HolidayCalendar {
    pub fn new(public: &[HolidayEntry], school: &[HolidayEntry], window_days: u64) -> Self {
        let public: BTreeSet<_> = public.iter().flat_map(|e| e.dates()).collect();
        let school: BTreeSet<_> = school.iter().flat_map(|e| e.dates()).collect();
        let all = public.union(&school).copied().collect();
        Self {
            public,
            school,
            all,
            window_days,
        }
    }

    /// Fetch both holiday lists and build the calendar.
    pub async fn preload(
        source: &dyn HolidaySource,
        public_url: &str,
        school_url: &str,
        window_days: u64,
    ) -> Result<Self, ScrapeError> {
        info!("Fetching holidays...");
        let public = source.fetch(public_url).await?;
        let school = source.fetch(school_url).await?;
        let calendar = Self::new(&public, &school, window_days);
        info!(
            public_days = calendar.public.len(),
            school_days = calendar.school.len(),
            "Public and school holidays loaded"
        );
        Ok(calendar)
    }

    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        self.public.contains(&date)
    }

    pub fn is_school_holiday(&self, date: NaiveDate) -> bool {
        self.school.contains(&date)
    }

    /// Where `date` sits relative to the nearest holiday window.
    ///
    /// A date that is itself a holiday is `On`. Otherwise the earliest
    /// holiday within the window decides: a holiday up to `window_days`
    /// before the date gives `After`, one up to `window_days` ahead gives
    /// `Before`.
    pub fn near_holiday_status(&self, date: NaiveDate) -> HolidayProximity {
        if self.all.contains(&date) {
            return HolidayProximity::On;
        }
        let window = Days::new(self.window_days);
        let from = date.checked_sub_days(window).unwrap_or(NaiveDate::MIN);
        let to = date.checked_add_days(window).unwrap_or(NaiveDate::MAX);

        match self.all.range(from..=to).next() {
            Some(h) if *h < date => HolidayProximity::After,
            Some(_) => HolidayProximity::Before,
            None => HolidayProximity::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn calendar() -> HolidayCalendar {
        let public = vec![HolidayEntry { start_date: d(2025, 5, 1), end_date: d(2025, 5, 1) }];
        let school = vec![HolidayEntry { start_date: d(2025, 7, 12), end_date: d(2025, 7, 14) }];
        HolidayCalendar::new(&public, &school, 7)
    }

    #[test]
    fn test_entry_expands_inclusive_range() {
        let e = HolidayEntry { start_date: d(2025, 2, 27), end_date: d(2025, 3, 2) };
        let dates: Vec<_> = e.dates().collect();
        assert_eq!(dates, vec![d(2025, 2, 27), d(2025, 2, 28), d(2025, 3, 1), d(2025, 3, 2)]);
    }

    #[test]
    fn test_holiday_kinds() {
        let cal = calendar();
        assert!(cal.is_public_holiday(d(2025, 5, 1)));
        assert!(!cal.is_school_holiday(d(2025, 5, 1)));
        assert!(cal.is_school_holiday(d(2025, 7, 13)));
    }

    #[test]
    fn test_near_holiday_windows() {
        let cal = calendar();
        assert_eq!(cal.near_holiday_status(d(2025, 5, 1)), HolidayProximity::On);
        assert_eq!(cal.near_holiday_status(d(2025, 4, 24)), HolidayProximity::Before);
        assert_eq!(cal.near_holiday_status(d(2025, 4, 23)), HolidayProximity::Unknown);
        assert_eq!(cal.near_holiday_status(d(2025, 5, 8)), HolidayProximity::After);
        assert_eq!(cal.near_holiday_status(d(2025, 5, 9)), HolidayProximity::Unknown);
        assert_eq!(cal.near_holiday_status(d(2025, 7, 14)), HolidayProximity::On);
    }

    #[test]
    fn test_earliest_holiday_in_window_wins() {
        // 2025-05-05 is four days after May 1 and within a week of May 10.
        let public = vec![
            HolidayEntry { start_date: d(2025, 5, 1), end_date: d(2025, 5, 1) },
            HolidayEntry { start_date: d(2025, 5, 10), end_date: d(2025, 5, 10) },
        ];
        let cal = HolidayCalendar::new(&public, &[], 7);
        assert_eq!(cal.near_holiday_status(d(2025, 5, 5)), HolidayProximity::After);
    }

    #[test]
    fn test_entry_payload_shape() {
        let json = r#"[{"id": "x", "startDate": "2025-12-24", "endDate": "2025-12-26",
                        "type": "Public", "name": [{"language": "EN", "text": "Christmas"}]}]"#;
        let entries = HolidayEntry::parse_list(json).unwrap();
        assert_eq!(entries[0].dates().count(), 3);
    }

    struct StaticSource(HashMap<&'static str, Vec<HolidayEntry>>);

    #[async_trait]
    impl HolidaySource for StaticSource {
        async fn fetch(&self, url: &str) -> Result<Vec<HolidayEntry>, ScrapeError> {
            Ok(self.0.get(url).cloned().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_preload_merges_sources() {
        let mut m = HashMap::new();
        m.insert("public", vec![HolidayEntry { start_date: d(2025, 1, 1), end_date: d(2025, 1, 1) }]);
        m.insert("school", vec![HolidayEntry { start_date: d(2025, 2, 17), end_date: d(2025, 2, 21) }]);
        let source = StaticSource(m);

        let cal = HolidayCalendar::preload(&source, "public", "school", 7).await.unwrap();
        assert!(cal.is_public_holiday(d(2025, 1, 1)));
        assert!(cal.is_school_holiday(d(2025, 2, 20)));
        assert_eq!(cal.near_holiday_status(d(2025, 2, 12)), HolidayProximity::Before);
    }

    #[tokio::test]
    async fn test_unreachable_source_is_empty() {
        let source = StaticSource(HashMap::new());
        let cal = HolidayCalendar::preload(&source, "public", "school", 7).await.unwrap();
        assert_eq!(cal.near_holiday_status(d(2025, 1, 1)), HolidayProximity::Unknown);
    }

    #[test]
    fn test_error_status_yields_no_entries() {
        let entries =
            entries_for_response("http://holidays", StatusCode::INTERNAL_SERVER_ERROR, "oops").unwrap();
        assert!(entries.is_empty());

        let entries = entries_for_response(
            "http://holidays",
            StatusCode::OK,
            r#"[{"startDate": "2025-05-01", "endDate": "2025-05-01"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);

        assert!(matches!(
            entries_for_response("http://holidays", StatusCode::OK, "oops"),
            Err(ScrapeError::Payload(_))
        ));
    }

    /// Answer a single HTTP request with `status_line` and `body`.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/PublicHolidays", addr)
    }

    #[tokio::test]
    async fn test_client_treats_server_error_as_empty() {
        let url = serve_once("500 Internal Server Error", "").await;
        let entries = OpenHolidaysClient::new().fetch(&url).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_client_reads_entries() {
        let url = serve_once("200 OK", r#"[{"startDate": "2025-05-01", "endDate": "2025-05-02"}]"#).await;
        let entries = OpenHolidaysClient::new().fetch(&url).await.unwrap();
        assert_eq!(entries, vec![HolidayEntry { start_date: d(2025, 5, 1), end_date: d(2025, 5, 2) }]);
    }
}

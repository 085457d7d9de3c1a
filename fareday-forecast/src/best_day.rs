use chrono::{Days, NaiveDate};
use fareday_core::{CoreError, CoreResult, PriceModel};
use serde::Serialize;
use tracing::debug;

use crate::features::PredictionContext;

/// Cheapest predicted purchase day for a flight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestPurchaseDay {
    pub predicted_price: f64,
    pub date: NaiveDate,
    /// Days between `date` and departure.
    pub days_ago: i64,
}

impl BestPurchaseDay {
    /// Day-month-year, the format shown to users.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// `None` when there was no candidate day to score.
    pub best: Option<BestPurchaseDay>,
    pub candidates_scored: usize,
}

/// Candidate `(daysAgo, purchase date)` pairs, from buying today down to
/// buying on the day of departure. Empty if the flight is already in the past.
pub fn candidate_purchase_dates(
    ctx: &PredictionContext,
) -> impl Iterator<Item = (i64, NaiveDate)> + '_ {
    let days_until_flight = ctx.days_until_flight();
    (0..=days_until_flight).rev().filter_map(move |k| {
        let date = ctx.flight_date.checked_sub_days(Days::new(k as u64))?;
        (date >= ctx.today).then_some((k, date))
    })
}

/// Scan every candidate purchase day and keep the lowest prediction.
///
/// Ties keep the earliest purchase date: a later candidate only replaces the
/// best on strict improvement. A failing model call aborts the scan.
pub fn find_best_purchase_day(
    ctx: &PredictionContext,
    model: &dyn PriceModel,
) -> CoreResult<SearchOutcome> {
    let mut best: Option<BestPurchaseDay> = None;
    let mut candidates_scored = 0;
    let base = ctx.feature_vector(ctx.today);

    for (days_ago, date) in candidate_purchase_dates(ctx) {
        let features = base.with_days_ago(days_ago);
        let predicted_price = model.predict(&features).map_err(|e| match e {
            CoreError::ModelInference(msg) => CoreError::ModelInference(msg),
            other => CoreError::ModelInference(other.to_string()),
        })?;
        candidates_scored += 1;

        let improves = best
            .as_ref()
            .map_or(true, |b| predicted_price < b.predicted_price);
        if improves {
            best = Some(BestPurchaseDay {
                predicted_price,
                date,
                days_ago,
            });
        }
    }

    debug!(
        model = model.name(),
        candidates_scored,
        best_days_ago = best.as_ref().map(|b| b.days_ago),
        "best purchase day search finished"
    );

    Ok(SearchOutcome {
        best,
        candidates_scored,
    })
}

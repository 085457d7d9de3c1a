//! The HTML form front end.

use axum::{
    extract::{Form, State},
    response::Html,
    routing::get,
    Router,
};
use chrono::Days;
use fareday_forecast::PredictionRequest;

use crate::error::AppError;
use crate::predictions::{predict_blocking, BestDayResponse};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(show_form).post(submit_form))
}

/// GET /
pub async fn show_form(State(state): State<AppState>) -> Html<String> {
    Html(render(&state, None))
}

/// POST /
pub async fn submit_form(
    State(state): State<AppState>,
    Form(req): Form<PredictionRequest>,
) -> Result<Html<String>, AppError> {
    let outcome = match predict_blocking(state.clone(), req).await {
        Ok(resp) => Outcome::Prediction(resp),
        Err(AppError::Validation(err)) => Outcome::Rejected(err.to_string()),
        Err(other) => return Err(other),
    };
    Ok(Html(render(&state, Some(&outcome))))
}

enum Outcome {
    Prediction(BestDayResponse),
    Rejected(String),
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn options(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("<option value=\"{0}\">{0}</option>", escape(n)))
        .collect::<Vec<_>>()
        .join("")
}

fn render(state: &AppState, outcome: Option<&Outcome>) -> String {
    let today = (state.today)();
    let min_date = today.checked_add_days(Days::new(1)).unwrap_or(today);

    let result = match outcome {
        None => String::new(),
        Some(Outcome::Rejected(msg)) => format!("<p class=\"error\">{}</p>", escape(msg)),
        Some(Outcome::Prediction(resp)) => match (&resp.best_purchase_date, resp.predicted_price) {
            (Some(date), Some(price)) => format!(
                "<p class=\"result\">Predicted price if bought today: {:.2}</p>\
                 <p class=\"result\">Best day to buy: {} (predicted price {:.2})</p>",
                resp.current_prediction,
                escape(date),
                price
            ),
            _ => "<p class=\"result\">No purchase date left before departure.</p>".to_string(),
        },
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Flight price prediction</title></head>
<body>
<h1>Flight price prediction</h1>
<form method="post" action="/">
  <label>Price <input type="number" name="price" min="0" step="0.01" required></label>
  <label>From <select name="departure_airport">{dep}</select></label>
  <label>To <select name="arrival_airport">{arr}</select></label>
  <label>Departure date <input type="date" name="departure_date" min="{min_date}" required></label>
  <label>Near holiday
    <select name="near_holiday">
      <option value="">No</option>
      <option value="-1">Week before</option>
      <option value="0">On holiday</option>
      <option value="1">Week after</option>
    </select>
  </label>
  <button type="submit">Predict</button>
</form>
{result}
</body>
</html>
"#,
        dep = options(state.departure_encoder.classes()),
        arr = options(state.arrival_encoder.classes()),
        min_date = min_date.format("%Y-%m-%d"),
        result = result,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }
}

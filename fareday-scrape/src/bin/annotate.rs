//! Annotate raw price-history points with holiday context and export them
//! as training records.
//!
//! Input CSV columns: `departureDate,departure_airport,arrival_airport,label`
//! where `label` is the chart point text, e.g. `12 days ago €87`.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use fareday_scrape::{ChartPointRow, HolidayCalendar, HolidayEntry, OpenHolidaysClient, RecordBuilder};
use fareday_store::{app_config::Config, records};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fareday-annotate", about = "Tag scraped flight prices with holiday context")]
struct Cli {
    /// Raw chart points CSV
    #[arg(long)]
    input: PathBuf,

    /// Output CSV (defaults to scraper.output_path from config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Day the chart was scraped (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    scraped_on: Option<NaiveDate>,

    /// Saved public-holiday API response; fetched when omitted
    #[arg(long, requires = "school_holidays")]
    public_holidays: Option<PathBuf>,

    /// Saved school-holiday API response; fetched when omitted
    #[arg(long, requires = "public_holidays")]
    school_holidays: Option<PathBuf>,

    /// Seed for the airline label sampler
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fareday_annotate=info,fareday_scrape=info,fareday_store=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Config is only needed for whatever the command line leaves out.
    let config = if cli.output.is_none() || cli.public_holidays.is_none() {
        Some(Config::load().context("failed to load config")?)
    } else {
        None
    };
    let window_days = config.as_ref().map(|c| c.holidays.window_days).unwrap_or(7).max(0) as u64;

    let calendar = match (&cli.public_holidays, &cli.school_holidays, &config) {
        (Some(public), Some(school), _) => {
            let public = HolidayEntry::parse_list(&std::fs::read_to_string(public)?)?;
            let school = HolidayEntry::parse_list(&std::fs::read_to_string(school)?)?;
            HolidayCalendar::new(&public, &school, window_days)
        }
        (_, _, Some(cfg)) => {
            let client = OpenHolidaysClient::new();
            HolidayCalendar::preload(&client, &cfg.holidays.public_url, &cfg.holidays.school_url, window_days)
                .await?
        }
        _ => anyhow::bail!("no holiday source available"),
    };

    let input = cli.input.to_string_lossy().to_string();
    let points: Vec<ChartPointRow> = records::read_rows_from_path(&input)?;
    tracing::info!(count = points.len(), input = %input, "Read chart points");

    let scrape_day = cli
        .scraped_on
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut builder = RecordBuilder::new(&calendar, scrape_day, rng);

    let annotated = builder.annotate(points);

    let output = match (&cli.output, &config) {
        (Some(path), _) => path.to_string_lossy().to_string(),
        (None, Some(cfg)) => cfg.scraper.output_path.clone(),
        (None, None) => anyhow::bail!("no output path"),
    };
    records::export_records(&output, &annotated)?;
    Ok(())
}

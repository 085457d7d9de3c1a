use std::fs;
use std::path::Path;

use fareday_core::{AirportDistanceTable, LabelEncoder, LinearPriceModel};
use serde::Deserialize;
use tracing::info;

use crate::app_config::ArtifactsConfig;
use crate::{StoreError, StoreResult};

/// Everything the prediction service needs, loaded once at startup.
pub struct Artifacts {
    pub distances: AirportDistanceTable,
    pub departure_encoder: LabelEncoder,
    pub arrival_encoder: LabelEncoder,
    pub model: LinearPriceModel,
}

impl Artifacts {
    pub fn load(cfg: &ArtifactsConfig) -> StoreResult<Self> {
        let distances = load_distances(&cfg.distances_path)?;
        let departure_encoder = load_encoder(&cfg.departure_encoder_path)?;
        let arrival_encoder = load_encoder(&cfg.arrival_encoder_path)?;
        let model = load_model(&cfg.model_path)?;

        info!(
            distance_pairs = distances.len(),
            departure_airports = departure_encoder.len(),
            arrival_airports = arrival_encoder.len(),
            "artifacts loaded"
        );

        Ok(Self {
            distances,
            departure_encoder,
            arrival_encoder,
            model,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    departure: String,
    arrival: String,
    distance: u32,
}

/// Read a `departure,arrival,distance` CSV.
pub fn load_distances(path: &str) -> StoreResult<AirportDistanceTable> {
    let csv_err = |source| StoreError::Csv {
        path: path.to_string(),
        source,
    };

    let mut reader = csv::Reader::from_path(Path::new(path)).map_err(csv_err)?;
    let rows = reader
        .deserialize::<DistanceRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok(AirportDistanceTable::from_rows(
        rows.into_iter().map(|r| (r.departure, r.arrival, r.distance)),
    ))
}

pub fn load_encoder(path: &str) -> StoreResult<LabelEncoder> {
    let json = read_to_string(path)?;
    LabelEncoder::from_json(&json).map_err(|source| StoreError::Artifact {
        path: path.to_string(),
        source,
    })
}

pub fn load_model(path: &str) -> StoreResult<LinearPriceModel> {
    let json = read_to_string(path)?;
    LinearPriceModel::from_json(&json).map_err(|source| StoreError::Artifact {
        path: path.to_string(),
        source,
    })
}

fn read_to_string(path: &str) -> StoreResult<String> {
    fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_string(),
        source,
    })
}

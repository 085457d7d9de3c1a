use std::io::{Read, Write};
use std::path::Path;

use fareday_shared::FlightPriceRecord;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{StoreError, StoreResult};

/// Write records with a header row.
pub fn write_records<W: Write>(w: W, records: &[FlightPriceRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(w);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export records to `path`. Nothing is written when there are no records.
pub fn export_records(path: &str, records: &[FlightPriceRecord]) -> StoreResult<usize> {
    if records.is_empty() {
        warn!("No data to export.");
        return Ok(0);
    }

    let file = std::fs::File::create(Path::new(path)).map_err(|source| StoreError::Io {
        path: path.to_string(),
        source,
    })?;
    write_records(file, records).map_err(|source| StoreError::Csv {
        path: path.to_string(),
        source,
    })?;

    info!(count = records.len(), path, "Data successfully exported");
    Ok(records.len())
}

pub fn read_rows<T: DeserializeOwned, R: Read>(r: R) -> Result<Vec<T>, csv::Error> {
    csv::Reader::from_reader(r).deserialize().collect()
}

pub fn read_rows_from_path<T: DeserializeOwned>(path: &str) -> StoreResult<Vec<T>> {
    let file = std::fs::File::open(Path::new(path)).map_err(|source| StoreError::Io {
        path: path.to_string(),
        source,
    })?;
    read_rows(file).map_err(|source| StoreError::Csv {
        path: path.to_string(),
        source,
    })
}

pub mod app_config;
pub mod artifacts;
pub mod records;

pub use artifacts::Artifacts;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Invalid artifact {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: fareday_core::CoreError,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

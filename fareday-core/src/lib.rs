pub mod distance;
pub mod encoder;
pub mod feature_vector;
pub mod model;

pub use distance::AirportDistanceTable;
pub use encoder::{AirportEncoder, LabelEncoder};
pub use feature_vector::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use model::{LinearPriceModel, PriceModel};

/// Rejections raised while turning a raw request into a prediction context.
/// None of these are retried; the caller is told what to fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Departure and arrival airports must be different.")]
    SameAirport,
    #[error("Unknown airport: {0}")]
    UnknownAirport(String),
    #[error("Departure date must be in the future.")]
    PastDate,
    #[error("Departure date must be within {0} days from today.")]
    BeyondHorizon(i64),
    #[error("No distance data between {0} and {1}")]
    NoDistanceData(String, String),
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

impl ValidationError {
    /// Stable machine-readable kind, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SameAirport => "SameAirport",
            Self::UnknownAirport(_) => "UnknownAirport",
            Self::PastDate => "PastDate",
            Self::BeyondHorizon(_) => "BeyondHorizon",
            Self::NoDistanceData(..) => "NoDistanceData",
            Self::InvalidPrice(_) => "InvalidPrice",
            Self::InvalidDate(_) => "InvalidDate",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Model inference failed: {0}")]
    ModelInference(String),
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

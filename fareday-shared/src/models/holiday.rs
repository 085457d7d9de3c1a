use serde::{Deserialize, Serialize};
use std::fmt;

/// Proximity of a departure date to a public or school holiday.
///
/// Serialized as `-1`, `0`, `1`, or an empty string when no holiday is near,
/// which is the shape the scraped CSV and the prediction form both use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HolidayProximity {
    /// Within the week before a holiday.
    Before,
    /// On a holiday.
    On,
    /// Within the week after a holiday.
    After,
    #[default]
    Unknown,
}

impl HolidayProximity {
    /// Parse a caller-supplied flag. Anything unrecognized is `Unknown`.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "-1" | "-1.0" => Self::Before,
            "0" | "0.0" => Self::On,
            "1" | "+1" | "1.0" => Self::After,
            _ => Self::Unknown,
        }
    }

    pub fn offset(&self) -> Option<i8> {
        match self {
            Self::Before => Some(-1),
            Self::On => Some(0),
            Self::After => Some(1),
            Self::Unknown => None,
        }
    }

    /// One-hot encoding in `[before, on, after]` order.
    pub fn one_hot(&self) -> [f64; 3] {
        match self {
            Self::Before => [1.0, 0.0, 0.0],
            Self::On => [0.0, 1.0, 0.0],
            Self::After => [0.0, 0.0, 1.0],
            Self::Unknown => [0.0, 0.0, 0.0],
        }
    }
}

impl fmt::Display for HolidayProximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(o) => write!(f, "{}", o),
            None => Ok(()),
        }
    }
}

impl From<String> for HolidayProximity {
    fn from(s: String) -> Self {
        Self::from_flag(&s)
    }
}

impl From<HolidayProximity> for String {
    fn from(p: HolidayProximity) -> Self {
        p.to_string()
    }
}

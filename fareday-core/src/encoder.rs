use serde::Deserialize;

use crate::{CoreError, CoreResult};

/// Maps an airport name to the integer id the model was trained with.
pub trait AirportEncoder: Send + Sync {
    fn encode(&self, name: &str) -> CoreResult<i64>;

    fn contains(&self, name: &str) -> bool {
        self.encode(name).is_ok()
    }

    /// Known names, in id order.
    fn classes(&self) -> &[String];
}

/// Categorical label encoder: the id of a label is its index in the sorted
/// vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

/// On-disk shape of an encoder artifact.
#[derive(Debug, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(mut classes: Vec<String>) -> CoreResult<Self> {
        classes.sort();
        if let Some(dup) = classes.windows(2).find(|w| w[0] == w[1]) {
            return Err(CoreError::InvalidArtifact(format!(
                "duplicate encoder class: {}",
                dup[0]
            )));
        }
        if classes.is_empty() {
            return Err(CoreError::InvalidArtifact("encoder has no classes".to_string()));
        }
        Ok(Self { classes })
    }

    /// Parse `{"classes": [...]}`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let artifact: EncoderArtifact = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidArtifact(e.to_string()))?;
        Self::new(artifact.classes)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl AirportEncoder for LabelEncoder {
    fn encode(&self, name: &str) -> CoreResult<i64> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(name))
            .map(|idx| idx as i64)
            .map_err(|_| CoreError::UnknownLabel(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.classes.binary_search_by(|c| c.as_str().cmp(name)).is_ok()
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Sofia".to_string(),
            "Eindhoven".to_string(),
            "Varna".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_ids_follow_sorted_order() {
        let enc = encoder();
        assert_eq!(enc.encode("Eindhoven").unwrap(), 0);
        assert_eq!(enc.encode("Sofia").unwrap(), 1);
        assert_eq!(enc.encode("Varna").unwrap(), 2);
    }

    #[test]
    fn test_unknown_label() {
        let enc = encoder();
        assert!(matches!(enc.encode("Plovdiv"), Err(CoreError::UnknownLabel(_))));
        assert!(!enc.contains("Plovdiv"));
        assert!(enc.contains("Varna"));
    }

    #[test]
    fn test_duplicates_rejected() {
        let res = LabelEncoder::new(vec!["A".to_string(), "A".to_string()]);
        assert!(matches!(res, Err(CoreError::InvalidArtifact(_))));
    }

    #[test]
    fn test_from_json() {
        let enc = LabelEncoder::from_json(r#"{"classes": ["Varna", "Sofia"]}"#).unwrap();
        assert_eq!(enc.classes(), &["Sofia".to_string(), "Varna".to_string()]);
    }
}

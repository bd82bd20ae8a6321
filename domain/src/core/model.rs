//! Model value object representing a backend model identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of the model a reviewer or the lead runs on (Value Object)
///
/// The crew does not route between providers; the identifier is passed
/// through to the configured gateway unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    /// Model used when the configuration does not name one
    pub const DEFAULT: &'static str = "o3-mini";

    /// Create a model identifier. Surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (a configuration mistake)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::new(Self::DEFAULT)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model::new(s))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), "o3-mini");
    }

    #[test]
    fn test_model_trims_whitespace() {
        let model: Model = "  gpt-4o ".parse().unwrap();
        assert_eq!(model.to_string(), "gpt-4o");
    }

    #[test]
    fn test_empty_model_detected() {
        assert!(Model::new("   ").is_empty());
        assert!(!Model::default().is_empty());
    }

    #[test]
    fn test_model_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::new("gpt-4.1")).unwrap();
        assert_eq!(json, "\"gpt-4.1\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::new("gpt-4.1"));
    }
}

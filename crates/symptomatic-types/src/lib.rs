//! # Symptomatic Types
//!
//! Small validated value types shared by the core library and the API crates.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when creating validated types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The symptom description was empty
    #[error("symptom description cannot be empty")]
    EmptyText,
    /// The severity string is not one of `low`, `medium` or `high`
    #[error("unknown severity tier: {0}")]
    UnknownSeverity(String),
}

/// A free-text symptom description that is guaranteed to be non-empty.
///
/// The text is kept exactly as written. Whitespace-only input is valid; it simply matches no
/// symptoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomText(String);

impl SymptomText {
    /// Creates a new `SymptomText` from the given input.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(SymptomText)` if the input is non-empty, or `Err(TypeError::EmptyText)` if
    /// it is the empty string.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let input = input.as_ref();
        if input.is_empty() {
            return Err(TypeError::EmptyText);
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymptomText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SymptomText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SymptomText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SymptomText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SymptomText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Static severity tier of a disease. Unrelated to model confidence.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(TypeError::UnknownSeverity(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_text_keeps_input() {
        let text = SymptomText::new("  I have a Fever \n").unwrap();
        assert_eq!(text.as_str(), "  I have a Fever \n");
    }

    #[test]
    fn test_symptom_text_rejects_empty() {
        assert!(matches!(SymptomText::new(""), Err(TypeError::EmptyText)));
    }

    #[test]
    fn test_symptom_text_accepts_whitespace_only() {
        let text = SymptomText::new(" \t\n").unwrap();
        assert_eq!(text.as_str(), " \t\n");
    }

    #[test]
    fn test_symptom_text_deserialize_rejects_empty() {
        let result: Result<SymptomText, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
        let result: Result<SymptomText, _> = serde_json::from_str("\"   \"");
        assert!(result.is_ok());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("Medium".parse::<Severity>().unwrap(), Severity::Medium);
        assert!("critical".parse::<Severity>().is_err());
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Gender choices for a profile. Stored as a single character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
    #[serde(rename = "N")]
    PreferNotToSay,
}

/// The input matched neither a gender code nor a display label
#[derive(Debug, Error, Clone, PartialEq)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidGender(pub String);

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    /// Single character code stored in the database
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
            Gender::PreferNotToSay => "N",
        }
    }

    /// Display label returned to clients
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Parse the stored code only
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }

    /// Accepts either the stored code or the display label (case-insensitive)
    pub fn parse_choice(input: &str) -> Result<Self, InvalidGender> {
        if let Some(gender) = Self::from_code(input) {
            return Ok(gender);
        }
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| InvalidGender(input.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_labels() {
        assert_eq!(Gender::parse_choice("F"), Ok(Gender::Female));
        assert_eq!(
            Gender::parse_choice("prefer NOT to say"),
            Ok(Gender::PreferNotToSay)
        );
        assert_eq!(Gender::parse_choice("male"), Ok(Gender::Male));
        assert!(Gender::parse_choice("x").is_err());
    }

    #[test]
    fn codes_are_case_sensitive() {
        // "m" is neither a code nor a label
        assert!(Gender::parse_choice("m").is_err());
    }
}

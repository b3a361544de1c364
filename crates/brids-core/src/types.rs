//! Shared types used across the brazilian-ids workspace.

use crate::error::{BridsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for a Brazilian state abbreviation (UF) with validation.
///
/// State codes are exactly two ASCII letters; input is uppercased on
/// construction so `"mg"` and `"MG"` name the same state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
    /// Create a new `StateCode` from a string.
    ///
    /// # Errors
    /// Returns error if the code is not two ASCII letters.
    pub fn new(code: impl AsRef<str>) -> Result<Self> {
        let code = code.as_ref().trim().to_ascii_uppercase();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(code: &str) -> Result<()> {
        static UF_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = UF_REGEX.get_or_init(|| Regex::new(r"^[A-Z]{2}$").expect("valid regex"));

        if regex.is_match(code) {
            Ok(())
        } else {
            Err(BridsError::Validation(format!(
                "invalid state code: must be two letters, got '{code}'"
            )))
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for StateCode {
    type Error = BridsError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StateCode> for String {
    fn from(value: StateCode) -> Self {
        value.0
    }
}

impl AsRef<str> for StateCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

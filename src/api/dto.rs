//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ClassifyError;
use crate::config::IdentityConfig;
use crate::domain::{ClassificationResult, RawToken};

// =============================================================================
// Classify DTOs
// =============================================================================

/// Request body of `POST /bfhl`.
///
/// `data` is kept as a raw JSON value so a wrong type surfaces as
/// [`ClassifyError::DataNotArray`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyRequest {
    /// Array of mixed tokens.
    #[serde(default)]
    pub data: Option<Value>,
}

impl ClassifyRequest {
    /// Extracts the tokens to classify.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::DataNotArray`] if `data` is missing, `null`,
    /// or any non-array value.
    pub fn into_tokens(self) -> Result<Vec<RawToken>, ClassifyError> {
        match self.data {
            Some(Value::Array(items)) => Ok(items.into_iter().map(RawToken::from).collect()),
            _ => Err(ClassifyError::DataNotArray),
        }
    }
}

/// Successful response of `POST /bfhl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Always `true`.
    pub is_success: bool,
    /// `{full_name}_{date_of_birth}`.
    pub user_id: String,
    /// Contact email.
    pub email: String,
    /// Roll number.
    pub roll_number: String,
    /// Numeric tokens with an odd integer value.
    pub odd_numbers: Vec<String>,
    /// Numeric tokens with an even integer value.
    pub even_numbers: Vec<String>,
    /// Upper-cased alphabetic tokens.
    pub alphabets: Vec<String>,
    /// Tokens that are neither numeric nor alphabetic.
    pub special_characters: Vec<String>,
    /// Sum of the integer values, as a decimal string.
    pub sum: String,
    /// Reversed letters with alternating case.
    pub concat_string: String,
}

impl ClassifyResponse {
    /// Combines identity details with a classification result.
    #[must_use]
    pub fn new(identity: &IdentityConfig, result: ClassificationResult) -> Self {
        Self {
            is_success: true,
            user_id: identity.user_id(),
            email: identity.email.clone(),
            roll_number: identity.roll_number.clone(),
            odd_numbers: result.odd_numbers,
            even_numbers: result.even_numbers,
            alphabets: result.alphabets,
            special_characters: result.special_characters,
            sum: result.sum,
            concat_string: result.concat_string,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Quote record and creation input.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{RecordId, Timestamp};

/// Payment term applied when the form leaves it blank.
pub const DEFAULT_PAYMENT_TERM: &str = "à vista";

/// A pending price proposal.
///
/// `approved` is always `false` while the record exists: approval migrates
/// the quote into a plant and removes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: RecordId,
    pub client_name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub city: String,
    pub kwh: f64,
    pub budget_value: f64,
    pub payment_term: String,
    #[serde(default)]
    pub observation: String,
    #[serde(default)]
    pub approved: bool,
    pub created_at: Timestamp,
}

/// A validated quote ready to be persisted.
///
/// `created_at` of `None` means the store assigns its own current time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuote {
    pub client_name: String,
    pub contact: String,
    pub city: String,
    pub kwh: f64,
    pub budget_value: f64,
    pub payment_term: String,
    pub observation: String,
    pub created_at: Option<Timestamp>,
}

/// Custom quote date as submitted by the form: either a full timestamp or
/// a calendar day (interpreted as midnight UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuoteDate {
    Timestamp(Timestamp),
    Day(NaiveDate),
}

impl QuoteDate {
    pub fn to_timestamp(self) -> Timestamp {
        match self {
            QuoteDate::Timestamp(ts) => ts,
            QuoteDate::Day(day) => day.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

/// Raw quote creation input (the "new quote" form).
///
/// Every field is optional at the wire level so that missing values surface
/// as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateQuote {
    pub client_name: String,
    pub contact: Option<String>,
    pub city: Option<String>,
    pub kwh: Option<f64>,
    pub budget_value: Option<f64>,
    pub payment_term: Option<String>,
    pub observation: Option<String>,
    pub custom_date: Option<QuoteDate>,
}

impl CreateQuote {
    /// Validate and normalise the input.
    ///
    /// - `clientName` must be non-empty after trimming.
    /// - `kwh` and `budgetValue` must be present, finite and non-negative.
    /// - Text fields are trimmed; a blank payment term becomes
    ///   [`DEFAULT_PAYMENT_TERM`].
    pub fn validate(self) -> Result<NewQuote, CoreError> {
        let client_name = self.client_name.trim().to_string();
        if client_name.is_empty() {
            return Err(CoreError::Validation(
                "clientName must not be empty".to_string(),
            ));
        }

        let kwh = validate_amount("kwh", self.kwh)?;
        let budget_value = validate_amount("budgetValue", self.budget_value)?;

        let payment_term = match trimmed(self.payment_term) {
            term if term.is_empty() => DEFAULT_PAYMENT_TERM.to_string(),
            term => term,
        };

        Ok(NewQuote {
            client_name,
            contact: trimmed(self.contact),
            city: trimmed(self.city),
            kwh,
            budget_value,
            payment_term,
            observation: trimmed(self.observation),
            created_at: self.custom_date.map(QuoteDate::to_timestamp),
        })
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Validate a required non-negative numeric field.
fn validate_amount(field: &str, value: Option<f64>) -> Result<f64, CoreError> {
    let value = value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;
    if !value.is_finite() {
        return Err(CoreError::Validation(format!("{field} must be a number")));
    }
    if value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(value)
}

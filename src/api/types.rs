// Expense API request/response types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parse::parse_float_prefix;
use crate::error::{ApiError, ApiResult};
use crate::store::{round_cents, NewExpense};

pub const MISSING_FIELDS: &str = "Missing required fields: description, amount, category";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be a positive number";
pub const INVALID_DATE: &str = "Date must be in YYYY-MM-DD format";
pub const INVALID_BODY: &str = "Invalid request body";

/// Body of a create request
///
/// Every field is optional at the wire level; `validate` enforces presence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub category: Option<String>,
    /// `YYYY-MM-DD`; today (UTC) when absent
    #[serde(default)]
    pub date: Option<String>,
}

/// Amount as sent by the client, any JSON value
///
/// Numbers are used as-is. Anything else is read through its loose text form
/// (`[5]` is `"5"`, `true` is `"true"`) and then parsed leniently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AmountInput(Value);

impl AmountInput {
    /// `false`, zero and the empty string count as "not provided"
    fn is_provided(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    fn to_number(&self) -> Option<f64> {
        match &self.0 {
            Value::Number(n) => n.as_f64(),
            other => parse_float_prefix(&loose_text(other)),
        }
    }
}

/// Text form of a JSON value: arrays join their items with commas, null
/// items become empty and objects have no numeric form.
fn loose_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(loose_text).collect::<Vec<_>>().join(","),
    }
}

impl CreateExpenseRequest {
    /// Decode a request body. An empty body decodes as an empty request.
    pub fn from_slice(body: &[u8]) -> ApiResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|_| ApiError::validation(INVALID_BODY))
    }

    /// Check required fields, then the amount, then the optional date.
    pub fn validate(self, today: NaiveDate) -> ApiResult<NewExpense> {
        let description = non_blank(self.description);
        let category = non_blank(self.category);
        let amount = self.amount.filter(AmountInput::is_provided);

        let (Some(description), Some(amount), Some(category)) = (description, amount, category)
        else {
            return Err(ApiError::validation(MISSING_FIELDS));
        };

        let amount = amount
            .to_number()
            .filter(|n| *n > 0.0)
            .map(round_cents)
            .filter(|n| n.is_finite() && *n > 0.0)
            .ok_or_else(|| ApiError::validation(AMOUNT_NOT_POSITIVE))?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ApiError::validation(INVALID_DATE))?,
        };

        Ok(NewExpense {
            description,
            amount,
            category,
            date,
        })
    }
}

/// Trimmed text, or `None` when missing or blank
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Uniform JSON wrapper returned by every operation; absent fields are omitted
#[derive(Debug, Serialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn listing(data: T, total: f64, count: usize) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: Some(total),
            count: Some(count),
            message: None,
            error: None,
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            data: Some(data),
            total: None,
            count: None,
            message: Some(message.to_string()),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            data: None,
            total: None,
            count: None,
            message: Some(message.to_string()),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            data: None,
            total: None,
            count: None,
            message: None,
            error: Some(error),
        }
    }
}

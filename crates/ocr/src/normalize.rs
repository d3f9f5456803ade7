//! Composition of extracted signals into the canonical [`ExpenseRecord`].
//!
//! Two upstream shapes are supported. Word-level OCR goes through the engine
//! and [`normalize`]; pre-labelled key/value payloads go through
//! [`normalize_fields`], which falls back to the per-field defaults of
//! [`ExpenseRecord::default`] for anything that was not supplied.

use std::str::FromStr;

use reimburse_core::{CurrencyCode, ExpenseRecord, Money, SubmitFlag};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::amount::amounts_in;
use crate::classify::{PurposeCategory, CURRENCY_RULES};
use crate::error::{ExtractionError, MalformedReason};

/// Build the record for a completed word-level extraction.
///
/// `SubmitReport` is always `Y` here: it marks that extraction ran, not
/// anything read from the document.
pub fn normalize(total: Money, currency: CurrencyCode, purpose: PurposeCategory) -> ExpenseRecord {
    ExpenseRecord::new(currency, total, purpose.label(), SubmitFlag::Yes)
}

// ── Key/value upstream schema ─────────────────────────────────────────────────

/// Flat key/value form: `{"Currency": .., "Total": .., "Purpose": .., "SubmitReport": ..}`.
///
/// Values may be strings, numbers or booleans; anything else counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    #[serde(rename = "Currency", default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    #[serde(rename = "Total", default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    #[serde(rename = "Purpose", default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<Value>,
    #[serde(rename = "SubmitReport", default, skip_serializing_if = "Option::is_none")]
    pub submit_report: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentField {
    pub text: Option<String>,
}

/// Either labelled document fields or an already-flat field map.
///
/// A body carrying a `documentFields` key is always the document form and
/// must decode as one; only bodies without that key are read as flat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldPayload {
    Document {
        #[serde(rename = "documentFields")]
        document_fields: Vec<DocumentField>,
    },
    Flat(FieldMap),
}

impl<'de> Deserialize<'de> for FieldPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(de::Error::custom("expected a JSON object"));
        }
        if let Some(fields) = value.get_mut("documentFields").map(Value::take) {
            let document_fields = serde_json::from_value(fields)
                .map_err(|e| de::Error::custom(format!("documentFields: {e}")))?;
            return Ok(FieldPayload::Document { document_fields });
        }
        serde_json::from_value(value)
            .map(FieldPayload::Flat)
            .map_err(de::Error::custom)
    }
}

impl FieldPayload {
    pub fn into_field_map(self) -> Result<FieldMap, ExtractionError> {
        match self {
            FieldPayload::Document { document_fields } => route_document_fields(&document_fields),
            FieldPayload::Flat(map) => Ok(map),
        }
    }
}

/// Route each labelled field into its slot, first matching label wins.
/// A later field overwrites an earlier one routed to the same slot.
pub fn route_document_fields(fields: &[DocumentField]) -> Result<FieldMap, ExtractionError> {
    let mut map = FieldMap::default();
    for (index, field) in fields.iter().enumerate() {
        let text = field
            .text
            .as_deref()
            .ok_or_else(|| ExtractionError::malformed(index, MalformedReason::MissingText))?;

        if text.contains("INR") || text.contains("USD") {
            map.currency = Some(Value::from(text));
        } else if text.contains("Total") || text.contains("Amount") {
            map.total = Some(Value::from(text));
        } else if text.contains("Purpose") {
            map.purpose = Some(Value::from(text));
        } else if text.contains('Y') || text.contains("Submit") {
            map.submit_report = Some(Value::from("Y"));
        }
    }
    Ok(map)
}

pub fn normalize_fields(map: &FieldMap) -> ExpenseRecord {
    let defaults = ExpenseRecord::default();

    let currency = field_text(map.currency.as_ref())
        .map_or(defaults.currency, |text| CURRENCY_RULES.classify(&text));
    let total = field_text(map.total.as_ref())
        .and_then(|text| parse_total(&text))
        .unwrap_or(defaults.total);
    let purpose = field_text(map.purpose.as_ref())
        .map(|text| strip_purpose_label(&text).to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or(defaults.purpose);
    let submit = match map.submit_report.as_ref() {
        Some(Value::Bool(true)) => SubmitFlag::Yes,
        other => match field_text(other).as_deref().map(str::to_uppercase).as_deref() {
            Some("Y" | "YES" | "TRUE") => SubmitFlag::Yes,
            _ => defaults.submit,
        },
    };

    ExpenseRecord { currency, total, purpose, submit }
}

fn field_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// A bare number is taken as-is; labelled text yields its largest amount.
fn parse_total(text: &str) -> Option<Money> {
    let clean = text.replace(',', "");
    if let Ok(money) = Money::from_str(&clean) {
        return Some(money);
    }
    amounts_in(&clean).max().map(Money::from_decimal)
}

fn strip_purpose_label(text: &str) -> &str {
    let trimmed = text.trim();
    let rest = trimmed
        .strip_prefix("Purpose")
        .or_else(|| trimmed.strip_prefix("PURPOSE"))
        .unwrap_or(trimmed);
    rest.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .trim_end()
}

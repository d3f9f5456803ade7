use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::CurrencyCode;
use crate::money::Money;

/// Purpose used when nothing upstream names one.
pub const DEFAULT_PURPOSE: &str = "Not Mentioned";

/// Whether the report should be submitted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmitFlag {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl fmt::Display for SubmitFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitFlag::Yes => write!(f, "Y"),
            SubmitFlag::No => write!(f, "N"),
        }
    }
}

/// The canonical four-field expense record consumed by downstream systems.
///
/// The default value is the "nothing extracted" record:
/// `INR / 0.00 / Not Mentioned / N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    #[serde(rename = "ReimbursementCurrencyCode")]
    pub currency: CurrencyCode,
    #[serde(rename = "ExpenseReportTotal")]
    pub total: Money,
    #[serde(rename = "Purpose")]
    pub purpose: String,
    #[serde(rename = "SubmitReport")]
    pub submit: SubmitFlag,
}

impl ExpenseRecord {
    pub fn new(
        currency: CurrencyCode,
        total: Money,
        purpose: impl Into<String>,
        submit: SubmitFlag,
    ) -> Self {
        Self { currency, total, purpose: purpose.into(), submit }
    }
}

impl Default for ExpenseRecord {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            total: Money::zero(),
            purpose: DEFAULT_PURPOSE.to_string(),
            submit: SubmitFlag::default(),
        }
    }
}

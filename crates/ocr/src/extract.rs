use reimburse_core::ExpenseRecord;

use crate::amount::extract_total;
use crate::classify::{classify_currency, classify_purpose};
use crate::error::ExtractionError;
use crate::geometry::{check_position, to_word_tokens};
use crate::lines::Layout;
use crate::normalize::{normalize, normalize_fields, FieldPayload};
use crate::types::{OcrDocument, OcrPage, WordToken};

// ── Public extraction API ─────────────────────────────────────────────────────

/// Stateless entry points; every call is independent of every other.
pub struct Extractor;

impl Extractor {
    /// Turn word tokens into the canonical expense record.
    ///
    /// Fails only on structurally invalid tokens. Heuristic misses fall back
    /// to defaults, so an empty list yields `INR / 0.00 / General
    /// Reimbursement / Y`.
    pub fn extract(words: &[WordToken]) -> Result<ExpenseRecord, ExtractionError> {
        for (index, word) in words.iter().enumerate() {
            check_position(index, word)?;
        }

        let layout = Layout::from_words(words);
        let total = extract_total(&layout.lines);
        let currency = classify_currency(&layout.full_text);
        let purpose = classify_purpose(&layout.full_text);

        Ok(normalize(total, currency, purpose))
    }

    pub fn extract_page(page: &OcrPage) -> Result<ExpenseRecord, ExtractionError> {
        let words = to_word_tokens(&page.words)?;
        Self::extract(&words)
    }

    /// Only the first page is read. A document without pages is an empty page.
    pub fn extract_document(doc: &OcrDocument) -> Result<ExpenseRecord, ExtractionError> {
        match doc.pages.first() {
            Some(page) => Self::extract_page(page),
            None => Self::extract(&[]),
        }
    }

    /// Normalize a pre-labelled key/value payload instead of raw words.
    pub fn extract_fields(payload: FieldPayload) -> Result<ExpenseRecord, ExtractionError> {
        let map = payload.into_field_map()?;
        Ok(normalize_fields(&map))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

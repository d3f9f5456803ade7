//! Keyword classifiers over the flattened document text.
//!
//! Each classifier is an ordered list of rules evaluated first-match-wins,
//! with a fallback outcome when nothing matches.

use reimburse_core::CurrencyCode;
use std::fmt;

/// A single textual cue a rule looks for in upper-cased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Plain substring.
    Contains(&'static str),
}

impl Signal {
    pub fn is_present(self, text: &str) -> bool {
        match self {
            Signal::Contains(needle) => text.contains(needle),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub signals: &'static [Signal],
    pub outcome: T,
}

impl<T: Copy> KeywordRule<T> {
    pub fn matches(&self, text: &str) -> bool {
        self.signals.iter().any(|s| s.is_present(text))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet<T: 'static> {
    pub rules: &'static [KeywordRule<T>],
    pub fallback: T,
}

impl<T: Copy> RuleSet<T> {
    pub fn find_matching_rule(&self, text: &str) -> Option<&KeywordRule<T>> {
        let upper = text.to_uppercase();
        self.rules.iter().find(|rule| rule.matches(&upper))
    }

    pub fn classify(&self, text: &str) -> T {
        self.find_matching_rule(text)
            .map_or(self.fallback, |rule| rule.outcome)
    }
}

// ── Currency ─────────────────────────────────────────────────────────────────

pub static CURRENCY_RULES: RuleSet<CurrencyCode> = RuleSet {
    rules: &[
        KeywordRule {
            signals: &[Signal::Contains("INR"), Signal::Contains("₹"), Signal::Contains("RS")],
            outcome: CurrencyCode::Inr,
        },
        KeywordRule {
            signals: &[Signal::Contains("USD"), Signal::Contains("$")],
            outcome: CurrencyCode::Usd,
        },
        KeywordRule {
            signals: &[Signal::Contains("EUR"), Signal::Contains("€")],
            outcome: CurrencyCode::Eur,
        },
    ],
    fallback: CurrencyCode::Inr,
};

pub fn classify_currency(full_text_upper: &str) -> CurrencyCode {
    CURRENCY_RULES.classify(full_text_upper)
}

// ── Purpose ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurposeCategory {
    Medical,
    DmartShopping,
    Fuel,
    FoodHotel,
    General,
}

impl PurposeCategory {
    pub fn label(self) -> &'static str {
        match self {
            PurposeCategory::Medical => "Medical Reimbursement",
            PurposeCategory::DmartShopping => "DMart Shopping",
            PurposeCategory::Fuel => "Fuel Reimbursement",
            PurposeCategory::FoodHotel => "Food/Hotel Expense",
            PurposeCategory::General => "General Reimbursement",
        }
    }
}

impl fmt::Display for PurposeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub static PURPOSE_RULES: RuleSet<PurposeCategory> = RuleSet {
    rules: &[
        KeywordRule {
            signals: &[Signal::Contains("PHARMACY"), Signal::Contains("MEDICAL")],
            outcome: PurposeCategory::Medical,
        },
        KeywordRule {
            signals: &[Signal::Contains("DMART")],
            outcome: PurposeCategory::DmartShopping,
        },
        KeywordRule {
            signals: &[
                Signal::Contains("FUEL"),
                Signal::Contains("PETROL"),
                Signal::Contains("HPCL"),
                Signal::Contains("IOC"),
            ],
            outcome: PurposeCategory::Fuel,
        },
        KeywordRule {
            signals: &[
                Signal::Contains("HOTEL"),
                Signal::Contains("RESTAURANT"),
                Signal::Contains("CAFE"),
                Signal::Contains("FOOD"),
            ],
            outcome: PurposeCategory::FoodHotel,
        },
    ],
    fallback: PurposeCategory::General,
};

pub fn classify_purpose(full_text_upper: &str) -> PurposeCategory {
    PURPOSE_RULES.classify(full_text_upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Currency ──────────────────────────────────────────────────────────────

    #[test]
    fn inr_signals_take_precedence() {
        assert_eq!(classify_currency("TOTAL RS 500 INR TAX"), CurrencyCode::Inr);
        assert_eq!(classify_currency("PAID ₹ 120 USD"), CurrencyCode::Inr);
        assert_eq!(classify_currency("RS.450.00 $"), CurrencyCode::Inr);
    }

    #[test]
    fn usd_and_eur_detected() {
        assert_eq!(classify_currency("TOTAL USD 500"), CurrencyCode::Usd);
        assert_eq!(classify_currency("TOTAL $12.00"), CurrencyCode::Usd);
        assert_eq!(classify_currency("SUMME 12,00 €"), CurrencyCode::Eur);
        assert_eq!(classify_currency("AMOUNT EUR 9"), CurrencyCode::Eur);
    }

    #[test]
    fn usd_beats_eur() {
        assert_eq!(classify_currency("EUR 10 USD 11"), CurrencyCode::Usd);
    }

    #[test]
    fn no_signal_defaults_to_inr() {
        assert_eq!(classify_currency("TOTAL 500"), CurrencyCode::Inr);
        assert_eq!(classify_currency(""), CurrencyCode::Inr);
    }

    #[test]
    fn rs_anywhere_in_the_text_means_rupees() {
        assert_eq!(classify_currency("VOUCHERS USD"), CurrencyCode::Inr);
        assert_eq!(classify_currency("FIRST CLASS USD 40"), CurrencyCode::Inr);
        assert_eq!(classify_currency("HOURS 3 €"), CurrencyCode::Inr);
    }

    #[test]
    fn lower_case_input_is_tolerated() {
        assert_eq!(classify_currency("total usd 5"), CurrencyCode::Usd);
        assert_eq!(classify_purpose("city cafe"), PurposeCategory::FoodHotel);
    }

    #[test]
    fn each_currency_rule_matches_its_own_signals() {
        let expected = [CurrencyCode::Inr, CurrencyCode::Usd, CurrencyCode::Eur];
        for (rule, code) in CURRENCY_RULES.rules.iter().zip(expected) {
            assert_eq!(rule.outcome, code);
            assert!(rule.matches(code.as_str()));
        }
    }

    // ── Purpose ───────────────────────────────────────────────────────────────

    #[test]
    fn purpose_categories() {
        assert_eq!(classify_purpose("HPCL FUEL STATION RECEIPT"), PurposeCategory::Fuel);
        assert_eq!(classify_purpose("CITY CAFE BILL"), PurposeCategory::FoodHotel);
        assert_eq!(classify_purpose("RANDOM SHOP"), PurposeCategory::General);
        assert_eq!(classify_purpose("APOLLO PHARMACY"), PurposeCategory::Medical);
        assert_eq!(classify_purpose("CITY MEDICAL STORES"), PurposeCategory::Medical);
        assert_eq!(classify_purpose("DMART AVENUE"), PurposeCategory::DmartShopping);
        assert_eq!(classify_purpose("INDIAN OIL IOC"), PurposeCategory::Fuel);
        assert_eq!(classify_purpose("GRAND HOTEL"), PurposeCategory::FoodHotel);
    }

    #[test]
    fn first_matching_purpose_rule_wins() {
        // Medical outranks food; DMart outranks fuel.
        assert_eq!(classify_purpose("HOTEL PHARMACY"), PurposeCategory::Medical);
        assert_eq!(classify_purpose("DMART PETROL PUMP"), PurposeCategory::DmartShopping);
        assert_eq!(classify_purpose("FOOD COURT PETROL"), PurposeCategory::Fuel);
    }

    #[test]
    fn purpose_labels() {
        assert_eq!(PurposeCategory::Fuel.to_string(), "Fuel Reimbursement");
        assert_eq!(PurposeCategory::FoodHotel.label(), "Food/Hotel Expense");
        assert_eq!(PurposeCategory::General.label(), "General Reimbursement");
    }
}

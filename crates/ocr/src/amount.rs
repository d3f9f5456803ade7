use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use reimburse_core::Money;
use rust_decimal::Decimal;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

// 2–6 integer digits, a point, exactly two fractional digits. Unanchored, so
// "1234567.89" yields "234567.89" just like a leftmost scan would.
re!(re_amount, r"\d{2,6}\.\d{2}");
re!(re_digit, r"^\d$");

/// Labels that mark a line as carrying the document total (matched lower-case).
pub const TOTAL_KEYWORDS: &[&str] = &[
    "food total",
    "grand total",
    "net payable",
    "net amount",
    "invoice total",
    "amount to be paid",
    "total",
];

const PLAUSIBLE_MIN: i64 = 50;
const PLAUSIBLE_MAX: i64 = 99_999;

/// Recover the document total from reconstructed lines.
///
/// Labelled lines win: the largest plausible amount on any line mentioning a
/// total keyword. With no labelled candidate, the largest amount anywhere is
/// used, unbounded. No amount at all yields `0.00`.
pub fn extract_total<L: AsRef<str>>(lines: &[L]) -> Money {
    if let Some(best) = labelled_total(lines) {
        return best;
    }

    let joined = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    amounts_in(&joined)
        .max()
        .map(Money::from_decimal)
        .unwrap_or_else(Money::zero)
}

fn labelled_total<L: AsRef<str>>(lines: &[L]) -> Option<Money> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| mentions_total(line))
        .flat_map(amounts_in)
        .filter(|amount| is_plausible(*amount))
        .max()
        .map(Money::from_decimal)
}

pub fn mentions_total(line: &str) -> bool {
    let lower = line.to_lowercase();
    TOTAL_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Every amount-shaped substring of `text`, parsed exactly.
///
/// `\d` matches any Unicode decimal digit, so matches are folded to ASCII
/// before parsing.
pub fn amounts_in(text: &str) -> impl Iterator<Item = Decimal> + '_ {
    re_amount()
        .find_iter(text)
        .filter_map(|m| to_ascii_amount(m.as_str()))
        .filter_map(|ascii| Decimal::from_str(&ascii).ok())
}

fn to_ascii_amount(matched: &str) -> Option<String> {
    matched
        .chars()
        .map(|c| match c {
            '.' => Some('.'),
            _ => digit_value(c).and_then(|d| char::from_digit(d, 10)),
        })
        .collect()
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in contiguous runs of ten starting at zero, so
/// the value is the offset from the start of the run, modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut zero = c as u32;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    Some((c as u32 - zero) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    re_digit().is_match(c.encode_utf8(&mut buf))
}

fn is_plausible(amount: Decimal) -> bool {
    amount >= Decimal::from(PLAUSIBLE_MIN) && amount <= Decimal::from(PLAUSIBLE_MAX)
}

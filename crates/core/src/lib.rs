pub mod currency;
pub mod expense;
pub mod money;

pub use currency::CurrencyCode;
pub use expense::{ExpenseRecord, SubmitFlag, DEFAULT_PURPOSE};
pub use money::Money;

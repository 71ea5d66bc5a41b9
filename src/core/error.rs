use chrono::NaiveDate;
use thiserror::Error;

use super::types::ItemCategory;

/// Errors that can occur while resolving a rate or determining a VAT charge.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VatError {
    /// The date precedes every entry in the jurisdiction's rate history.
    #[error("no VAT rate known for {jurisdiction} on {date}")]
    InvalidDate {
        jurisdiction: String,
        date: NaiveDate,
    },

    /// The applicable rate entry has no rate for the item category.
    #[error("{category} is not covered by the {jurisdiction} rate schedule in effect on {date}")]
    UnsupportedCategory {
        jurisdiction: String,
        category: ItemCategory,
        date: NaiveDate,
    },

    /// An item category name is not recognized.
    #[error("unknown item category '{0}'")]
    UnknownCategory(String),

    /// Sales by non-business sellers are not supported.
    #[error("non-business sellers are not supported")]
    UnsupportedSeller,

    /// No charge rule is registered for the jurisdiction.
    #[error("no VAT rules registered for jurisdiction '{0}'")]
    UnsupportedJurisdiction(String),

    /// A rate table failed construction checks.
    #[error("invalid rate table: {0}")]
    InvalidRateTable(String),

    /// A rate table document could not be parsed.
    #[cfg(feature = "json")]
    #[error("rate table JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

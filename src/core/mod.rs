//! Core VAT types, jurisdiction codes, and errors.
//!
//! These are the values that flow through rate resolution and charge
//! determination: item categories, parties, sales, and the resulting
//! charge decision.

mod countries;
mod error;
mod types;

pub use countries::{
    EU_COUNTRY_CODES, is_eu_country, is_known_country_code, normalize_country_code,
};
pub use error::*;
pub use types::*;

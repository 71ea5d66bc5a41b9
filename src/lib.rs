//! # vatcharge
//!
//! VAT charge determination for cross-border sales within the EU.
//!
//! Given the date of a sale, the category of the item sold, and the
//! buyer and seller, decides whether VAT is charged, reverse-charged, or
//! not charged at all, in which jurisdiction, and at what rate. Rates come
//! from per-jurisdiction historical tables; the rules switch from origin
//! to destination taxation for consumer sales on 2015-01-01.
//!
//! All rates use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vatcharge::core::*;
//! use vatcharge::rules::RuleRegistry;
//! use rust_decimal_macros::dec;
//!
//! let registry = RuleRegistry::eu().unwrap();
//!
//! // German business sells goods to an Italian business: reverse charge.
//! let sale = Sale::new(
//!     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
//!     ItemCategory::GenericPhysicalGood,
//!     Party::business("IT"),
//!     Party::business("DE"),
//! );
//! let charge = registry.determine_charge(&sale).unwrap();
//! assert_eq!(charge.action, ChargeAction::ReverseCharge);
//! assert_eq!(charge.country_code, "IT");
//! assert_eq!(charge.rate, dec!(0));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Types, rate tables, charge rules, registry |
//! | `eu-rates` (default) | Compiled-in EU rate tables, `RuleRegistry::eu()` |
//! | `json` | Load rate tables from JSON documents |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod rates;

#[cfg(feature = "core")]
pub mod rules;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
#[cfg(feature = "core")]
pub use crate::rules::RuleRegistry;

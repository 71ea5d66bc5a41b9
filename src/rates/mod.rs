//! Historical VAT rate tables and rate resolution.
//!
//! A [`RateTable`] holds one jurisdiction's rate history; a
//! [`RateResolver`] picks the entry in force on a date and the rate for
//! an item category within it.
//!
//! ```
//! use chrono::NaiveDate;
//! use vatcharge::core::ItemCategory;
//! use vatcharge::rates::{RateEntry, RateResolver, RateTable};
//! use rust_decimal_macros::dec;
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//! let table = RateTable::new(vec![
//!     RateEntry::new(date(2014, 1, 1)).rate(ItemCategory::GenericPhysicalGood, dec!(20)),
//!     RateEntry::uniform(date(2015, 1, 1), dec!(20)).rate(ItemCategory::EBook, dec!(5.5)),
//! ])
//! .unwrap();
//! let fr = RateResolver::new("FR", table);
//!
//! assert_eq!(fr.resolve(ItemCategory::EBook, date(2016, 6, 1)).unwrap(), dec!(5.5));
//! assert!(fr.resolve(ItemCategory::EBook, date(2014, 6, 1)).is_err());
//! ```

#[cfg(feature = "eu-rates")]
mod eu;
mod resolver;
mod table;

#[cfg(feature = "eu-rates")]
pub use eu::eu_rate_tables;
pub use resolver::RateResolver;
pub use table::{RateEntry, RateTable};

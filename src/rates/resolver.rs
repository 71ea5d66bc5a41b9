use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::table::{RateEntry, RateTable};
use crate::core::{ItemCategory, VatError};

/// Resolves the rate in force for one jurisdiction on a given date.
#[derive(Debug, Clone)]
pub struct RateResolver {
    jurisdiction: String,
    table: RateTable,
}

impl RateResolver {
    pub fn new(jurisdiction: impl Into<String>, table: RateTable) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            table,
        }
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// The rate entry in force on `date`.
    ///
    /// Fails with [`VatError::InvalidDate`] when `date` predates the table.
    pub fn entry(&self, date: NaiveDate) -> Result<&RateEntry, VatError> {
        self.table.entry_for(date).ok_or_else(|| {
            tracing::trace!(jurisdiction = %self.jurisdiction, %date, "date predates rate history");
            VatError::InvalidDate {
                jurisdiction: self.jurisdiction.clone(),
                date,
            }
        })
    }

    /// Rate in percent for `category` on `date`.
    ///
    /// Fails with [`VatError::UnsupportedCategory`] when the entry in force
    /// does not list the category.
    pub fn resolve(&self, category: ItemCategory, date: NaiveDate) -> Result<Decimal, VatError> {
        self.entry(date)?.get(category).ok_or_else(|| {
            tracing::trace!(
                jurisdiction = %self.jurisdiction,
                %category,
                %date,
                "category not covered by rate entry"
            );
            VatError::UnsupportedCategory {
                jurisdiction: self.jurisdiction.clone(),
                category,
                date,
            }
        })
    }
}

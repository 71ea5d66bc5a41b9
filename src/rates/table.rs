//! Time-versioned rate tables.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{ItemCategory, VatError};

/// Rates in force from `valid_from` until the next entry of the same table.
///
/// An entry need not cover every category: schedules predating the 2015
/// rules usually only list physical goods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    pub valid_from: NaiveDate,
    /// Rate in percent per item category.
    pub rates: BTreeMap<ItemCategory, Decimal>,
}

impl RateEntry {
    pub fn new(valid_from: NaiveDate) -> Self {
        Self {
            valid_from,
            rates: BTreeMap::new(),
        }
    }

    /// Entry applying `rate` to every item category.
    pub fn uniform(valid_from: NaiveDate, rate: Decimal) -> Self {
        let mut entry = Self::new(valid_from);
        for category in ItemCategory::ALL {
            entry.rates.insert(category, rate);
        }
        entry
    }

    /// Set the rate for one category.
    pub fn rate(mut self, category: ItemCategory, rate: Decimal) -> Self {
        self.rates.insert(category, rate);
        self
    }

    pub fn get(&self, category: ItemCategory) -> Option<Decimal> {
        self.rates.get(&category).copied()
    }
}

/// Chronologically ordered rate history of one jurisdiction.
///
/// Construction sorts the entries and rejects duplicate effective dates,
/// so at most one entry is in force on any given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RateEntry>", into = "Vec<RateEntry>")]
pub struct RateTable {
    entries: Vec<RateEntry>,
}

impl RateTable {
    pub fn new(mut entries: Vec<RateEntry>) -> Result<Self, VatError> {
        if entries.is_empty() {
            return Err(VatError::InvalidRateTable("table has no entries".into()));
        }
        entries.sort_by_key(|e| e.valid_from);

        if let Some(pair) = entries
            .windows(2)
            .find(|w| w[0].valid_from == w[1].valid_from)
        {
            return Err(VatError::InvalidRateTable(format!(
                "two entries take effect on {}",
                pair[0].valid_from
            )));
        }

        for entry in &entries {
            if let Some((category, rate)) = entry.rates.iter().find(|(_, r)| r.is_sign_negative()) {
                return Err(VatError::InvalidRateTable(format!(
                    "negative rate {rate} for {category} from {}",
                    entry.valid_from
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Parse a table from a JSON array of entries.
    ///
    /// ```json
    /// [{ "valid_from": "2015-01-01", "rates": { "ebook": "5.5" } }]
    /// ```
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, VatError> {
        let entries: Vec<RateEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    /// Date from which the table has any rates at all.
    pub fn earliest(&self) -> NaiveDate {
        self.entries[0].valid_from
    }

    /// The latest entry taking effect on or before `date`.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&RateEntry> {
        let idx = self.entries.partition_point(|e| e.valid_from <= date);
        idx.checked_sub(1).map(|i| &self.entries[i])
    }
}

impl TryFrom<Vec<RateEntry>> for RateTable {
    type Error = VatError;

    fn try_from(entries: Vec<RateEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<RateTable> for Vec<RateEntry> {
    fn from(table: RateTable) -> Self {
        table.entries
    }
}

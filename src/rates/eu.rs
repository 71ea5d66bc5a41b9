//! Compiled-in EU rate schedules.
//!
//! Standard and reduced rates per member state as published by the
//! European Commission ("VAT rates applied in the Member States", status
//! January 1st, 2017). Entries dated 2015-01-01 introduce the
//! telecommunications, broadcasting and electronic service categories for
//! states whose earlier schedules only covered physical goods.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::table::{RateEntry, RateTable};
use crate::core::ItemCategory::{self, *};
use crate::core::VatError;

type RawEntry = ((i32, u32, u32), &'static [(ItemCategory, Decimal)]);

const fn all(rate: Decimal) -> [(ItemCategory, Decimal); 7] {
    [
        (GenericPhysicalGood, rate),
        (GenericElectronicService, rate),
        (GenericTelecommunicationsService, rate),
        (GenericBroadcastingService, rate),
        (PrepaidBroadcastingService, rate),
        (EBook, rate),
        (ENewspaper, rate),
    ]
}

const fn goods(rate: Decimal) -> [(ItemCategory, Decimal); 1] {
    [(GenericPhysicalGood, rate)]
}

static EU_RATES: &[(&str, &[RawEntry])] = &[
    ("AT", &[
        ((2002, 1, 1), &goods(dec!(20.0))),
        ((2015, 1, 1), &[
            (GenericPhysicalGood, dec!(20.0)),
            (GenericElectronicService, dec!(20.0)),
            (GenericTelecommunicationsService, dec!(20.0)),
            (GenericBroadcastingService, dec!(20.0)),
            (PrepaidBroadcastingService, dec!(10.0)),
            (EBook, dec!(20.0)),
            (ENewspaper, dec!(20.0)),
        ]),
    ]),
    ("BE", &[
        ((2002, 1, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("BG", &[
        ((2002, 1, 1), &goods(dec!(20.0))),
        ((2015, 1, 1), &all(dec!(20.0))),
    ]),
    ("CY", &[
        ((2014, 1, 13), &all(dec!(19.0))),
    ]),
    ("CZ", &[
        ((2013, 1, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("DE", &[
        ((2007, 1, 1), &all(dec!(19.0))),
    ]),
    ("DK", &[
        ((2002, 1, 1), &all(dec!(25.0))),
    ]),
    ("EE", &[
        ((2009, 7, 1), &all(dec!(20.0))),
    ]),
    ("ES", &[
        ((2012, 9, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("FI", &[
        ((2013, 1, 1), &all(dec!(24.0))),
    ]),
    ("FR", &[
        ((2014, 1, 1), &goods(dec!(20.0))),
        ((2015, 1, 1), &[
            (GenericPhysicalGood, dec!(20.0)),
            (GenericElectronicService, dec!(20.0)),
            (GenericTelecommunicationsService, dec!(20.0)),
            (GenericBroadcastingService, dec!(10.0)),
            (PrepaidBroadcastingService, dec!(10.0)),
            (EBook, dec!(5.5)),
            (ENewspaper, dec!(2.1)),
        ]),
    ]),
    ("GB", &[
        ((2011, 1, 4), &goods(dec!(20.0))),
        ((2015, 1, 1), &all(dec!(20.0))),
    ]),
    ("GR", &[
        ((2010, 7, 1), &all(dec!(23.0))),
        ((2016, 6, 1), &all(dec!(24.0))),
    ]),
    ("HR", &[
        ((2012, 3, 1), &all(dec!(25.0))),
    ]),
    ("HU", &[
        ((2012, 1, 1), &all(dec!(27.0))),
    ]),
    ("IE", &[
        ((2012, 1, 1), &goods(dec!(23.0))),
        ((2015, 1, 1), &all(dec!(23.0))),
    ]),
    ("IT", &[
        ((2013, 1, 1), &all(dec!(22.0))),
        ((2015, 1, 1), &[
            (GenericPhysicalGood, dec!(22.0)),
            (GenericElectronicService, dec!(22.0)),
            (GenericTelecommunicationsService, dec!(22.0)),
            (GenericBroadcastingService, dec!(22.0)),
            (PrepaidBroadcastingService, dec!(22.0)),
            (EBook, dec!(4.0)),
            (ENewspaper, dec!(22.0)),
        ]),
    ]),
    ("LT", &[
        ((2009, 9, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("LU", &[
        ((2006, 1, 1), &[(GenericBroadcastingService, dec!(3.0)), (EBook, dec!(3.0))]),
        ((2015, 1, 1), &[
            (GenericPhysicalGood, dec!(17.0)),
            (GenericElectronicService, dec!(17.0)),
            (GenericTelecommunicationsService, dec!(17.0)),
            (GenericBroadcastingService, dec!(3.0)),
            (PrepaidBroadcastingService, dec!(3.0)),
            (EBook, dec!(17.0)),
            (ENewspaper, dec!(17.0)),
        ]),
    ]),
    ("LV", &[
        ((2012, 7, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("MT", &[
        ((2002, 1, 1), &goods(dec!(18.0))),
        ((2015, 1, 1), &all(dec!(18.0))),
    ]),
    ("NL", &[
        ((2012, 10, 1), &goods(dec!(21.0))),
        ((2015, 1, 1), &all(dec!(21.0))),
    ]),
    ("PL", &[
        ((2011, 1, 1), &[
            (GenericPhysicalGood, dec!(23.0)),
            (GenericElectronicService, dec!(23.0)),
            (GenericTelecommunicationsService, dec!(23.0)),
            (GenericBroadcastingService, dec!(8.0)),
            (PrepaidBroadcastingService, dec!(8.0)),
            (EBook, dec!(23.0)),
            (ENewspaper, dec!(23.0)),
        ]),
    ]),
    ("PT", &[
        ((2011, 1, 1), &goods(dec!(23.0))),
        ((2015, 1, 1), &all(dec!(23.0))),
    ]),
    ("RO", &[
        ((2010, 7, 1), &all(dec!(24.0))),
        ((2016, 1, 1), &all(dec!(20.0))),
        ((2017, 1, 1), &all(dec!(19.0))),
    ]),
    ("SE", &[
        ((2002, 1, 1), &goods(dec!(25.0))),
        ((2015, 1, 1), &all(dec!(25.0))),
    ]),
    ("SI", &[
        ((2013, 7, 1), &all(dec!(22.0))),
    ]),
    ("SK", &[
        ((2010, 1, 1), &goods(dec!(20.0))),
        ((2015, 1, 1), &all(dec!(20.0))),
    ]),
];

/// Build the rate table of every EU member state, keyed by country code.
pub fn eu_rate_tables() -> Result<Vec<(&'static str, RateTable)>, VatError> {
    EU_RATES
        .iter()
        .map(|(code, raw)| -> Result<(&'static str, RateTable), VatError> {
            let entries = raw
                .iter()
                .map(|&((y, m, d), rates)| -> Result<RateEntry, VatError> {
                    let valid_from = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| {
                        VatError::InvalidRateTable(format!("{code}: bad date {y}-{m}-{d}"))
                    })?;
                    Ok(rates
                        .iter()
                        .fold(RateEntry::new(valid_from), |entry, &(category, rate)| {
                            entry.rate(category, rate)
                        }))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((*code, RateTable::new(entries)?))
        })
        .collect()
}

//! Cross-border charge rules shared by every jurisdiction.
//!
//! Each jurisdiction gets a [`ChargeRule`] wrapping its own
//! [`RateResolver`]; the decision logic itself is identical for all of
//! them and only differs in the rates it looks up.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{Charge, ItemCategory, Sale, VatError};
use crate::rates::{RateResolver, RateTable};

/// Result of applying a buyer-side rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule governs the sale.
    Charge(Charge),
    /// The rule does not govern the sale; the seller's rule decides.
    NotApplicable,
}

/// Access to other jurisdictions, needed when a sale crosses a border.
pub trait Jurisdictions {
    /// Whether `code` lies inside the trade area the cross-border rules cover.
    fn in_trade_area(&self, code: &str) -> bool;

    /// Rate resolver registered for `code`.
    fn resolver(&self, code: &str) -> Option<&RateResolver>;
}

/// VAT charge rules of one jurisdiction.
#[derive(Debug, Clone)]
pub struct ChargeRule {
    resolver: RateResolver,
}

impl ChargeRule {
    pub fn new(jurisdiction: impl Into<String>, table: RateTable) -> Self {
        Self {
            resolver: RateResolver::new(jurisdiction, table),
        }
    }

    pub fn jurisdiction(&self) -> &str {
        self.resolver.jurisdiction()
    }

    pub fn resolver(&self) -> &RateResolver {
        &self.resolver
    }

    /// This jurisdiction's rate for `category` on `date`.
    pub fn rate(&self, category: ItemCategory, date: NaiveDate) -> Result<Decimal, VatError> {
        self.resolver.resolve(category, date)
    }

    /// Charge for a sale to a buyer residing in this jurisdiction.
    ///
    /// Returns [`RuleOutcome::NotApplicable`] for cross-border consumer
    /// sales before 2015, which were taxed at origin.
    pub fn sale_to_country(&self, sale: &Sale) -> Result<RuleOutcome, VatError> {
        if !sale.seller.is_business {
            return Err(VatError::UnsupportedSeller);
        }

        if sale.is_domestic() || (!sale.buyer.is_business && sale.is_post_cutover()) {
            let rate = self.rate(sale.category, sale.date)?;
            return Ok(RuleOutcome::Charge(Charge::charge(
                sale.buyer.country_code.as_str(),
                rate,
            )));
        }

        if !sale.buyer.is_business {
            return Ok(RuleOutcome::NotApplicable);
        }

        Ok(RuleOutcome::Charge(Charge::reverse_charge(
            sale.buyer.country_code.as_str(),
        )))
    }

    /// Charge for a sale by a seller residing in this jurisdiction.
    ///
    /// `others` supplies the trade area and, for consumer sales taxed at
    /// destination, the buyer jurisdiction's rates.
    pub fn sale_from_country(
        &self,
        sale: &Sale,
        others: &impl Jurisdictions,
    ) -> Result<Charge, VatError> {
        if !sale.seller.is_business {
            return Err(VatError::UnsupportedSeller);
        }

        let buyer_code = sale.buyer.country_code.as_str();

        // Export: outside the scope of the regime.
        if !others.in_trade_area(buyer_code) {
            return Ok(Charge::no_charge(buyer_code));
        }

        if sale.is_domestic() {
            let rate = self.rate(sale.category, sale.date)?;
            return Ok(Charge::charge(sale.seller.country_code.as_str(), rate));
        }

        if sale.buyer.is_business {
            return Ok(Charge::reverse_charge(buyer_code));
        }

        if sale.is_post_cutover() {
            let buyer_rates = others
                .resolver(buyer_code)
                .ok_or_else(|| VatError::UnsupportedJurisdiction(buyer_code.to_string()))?;
            let rate = buyer_rates.resolve(sale.category, sale.date)?;
            Ok(Charge::charge(buyer_code, rate))
        } else {
            let rate = self.rate(sale.category, sale.date)?;
            Ok(Charge::charge(sale.seller.country_code.as_str(), rate))
        }
    }
}

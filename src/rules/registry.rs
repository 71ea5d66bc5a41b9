use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::charge::{ChargeRule, Jurisdictions, RuleOutcome};
use crate::core::{
    Charge, ItemCategory, Sale, VatError, is_known_country_code, normalize_country_code,
};
use crate::rates::{RateResolver, RateTable};

/// Charge rules of every supported jurisdiction, keyed by country code.
///
/// Built once through [`RuleRegistry::builder`] (or [`RuleRegistry::eu`])
/// and immutable afterwards, so one instance can be shared freely across
/// threads.
///
/// ```
/// use chrono::NaiveDate;
/// use vatcharge::core::*;
/// use vatcharge::rules::RuleRegistry;
/// use rust_decimal_macros::dec;
///
/// let registry = RuleRegistry::eu().unwrap();
/// let sale = Sale::new(
///     NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
///     ItemCategory::EBook,
///     Party::consumer("FR"),
///     Party::business("DE"),
/// );
/// let charge = registry.determine_charge(&sale).unwrap();
/// assert_eq!(charge, Charge::charge("FR", dec!(5.5)));
/// ```
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: BTreeMap<String, ChargeRule>,
    trade_area: BTreeSet<String>,
}

impl RuleRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry of all EU member states with the compiled-in rate tables.
    #[cfg(feature = "eu-rates")]
    pub fn eu() -> Result<Self, VatError> {
        let mut builder =
            Self::builder().trade_area(crate::core::EU_COUNTRY_CODES.iter().copied());
        for (code, table) in crate::rates::eu_rate_tables()? {
            builder = builder.rule(code, table);
        }
        builder.build()
    }

    /// Rule of `code`. Codes are matched case-insensitively.
    pub fn rule(&self, code: &str) -> Option<&ChargeRule> {
        self.rules.get(normalize_country_code(code).as_ref())
    }

    /// Codes of all jurisdictions with a registered rule, sorted.
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn in_trade_area(&self, code: &str) -> bool {
        self.trade_area.contains(normalize_country_code(code).as_ref())
    }

    /// Rate of `code` for `category` on `date`.
    pub fn rate(
        &self,
        code: &str,
        category: ItemCategory,
        date: NaiveDate,
    ) -> Result<Decimal, VatError> {
        let code = normalize_country_code(code);
        self.rules
            .get(code.as_ref())
            .ok_or_else(|| VatError::UnsupportedJurisdiction(code.into_owned()))?
            .rate(category, date)
    }

    /// Determine the VAT charge for a sale.
    ///
    /// The buyer's jurisdiction is consulted first; only when its rule
    /// reports [`RuleOutcome::NotApplicable`] (or no rule is registered for
    /// it) does the seller's jurisdiction decide. Any error from the buyer's
    /// rule is returned as is. Country codes of hand-built parties are
    /// normalized first, so the charge always carries an upper-case code.
    pub fn determine_charge(&self, sale: &Sale) -> Result<Charge, VatError> {
        let sale = sale.normalized();
        let sale = sale.as_ref();
        let buyer_code = sale.buyer.country_code.as_str();
        let seller_code = sale.seller.country_code.as_str();

        let seller_rule = self
            .rule(seller_code)
            .ok_or_else(|| VatError::UnsupportedJurisdiction(seller_code.to_string()))?;

        if let Some(buyer_rule) = self.rule(buyer_code) {
            match buyer_rule.sale_to_country(sale)? {
                RuleOutcome::Charge(charge) => {
                    tracing::debug!(
                        buyer = buyer_code,
                        seller = seller_code,
                        action = charge.action.as_str(),
                        "charge decided by buyer jurisdiction"
                    );
                    return Ok(charge);
                }
                RuleOutcome::NotApplicable => {
                    tracing::debug!(
                        buyer = buyer_code,
                        seller = seller_code,
                        "buyer rule not applicable, falling back to seller jurisdiction"
                    );
                }
            }
        }

        let charge = seller_rule.sale_from_country(sale, self)?;
        tracing::debug!(
            buyer = buyer_code,
            seller = seller_code,
            action = charge.action.as_str(),
            "charge decided by seller jurisdiction"
        );
        Ok(charge)
    }
}

impl Jurisdictions for RuleRegistry {
    fn in_trade_area(&self, code: &str) -> bool {
        RuleRegistry::in_trade_area(self, code)
    }

    fn resolver(&self, code: &str) -> Option<&RateResolver> {
        self.rule(code).map(ChargeRule::resolver)
    }
}

/// Builder for a [`RuleRegistry`].
///
/// Problems are collected and reported by [`RegistryBuilder::build`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<(String, RateTable)>,
    trade_area: Option<Vec<String>>,
    errors: Vec<VatError>,
}

impl RegistryBuilder {
    /// Jurisdictions inside which the cross-border rules apply.
    ///
    /// Defaults to the set of jurisdictions with a registered rule.
    pub fn trade_area<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.trade_area = Some(
            codes
                .into_iter()
                .map(|c| normalize_country_code(c.as_ref()).into_owned())
                .collect(),
        );
        self
    }

    /// Register the rate table of one jurisdiction.
    pub fn rule(mut self, code: impl AsRef<str>, table: RateTable) -> Self {
        self.rules
            .push((normalize_country_code(code.as_ref()).into_owned(), table));
        self
    }

    /// Register a jurisdiction from a JSON rate table document.
    #[cfg(feature = "json")]
    pub fn rule_from_json(mut self, code: impl AsRef<str>, json: &str) -> Self {
        match RateTable::from_json(json) {
            Ok(table) => self.rule(code, table),
            Err(e) => {
                self.errors.push(e);
                self
            }
        }
    }

    pub fn build(self) -> Result<RuleRegistry, VatError> {
        if let Some(e) = self.errors.into_iter().next() {
            return Err(e);
        }

        let mut rules = BTreeMap::new();
        for (code, table) in self.rules {
            if !is_known_country_code(&code) {
                return Err(VatError::UnsupportedJurisdiction(code));
            }
            if rules.contains_key(&code) {
                return Err(VatError::InvalidRateTable(format!(
                    "{code} registered more than once"
                )));
            }
            rules.insert(code.clone(), ChargeRule::new(code, table));
        }

        let trade_area = match self.trade_area {
            Some(codes) => {
                if let Some(code) = codes.iter().find(|c| !is_known_country_code(c)) {
                    return Err(VatError::UnsupportedJurisdiction(code.clone()));
                }
                codes.into_iter().collect()
            }
            None => rules.keys().cloned().collect(),
        };

        Ok(RuleRegistry { rules, trade_area })
    }
}

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::countries::normalize_country_code;
use super::error::VatError;

/// First day of destination-based taxation for consumer sales of
/// telecommunications, broadcasting and electronic services in the EU.
pub const DESTINATION_PRINCIPLE_START: NaiveDate = match NaiveDate::from_ymd_opt(2015, 1, 1) {
    Some(d) => d,
    None => panic!("invalid cutover date"),
};

/// Category of the item being sold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Any physical good.
    GenericPhysicalGood,
    /// Electronically supplied service.
    GenericElectronicService,
    /// Telecommunications service.
    GenericTelecommunicationsService,
    /// Radio or television broadcasting service.
    GenericBroadcastingService,
    /// Broadcasting service paid for in advance.
    PrepaidBroadcastingService,
    /// Electronic book.
    #[serde(rename = "ebook")]
    EBook,
    /// Electronic newspaper or periodical.
    #[serde(rename = "enewspaper")]
    ENewspaper,
}

impl ItemCategory {
    /// Every category, in declaration order.
    pub const ALL: [ItemCategory; 7] = [
        Self::GenericPhysicalGood,
        Self::GenericElectronicService,
        Self::GenericTelecommunicationsService,
        Self::GenericBroadcastingService,
        Self::PrepaidBroadcastingService,
        Self::EBook,
        Self::ENewspaper,
    ];

    /// Stable wire name, as used in rate table documents.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GenericPhysicalGood => "generic_physical_good",
            Self::GenericElectronicService => "generic_electronic_service",
            Self::GenericTelecommunicationsService => "generic_telecommunications_service",
            Self::GenericBroadcastingService => "generic_broadcasting_service",
            Self::PrepaidBroadcastingService => "prepaid_broadcasting_service",
            Self::EBook => "ebook",
            Self::ENewspaper => "enewspaper",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemCategory {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| VatError::UnknownCategory(s.to_string()))
    }
}

/// Buyer or seller in a sale.
///
/// Deserialization goes through [`Party::new`], so codes read from
/// documents are normalized like constructed ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawParty")]
pub struct Party {
    /// Country of residence (ISO 3166-1 alpha-2, upper case).
    pub country_code: String,
    /// Whether the party is a business rather than a consumer.
    pub is_business: bool,
}

impl Party {
    pub fn new(country_code: impl AsRef<str>, is_business: bool) -> Self {
        Self {
            country_code: normalize_country_code(country_code.as_ref()).into_owned(),
            is_business,
        }
    }

    pub fn business(country_code: impl AsRef<str>) -> Self {
        Self::new(country_code, true)
    }

    pub fn consumer(country_code: impl AsRef<str>) -> Self {
        Self::new(country_code, false)
    }

    fn is_normalized(&self) -> bool {
        matches!(normalize_country_code(&self.country_code), Cow::Borrowed(_))
    }
}

#[derive(Deserialize)]
struct RawParty {
    country_code: String,
    is_business: bool,
}

impl From<RawParty> for Party {
    fn from(raw: RawParty) -> Self {
        Self::new(raw.country_code, raw.is_business)
    }
}

/// One sale for which a VAT charge is to be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Date of the sale (tax point).
    pub date: NaiveDate,
    /// Category of the item sold.
    pub category: ItemCategory,
    pub buyer: Party,
    pub seller: Party,
}

impl Sale {
    pub fn new(date: NaiveDate, category: ItemCategory, buyer: Party, seller: Party) -> Self {
        Self {
            date,
            category,
            buyer,
            seller,
        }
    }

    /// Buyer and seller reside in the same jurisdiction.
    pub fn is_domestic(&self) -> bool {
        self.buyer.country_code == self.seller.country_code
    }

    /// The sale with both parties' country codes normalized.
    ///
    /// Borrows when the codes already are, which is the case for any sale
    /// built from [`Party::new`] or deserialized.
    pub fn normalized(&self) -> Cow<'_, Sale> {
        if self.buyer.is_normalized() && self.seller.is_normalized() {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(Sale {
                buyer: Party::new(&self.buyer.country_code, self.buyer.is_business),
                seller: Party::new(&self.seller.country_code, self.seller.is_business),
                ..self.clone()
            })
        }
    }

    /// The sale falls under the destination principle for consumers.
    pub fn is_post_cutover(&self) -> bool {
        self.date >= DESTINATION_PRINCIPLE_START
    }
}

/// What the seller has to do about VAT on a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeAction {
    /// Seller charges VAT.
    Charge,
    /// Buyer self-assesses VAT; seller charges nothing.
    ReverseCharge,
    /// Sale is outside the scope of VAT (e.g. export).
    NoCharge,
}

impl ChargeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::ReverseCharge => "reverse_charge",
            Self::NoCharge => "no_charge",
        }
    }
}

/// Outcome of a VAT charge determination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Charge {
    pub action: ChargeAction,
    /// Jurisdiction whose VAT applies (or the buyer's, for exports).
    pub country_code: String,
    /// Rate in percent. Zero for reverse charge and no charge.
    pub rate: Decimal,
}

impl Charge {
    pub fn charge(country_code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            action: ChargeAction::Charge,
            country_code: country_code.into(),
            rate,
        }
    }

    pub fn reverse_charge(country_code: impl Into<String>) -> Self {
        Self {
            action: ChargeAction::ReverseCharge,
            country_code: country_code.into(),
            rate: Decimal::ZERO,
        }
    }

    pub fn no_charge(country_code: impl Into<String>) -> Self {
        Self {
            action: ChargeAction::NoCharge,
            country_code: country_code.into(),
            rate: Decimal::ZERO,
        }
    }

    /// VAT amount on `net`, rounded half-up to 2 decimal places.
    pub fn tax_on(&self, net: Decimal) -> Decimal {
        match self.action {
            ChargeAction::Charge => (net * self.rate / dec!(100))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            ChargeAction::ReverseCharge | ChargeAction::NoCharge => Decimal::ZERO,
        }
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}%",
            self.action.as_str(),
            self.country_code,
            self.rate.normalize()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_round_trip() {
        for category in ItemCategory::ALL {
            assert_eq!(category.name().parse::<ItemCategory>().unwrap(), category);
        }
        assert!(matches!(
            "paper_book".parse::<ItemCategory>(),
            Err(VatError::UnknownCategory(name)) if name == "paper_book"
        ));
    }

    #[test]
    fn category_serde_names_match_display() {
        let json = serde_json::to_string(&ItemCategory::EBook).unwrap();
        assert_eq!(json, "\"ebook\"");
        let json = serde_json::to_string(&ItemCategory::PrepaidBroadcastingService).unwrap();
        assert_eq!(json, "\"prepaid_broadcasting_service\"");
    }

    #[test]
    fn party_code_normalized() {
        let p = Party::consumer(" fr ");
        assert_eq!(p.country_code, "FR");
        assert!(!p.is_business);
        assert!(Party::business("de").is_business);
    }

    #[test]
    fn deserialized_party_is_normalized() {
        let party: Party =
            serde_json::from_str(r#"{"country_code":" fr","is_business":false}"#).unwrap();
        assert_eq!(party, Party::consumer("FR"));
    }

    #[test]
    fn sale_normalized_fixes_hand_built_parties() {
        let sale = Sale::new(
            NaiveDate::from_ymd_opt(2016, 6, 1).unwrap(),
            ItemCategory::EBook,
            Party {
                country_code: "fr".into(),
                is_business: false,
            },
            Party::business("DE"),
        );
        let normalized = sale.normalized();
        assert!(matches!(normalized, Cow::Owned(_)));
        assert_eq!(normalized.buyer.country_code, "FR");

        let clean = Sale::new(
            sale.date,
            sale.category,
            Party::consumer("FR"),
            Party::business("DE"),
        );
        assert!(matches!(clean.normalized(), Cow::Borrowed(_)));
    }

    #[test]
    fn cutover_boundary() {
        let sale = |d| {
            Sale::new(
                d,
                ItemCategory::EBook,
                Party::consumer("FR"),
                Party::business("DE"),
            )
        };
        assert!(!sale(NaiveDate::from_ymd_opt(2014, 12, 31).unwrap()).is_post_cutover());
        assert!(sale(DESTINATION_PRINCIPLE_START).is_post_cutover());
    }

    #[test]
    fn tax_on_rounds_half_up() {
        let c = Charge::charge("DE", dec!(19));
        // 10.50 * 0.19 = 1.995
        assert_eq!(c.tax_on(dec!(10.50)), dec!(2.00));
        assert_eq!(Charge::reverse_charge("IT").tax_on(dec!(100)), dec!(0));
        assert_eq!(Charge::no_charge("US").tax_on(dec!(100)), dec!(0));
    }

    #[test]
    fn display_normalizes_rate() {
        assert_eq!(Charge::charge("FR", dec!(5.5)).to_string(), "charge FR 5.5%");
        assert_eq!(Charge::charge("GB", dec!(20.0)).to_string(), "charge GB 20%");
        assert_eq!(Charge::reverse_charge("IT").to_string(), "reverse_charge IT 0%");
    }
}

#![cfg(feature = "eu-rates")]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use vatcharge::core::*;
use vatcharge::rules::{RuleOutcome, RuleRegistry};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn registry() -> RuleRegistry {
    RuleRegistry::eu().unwrap()
}

fn determine(d: NaiveDate, category: ItemCategory, buyer: Party, seller: Party) -> Charge {
    registry()
        .determine_charge(&Sale::new(d, category, buyer, seller))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn ebook_de_to_french_consumer_2016() {
    let charge = determine(
        date(2016, 6, 1),
        ItemCategory::EBook,
        Party::consumer("FR"),
        Party::business("DE"),
    );
    assert_eq!(charge.action, ChargeAction::Charge);
    assert_eq!(charge.country_code, "FR");
    assert_eq!(charge.rate, dec!(5.5));
}

#[test]
fn goods_de_to_italian_business_2016() {
    let charge = determine(
        date(2016, 1, 1),
        ItemCategory::GenericPhysicalGood,
        Party::business("IT"),
        Party::business("DE"),
    );
    assert_eq!(charge, Charge::reverse_charge("IT"));
}

#[test]
fn goods_gb_domestic_consumer_2020() {
    let charge = determine(
        date(2020, 1, 1),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("GB"),
        Party::business("GB"),
    );
    assert_eq!(charge, Charge::charge("GB", dec!(20.0)));
}

#[test]
fn goods_lu_to_consumer_outside_area_any_date() {
    for d in [date(1999, 1, 1), date(2010, 5, 5), date(2015, 1, 1), date(2024, 12, 31)] {
        let charge = determine(
            d,
            ItemCategory::GenericPhysicalGood,
            Party::consumer("US"),
            Party::business("LU"),
        );
        assert_eq!(charge.action, ChargeAction::NoCharge);
        assert_eq!(charge.rate, dec!(0));
        assert_eq!(charge.country_code, "US");
    }
}

// ---------------------------------------------------------------------------
// Rendered charges
// ---------------------------------------------------------------------------

#[test]
fn rendered_charges() {
    let reg = registry();
    let render = |d, category, buyer, seller| {
        reg.determine_charge(&Sale::new(d, category, buyer, seller))
            .unwrap()
            .to_string()
    };

    insta::assert_snapshot!(
        render(date(2016, 6, 1), ItemCategory::EBook, Party::consumer("FR"), Party::business("DE")),
        @"charge FR 5.5%"
    );
    insta::assert_snapshot!(
        render(date(2016, 6, 1), ItemCategory::ENewspaper, Party::consumer("FR"), Party::business("IT")),
        @"charge FR 2.1%"
    );
    insta::assert_snapshot!(
        render(date(2014, 6, 1), ItemCategory::GenericPhysicalGood, Party::consumer("FR"), Party::business("DE")),
        @"charge DE 19%"
    );
    insta::assert_snapshot!(
        render(date(2016, 6, 1), ItemCategory::GenericElectronicService, Party::business("AT"), Party::business("NL")),
        @"reverse_charge AT 0%"
    );
    insta::assert_snapshot!(
        render(date(2016, 6, 1), ItemCategory::EBook, Party::business("CH"), Party::business("SE")),
        @"no_charge CH 0%"
    );
}

// ---------------------------------------------------------------------------
// Destination vs. origin around the 2015 cutover
// ---------------------------------------------------------------------------

#[test]
fn consumer_sale_day_before_cutover_taxed_at_origin() {
    let charge = determine(
        date(2014, 12, 31),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("HU"),
        Party::business("DE"),
    );
    assert_eq!(charge, Charge::charge("DE", dec!(19.0)));
}

#[test]
fn consumer_sale_on_cutover_taxed_at_destination() {
    let charge = determine(
        DESTINATION_PRINCIPLE_START,
        ItemCategory::GenericPhysicalGood,
        Party::consumer("HU"),
        Party::business("DE"),
    );
    assert_eq!(charge, Charge::charge("HU", dec!(27.0)));
}

#[test]
fn prepaid_broadcasting_uses_reduced_rate() {
    let charge = determine(
        date(2016, 3, 1),
        ItemCategory::PrepaidBroadcastingService,
        Party::consumer("AT"),
        Party::business("BE"),
    );
    assert_eq!(charge, Charge::charge("AT", dec!(10.0)));
}

#[test]
fn italian_ebook_rate() {
    let charge = determine(
        date(2015, 7, 1),
        ItemCategory::EBook,
        Party::consumer("IT"),
        Party::business("IE"),
    );
    assert_eq!(charge, Charge::charge("IT", dec!(4.0)));
}

#[test]
fn rate_change_within_destination_regime() {
    let before = determine(
        date(2016, 5, 31),
        ItemCategory::EBook,
        Party::consumer("GR"),
        Party::business("DE"),
    );
    let after = determine(
        date(2016, 6, 1),
        ItemCategory::EBook,
        Party::consumer("GR"),
        Party::business("DE"),
    );
    assert_eq!(before.rate, dec!(23.0));
    assert_eq!(after.rate, dec!(24.0));
}

#[test]
fn business_buyer_reverse_charged_before_cutover() {
    let charge = determine(
        date(2013, 3, 1),
        ItemCategory::GenericPhysicalGood,
        Party::business("FR"),
        Party::business("PL"),
    );
    assert_eq!(charge, Charge::reverse_charge("FR"));
}

#[test]
fn export_to_business_not_charged() {
    let charge = determine(
        date(2018, 1, 1),
        ItemCategory::GenericTelecommunicationsService,
        Party::business("NO"),
        Party::business("DK"),
    );
    assert_eq!(charge, Charge::no_charge("NO"));
}

#[test]
fn lowercase_codes_accepted() {
    let charge = determine(
        date(2016, 6, 1),
        ItemCategory::EBook,
        Party::consumer("fr"),
        Party::business("de"),
    );
    assert_eq!(charge, Charge::charge("FR", dec!(5.5)));
}

#[test]
fn deserialized_lowercase_buyer_charged_at_destination() {
    let buyer: Party =
        serde_json::from_str(r#"{"country_code":"fr","is_business":false}"#).unwrap();
    let charge = determine(
        date(2016, 6, 1),
        ItemCategory::EBook,
        buyer,
        Party::business("DE"),
    );
    assert_eq!(charge, Charge::charge("FR", dec!(5.5)));
}

#[test]
fn deserialized_lowercase_sale_charged_at_destination() {
    let sale: Sale = serde_json::from_str(
        r#"{
            "date": "2016-06-01",
            "category": "ebook",
            "buyer": {"country_code": "fr", "is_business": false},
            "seller": {"country_code": "de", "is_business": true}
        }"#,
    )
    .unwrap();
    assert_eq!(sale.buyer.country_code, "FR");
    assert_eq!(
        registry().determine_charge(&sale).unwrap(),
        Charge::charge("FR", dec!(5.5))
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn consumer_seller_unsupported() {
    let result = registry().determine_charge(&Sale::new(
        date(2016, 1, 1),
        ItemCategory::EBook,
        Party::consumer("FR"),
        Party::consumer("DE"),
    ));
    assert!(matches!(result, Err(VatError::UnsupportedSeller)));
}

#[test]
fn seller_outside_area_unsupported() {
    let result = registry().determine_charge(&Sale::new(
        date(2016, 1, 1),
        ItemCategory::EBook,
        Party::consumer("DE"),
        Party::business("US"),
    ));
    assert!(matches!(result, Err(VatError::UnsupportedJurisdiction(c)) if c == "US"));
}

#[test]
fn domestic_sale_before_history_invalid_date() {
    let result = registry().determine_charge(&Sale::new(
        date(2013, 12, 31),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("FR"),
        Party::business("FR"),
    ));
    assert!(matches!(result, Err(VatError::InvalidDate { jurisdiction, .. }) if jurisdiction == "FR"));
}

#[test]
fn digital_service_before_category_existed() {
    let result = registry().determine_charge(&Sale::new(
        date(2014, 6, 1),
        ItemCategory::GenericElectronicService,
        Party::consumer("FR"),
        Party::business("FR"),
    ));
    assert!(matches!(
        result,
        Err(VatError::UnsupportedCategory { category: ItemCategory::GenericElectronicService, .. })
    ));
}

#[test]
fn luxembourg_goods_before_2015_unsupported() {
    // Origin-based consumer sale: the seller's early schedule lists no goods rate.
    let result = registry().determine_charge(&Sale::new(
        date(2010, 6, 1),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("BE"),
        Party::business("LU"),
    ));
    assert!(matches!(result, Err(VatError::UnsupportedCategory { .. })));
}

#[test]
fn error_messages() {
    let err = registry()
        .rate("FR", ItemCategory::EBook, date(2013, 1, 1))
        .unwrap_err();
    assert_eq!(err.to_string(), "no VAT rate known for FR on 2013-01-01");

    let err = registry()
        .rate("XK", ItemCategory::EBook, date(2016, 1, 1))
        .unwrap_err();
    assert_eq!(err.to_string(), "no VAT rules registered for jurisdiction 'XK'");
}

// ---------------------------------------------------------------------------
// Direct rule access
// ---------------------------------------------------------------------------

#[test]
fn buyer_rule_signals_not_applicable_pre_cutover() {
    let reg = registry();
    let sale = Sale::new(
        date(2014, 1, 1),
        ItemCategory::EBook,
        Party::consumer("FR"),
        Party::business("DE"),
    );
    let outcome = reg.rule("FR").unwrap().sale_to_country(&sale).unwrap();
    assert_eq!(outcome, RuleOutcome::NotApplicable);
}

#[test]
fn tax_amount_for_charge() {
    let charge = determine(
        date(2016, 6, 1),
        ItemCategory::GenericPhysicalGood,
        Party::consumer("DE"),
        Party::business("DE"),
    );
    assert_eq!(charge.tax_on(dec!(49.90)), dec!(9.48));
}

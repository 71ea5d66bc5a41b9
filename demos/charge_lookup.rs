use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;
use vatcharge::core::*;
use vatcharge::rules::RuleRegistry;

fn main() {
    // RUST_LOG=vatcharge=debug shows which jurisdiction decided each charge.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = match RuleRegistry::eu() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("failed to build registry: {e}");
            return;
        }
    };
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

    println!("=== VAT Charges ===\n");

    let sales = [
        ("E-book DE -> FR consumer", date(2016, 6, 1), ItemCategory::EBook, Party::consumer("FR"), Party::business("DE")),
        ("Goods DE -> IT business", date(2016, 1, 1), ItemCategory::GenericPhysicalGood, Party::business("IT"), Party::business("DE")),
        ("Goods GB domestic", date(2020, 1, 1), ItemCategory::GenericPhysicalGood, Party::consumer("GB"), Party::business("GB")),
        ("Goods LU -> US consumer", date(2018, 3, 1), ItemCategory::GenericPhysicalGood, Party::consumer("US"), Party::business("LU")),
        ("Goods DE -> FR consumer (2014)", date(2014, 6, 1), ItemCategory::GenericPhysicalGood, Party::consumer("FR"), Party::business("DE")),
        ("E-service FR domestic (2014)", date(2014, 6, 1), ItemCategory::GenericElectronicService, Party::consumer("FR"), Party::business("FR")),
    ];

    for (label, d, category, buyer, seller) in sales {
        let sale = Sale::new(d, category, buyer, seller);
        match registry.determine_charge(&sale) {
            Ok(charge) => println!(
                "  {label}: {charge} (VAT on 100.00 = {})",
                charge.tax_on(dec!(100.00))
            ),
            Err(e) => println!("  {label}: ERROR: {e}"),
        }
    }

    println!("\n=== E-book rates on 2016-01-01 ===\n");
    for code in registry.jurisdictions() {
        match registry.rate(code, ItemCategory::EBook, date(2016, 1, 1)) {
            Ok(rate) => println!("  {code}: {}%", rate.normalize()),
            Err(e) => println!("  {code}: {e}"),
        }
    }
}

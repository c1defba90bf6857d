//! Daily settlement example.
//!
//! Shows how weekend settlement dates roll forward under each market
//! convention before amounts are totalled per day.

use chrono::NaiveDate;
use fx_settlement_reporting::prelude::*;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═════════════════════════════════════════════════════╗");
    println!("║  fx-settlement-reporting: Daily Settlement Example  ║");
    println!("╚═════════════════════════════════════════════════════╝\n");

    // 2016-06-17 is a Friday, 2016-06-18 a Saturday.
    let friday = NaiveDate::from_ymd_opt(2016, 6, 17).unwrap();
    let saturday = NaiveDate::from_ymd_opt(2016, 6, 18).unwrap();

    let book: Vec<Instruction> = [
        ("foo", "AED", friday, 45),
        ("bar", "SAR", saturday, 330),
        ("baz", "USD", friday, 200),
        ("qux", "GBP", saturday, 300),
    ]
    .into_iter()
    .map(|(entity, currency, settlement_date, units)| {
        Instruction::new(InstructionSpec {
            entity: Some(EntityId::new(entity)),
            operation: Some(Operation::Buy),
            agreed_fx: Some(dec!(0.50)),
            currency: Some(CurrencyCode::new(currency)),
            instruction_date: NaiveDate::from_ymd_opt(2016, 6, 1),
            settlement_date: Some(settlement_date),
            units: Some(units),
            price_per_unit: Some(dec!(100.25)),
        })
        .unwrap()
    })
    .collect();

    println!("━━━ Settlement Dates ━━━\n");
    for ins in &book {
        println!(
            "  {:<5} {}  {} ({}) → {} ({})  [{:?}]",
            ins.entity(),
            ins.currency(),
            ins.settlement_date(),
            ins.settlement_date().format("%a"),
            ins.effective_settlement_date(),
            ins.effective_settlement_date().format("%a"),
            WeekConvention::for_currency(ins.currency()),
        );
    }

    let mut presenter = TextPresenter::new(std::io::stdout());
    let report = ReportingEngine::amount_settled_per_day(&book, Operation::Buy);
    presenter.present_settled_per_day(&report).unwrap();
    match report.total() {
        Some(total) => println!("\nTotal outgoing: {} USD", total),
        None => println!("\nTotal outgoing is too large to represent"),
    }
}

//! Entity ranking example.
//!
//! Runs the full global report over the built-in demo book and a larger
//! random book, printing both rankings.

use fx_settlement_reporting::prelude::*;
use fx_settlement_reporting::simulation::sample_data::{
    demo_instructions, generate_sample_instructions, SampleConfig,
};

fn main() {
    println!("╔═══════════════════════════════════════════════════╗");
    println!("║  fx-settlement-reporting: Entity Ranking Example  ║");
    println!("╚═══════════════════════════════════════════════════╝\n");

    // --- Scenario 1: demo book, full report ---
    println!("━━━ Scenario 1: Demo Book ━━━");

    let book = demo_instructions().unwrap();
    let mut presenter = TextPresenter::new(std::io::stdout());
    ReportingEngine::generate_global_report(&book, &mut presenter).unwrap();
    println!();

    // --- Scenario 2: random book, rankings only ---
    println!("━━━ Scenario 2: Random Book (1000 instructions) ━━━\n");

    let config = SampleConfig {
        instruction_count: 1_000,
        seed: Some(2016),
        ..Default::default()
    };
    let book = generate_sample_instructions(&config).unwrap();
    let report = ReportingEngine::global_report(&book);

    for operation in [Operation::Sell, Operation::Buy] {
        println!("{} ranking:", operation);
        for row in report.ranking(operation).iter() {
            println!("  #{:<2} {:<6} {:>15} USD", row.rank, row.entity, row.amount);
        }
        let settled = report.settled(operation);
        let total = settled.total().map_or_else(|| "overflowed".to_string(), |t| format!("{} USD", t));
        println!("  {} days settled, {} in total\n", settled.len(), total);
    }
}

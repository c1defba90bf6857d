//! fx-settlement-reporting CLI
//!
//! Produce settlement and entity ranking reports from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Report on instructions from a JSON file
//! fx-settlement-reporting report --input instructions.json
//!
//! # Output as JSON
//! fx-settlement-reporting report --input instructions.json --format json
//!
//! # Report on the built-in demo book
//! fx-settlement-reporting demo
//!
//! # Generate a random instruction book
//! fx-settlement-reporting generate --instructions 200 --seed 7
//! ```

use fx_settlement_reporting::core::currency::CurrencyCode;
use fx_settlement_reporting::core::entity::EntityId;
use fx_settlement_reporting::core::instruction::Instruction;
use fx_settlement_reporting::reporting::engine::ReportingEngine;
use fx_settlement_reporting::reporting::presenter::{JsonPresenter, TextPresenter};
use fx_settlement_reporting::simulation::sample_data::{
    demo_instructions, generate_sample_instructions, SampleConfig,
};
use log::info;
use std::fs;
use std::io;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fx-settlement-reporting — settlement and ranking reports for FX instructions

USAGE:
    fx-settlement-reporting <COMMAND> [OPTIONS]

COMMANDS:
    report      Report on an instruction book read from JSON
    demo        Report on the built-in demo book
    generate    Generate a random instruction book (for testing)
    help        Show this message

OPTIONS (report, demo):
    --input <FILE>      Path to JSON instructions file (report only)
    --format <FORMAT>   Output format: text (default) or json
    --currency <CODE>   Reporting currency label for text output (default: USD)

OPTIONS (generate):
    --instructions <N>  Number of instructions (default: 100)
    --entities <N>      Number of entities (default: 5)
    --seed <N>          Seed for a reproducible book
    --output <FILE>     Write to file instead of stdout

Set RUST_LOG=debug for diagnostic output.

EXAMPLES:
    fx-settlement-reporting report --input instructions.json
    fx-settlement-reporting report --input instructions.json --format json
    fx-settlement-reporting demo --currency EUR
    fx-settlement-reporting generate --instructions 500 --seed 7 --output book.json"#
    );
}

/// JSON schema for input instructions.
#[derive(serde::Deserialize, serde::Serialize)]
struct InstructionsFile {
    instructions: Vec<Instruction>,
}

struct ReportOptions {
    input_path: Option<String>,
    format: String,
    currency: CurrencyCode,
}

fn required_value(args: &[String], i: usize, message: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{}", message);
        process::exit(1);
    })
}

fn parse_report_options(args: &[String]) -> ReportOptions {
    let mut options = ReportOptions {
        input_path: None,
        format: "text".to_string(),
        currency: CurrencyCode::new("USD"),
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                options.input_path = Some(required_value(args, i, "--input requires a file path"));
            }
            "--format" => {
                i += 1;
                options.format = required_value(args, i, "--format requires 'text' or 'json'");
            }
            "--currency" => {
                i += 1;
                options.currency =
                    CurrencyCode::new(required_value(args, i, "--currency requires a currency code"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn load_instructions(path: &str) -> Vec<Instruction> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: InstructionsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing instructions: {}", e);
        eprintln!("Expected format:");
        eprintln!(r#"{{
  "instructions": [
    {{ "entity": "foo", "operation": "BUY", "agreed_fx": "0.50", "currency": "SGD",
      "instruction_date": "2016-01-01", "settlement_date": "2016-01-02",
      "units": 200, "price_per_unit": "100.25" }}
  ]
}}"#);
        process::exit(1);
    });

    info!("loaded {} instructions from {}", file.instructions.len(), path);
    file.instructions
}

fn run_report(instructions: &[Instruction], options: &ReportOptions) {
    let stdout = io::stdout();
    let result = match options.format.as_str() {
        "json" => {
            let mut presenter = JsonPresenter::new(stdout.lock());
            ReportingEngine::generate_global_report(instructions, &mut presenter)
        }
        "text" => {
            let mut presenter = TextPresenter::with_currency(stdout.lock(), options.currency.clone());
            ReportingEngine::generate_global_report(instructions, &mut presenter)
        }
        other => {
            eprintln!("Unknown format: {} (expected 'text' or 'json')", other);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Unable to generate the report: {}", e);
        process::exit(1);
    }
}

fn cmd_report(args: &[String]) {
    let options = parse_report_options(args);
    let path = options.input_path.clone().unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    let instructions = load_instructions(&path);
    run_report(&instructions, &options);
}

fn cmd_demo(args: &[String]) {
    let options = parse_report_options(args);
    if options.input_path.is_some() {
        eprintln!("demo does not take --input; use the report command");
        process::exit(1);
    }
    let instructions = demo_instructions().unwrap_or_else(|e| {
        eprintln!("Invalid demo book: {}", e);
        process::exit(1);
    });
    run_report(&instructions, &options);
}

fn cmd_generate(args: &[String]) {
    let mut config = SampleConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--instructions" => {
                i += 1;
                config.instruction_count = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--instructions requires a number");
                        process::exit(1);
                    });
            }
            "--entities" => {
                i += 1;
                let count: usize = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--entities requires a number");
                        process::exit(1);
                    });
                config.entities = (0..count)
                    .map(|n| EntityId::new(format!("ENTITY-{:03}", n)))
                    .collect();
            }
            "--seed" => {
                i += 1;
                config.seed = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--seed requires a number");
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(required_value(args, i, "--output requires a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let instructions = generate_sample_instructions(&config).unwrap_or_else(|e| {
        eprintln!("Error generating instructions: {}", e);
        process::exit(1);
    });
    let count = instructions.len();

    let json = serde_json::to_string_pretty(&InstructionsFile { instructions }).unwrap_or_else(|e| {
        eprintln!("Error encoding instructions: {}", e);
        process::exit(1);
    });

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} instructions → {}", count, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "report" => cmd_report(rest),
        "demo" => cmd_demo(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

//! Instruction books for demos, tests and benchmarks.
//!
//! [`demo_instructions`] is a small fixed book covering both market
//! conventions and weekend settlements. [`generate_sample_instructions`]
//! draws larger random books, reproducible when a seed is configured.

use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityId;
use crate::core::instruction::{Instruction, InstructionError, InstructionSpec};
use crate::core::operation::Operation;
use chrono::{Days, NaiveDate};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random instruction book.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of instructions to generate.
    pub instruction_count: usize,
    /// Counterparties to draw from.
    pub entities: Vec<EntityId>,
    /// Currencies to draw from.
    pub currencies: Vec<CurrencyCode>,
    /// Earliest contractual settlement date.
    pub first_settlement_date: NaiveDate,
    /// Settlement dates fall within this many days of the first one.
    pub settlement_span_days: u64,
    pub min_agreed_fx: Decimal,
    pub max_agreed_fx: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub max_units: u32,
    /// Fixed seed for a reproducible book; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            instruction_count: 100,
            entities: ["foo", "bar", "baz", "qux", "quux"]
                .into_iter()
                .map(EntityId::new)
                .collect(),
            currencies: ["USD", "GBP", "EUR", "SGD", "AED", "SAR"]
                .into_iter()
                .map(CurrencyCode::new)
                .collect(),
            first_settlement_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap_or(NaiveDate::MIN),
            settlement_span_days: 30,
            min_agreed_fx: dec!(0.01),
            max_agreed_fx: dec!(2.00),
            min_price: dec!(0.01),
            max_price: dec!(500.00),
            max_units: 1_000,
            seed: None,
        }
    }
}

/// Generate a random but valid instruction book.
pub fn generate_sample_instructions(config: &SampleConfig) -> Result<Vec<Instruction>, InstructionError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut book = Vec::with_capacity(config.instruction_count);
    if config.entities.is_empty() || config.currencies.is_empty() {
        return Ok(book);
    }

    for _ in 0..config.instruction_count {
        let (Some(entity), Some(currency)) = (
            config.entities.choose(&mut rng),
            config.currencies.choose(&mut rng),
        ) else {
            break;
        };

        let offset = rng.gen_range(0..=config.settlement_span_days);
        let settlement_date = config
            .first_settlement_date
            .checked_add_days(Days::new(offset))
            .unwrap_or(config.first_settlement_date);
        let instruction_date = settlement_date.checked_sub_days(Days::new(rng.gen_range(0..=3)));

        let operation = if rng.gen_bool(0.5) {
            Operation::Buy
        } else {
            Operation::Sell
        };

        book.push(Instruction::new(InstructionSpec {
            entity: Some(entity.clone()),
            operation: Some(operation),
            agreed_fx: Some(random_decimal(&mut rng, config.min_agreed_fx, config.max_agreed_fx, 4)),
            currency: Some(currency.clone()),
            instruction_date,
            settlement_date: Some(settlement_date),
            units: Some(i64::from(rng.gen_range(1..=config.max_units.max(1)))),
            price_per_unit: Some(random_decimal(&mut rng, config.min_price, config.max_price, 2)),
        })?);
    }

    debug!("generated {} sample instructions", book.len());
    Ok(book)
}

/// Uniform decimal in `[min, max]` with `scale` fractional digits.
fn random_decimal<R: Rng>(rng: &mut R, min: Decimal, max: Decimal, scale: u32) -> Decimal {
    let factor = Decimal::from(10u64.pow(scale));
    let lo = (min * factor).ceil().to_i64().unwrap_or(0);
    let hi = (max * factor).floor().to_i64().unwrap_or(lo).max(lo);
    Decimal::new(rng.gen_range(lo..=hi), scale)
}

/// A fixed book of eight instructions over two weeks of January 2016.
///
/// Includes Friday settlements in AED and SAR and Saturday settlements
/// in Monday to Friday currencies, so every report shows rolled dates.
pub fn demo_instructions() -> Result<Vec<Instruction>, InstructionError> {
    let rows: [(&str, Operation, Decimal, &str, (u32, u32), i64, Decimal); 8] = [
        ("foo", Operation::Buy, dec!(0.50), "SGD", (1, 2), 200, dec!(100.25)),
        ("bar", Operation::Sell, dec!(0.22), "AED", (5, 8), 450, dec!(150.5)),
        ("baz", Operation::Buy, dec!(0.27), "SAR", (6, 8), 120, dec!(85.30)),
        ("foo", Operation::Sell, dec!(1.45), "GBP", (7, 9), 75, dec!(310.00)),
        ("qux", Operation::Sell, dec!(1.09), "EUR", (8, 11), 300, dec!(42.125)),
        ("bar", Operation::Buy, dec!(0.27), "AED", (11, 15), 1_000, dec!(12.345)),
        ("baz", Operation::Sell, dec!(1.00), "USD", (13, 16), 50, dec!(99.99)),
        ("qux", Operation::Buy, dec!(0.74), "SGD", (14, 14), 640, dec!(18.75)),
    ];

    rows.into_iter()
        .map(|(entity, operation, fx, currency, (issued, settles), units, price)| {
            Instruction::new(InstructionSpec {
                entity: Some(EntityId::new(entity)),
                operation: Some(operation),
                agreed_fx: Some(fx),
                currency: Some(CurrencyCode::new(currency)),
                instruction_date: NaiveDate::from_ymd_opt(2016, 1, issued),
                settlement_date: NaiveDate::from_ymd_opt(2016, 1, settles),
                units: Some(units),
                price_per_unit: Some(price),
            })
        })
        .collect()
}

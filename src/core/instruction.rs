use crate::core::calendar::WeekConvention;
use crate::core::currency::CurrencyCode;
use crate::core::entity::EntityId;
use crate::core::operation::Operation;
use crate::reporting::rounding;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from constructing an [`Instruction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// A single field value violates its constraint.
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// The record as a whole cannot form an instruction.
    #[error("cannot build instruction: {0} is required")]
    InvalidState(&'static str),
}

impl InstructionError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        InstructionError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// Field values for an instruction, prior to validation.
///
/// Every field is optional so that a partially filled record can be
/// described; [`Instruction::new`] decides whether it is acceptable.
///
/// # Examples
///
/// ```
/// use fx_settlement_reporting::prelude::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let spec = InstructionSpec {
///     entity: Some(EntityId::new("foo")),
///     operation: Some(Operation::Buy),
///     agreed_fx: Some(dec!(0.50)),
///     currency: Some(CurrencyCode::new("SGD")),
///     settlement_date: NaiveDate::from_ymd_opt(2016, 1, 2),
///     units: Some(200),
///     price_per_unit: Some(dec!(100.25)),
///     ..Default::default()
/// };
/// let instruction = Instruction::new(spec).unwrap();
/// assert_eq!(instruction.line_total(), dec!(10025.000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstructionSpec {
    pub entity: Option<EntityId>,
    pub operation: Option<Operation>,
    pub agreed_fx: Option<Decimal>,
    pub currency: Option<CurrencyCode>,
    pub instruction_date: Option<NaiveDate>,
    pub settlement_date: Option<NaiveDate>,
    pub units: Option<i64>,
    pub price_per_unit: Option<Decimal>,
}

/// A validated foreign-exchange trade instruction.
///
/// Instructions are immutable once created. The "edit" methods
/// (`with_*`) return a new instruction that went through the same
/// validation as the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstructionSpec")]
pub struct Instruction {
    /// The counterparty that issued the instruction.
    entity: EntityId,
    operation: Operation,
    /// Agreed exchange rate into the reporting currency. Never negative.
    agreed_fx: Decimal,
    /// Selects the weekly convention used for settlement.
    currency: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    instruction_date: Option<NaiveDate>,
    /// Contractual settlement date, before any weekend adjustment.
    settlement_date: NaiveDate,
    /// Always greater than zero.
    units: u32,
    /// Always greater than zero.
    price_per_unit: Decimal,
    #[serde(skip)]
    line_total: Decimal,
}

impl Instruction {
    /// Validate `spec` and build an instruction from it.
    ///
    /// Field constraints are checked first and fail with
    /// [`InstructionError::InvalidArgument`]; a record that is missing
    /// a mandatory field then fails with [`InstructionError::InvalidState`].
    /// Only `instruction_date` may be absent. Entity and operation are
    /// mandatory too, although a bare trade record can leave them out:
    /// every report filters on the operation and ranks by entity.
    ///
    /// Once every field is present, two checks remain, both failing with
    /// [`InstructionError::InvalidArgument`]: the line total must fit in a
    /// [`Decimal`] at three decimals, and the currency's market must open
    /// on or after the settlement date within the calendar.
    pub fn new(spec: InstructionSpec) -> Result<Self, InstructionError> {
        if let Some(fx) = spec.agreed_fx {
            check_agreed_fx(fx)?;
        }
        let units = spec.units.map(check_units).transpose()?;
        if let Some(price) = spec.price_per_unit {
            check_price_per_unit(price)?;
        }

        let entity = spec.entity.ok_or(InstructionError::InvalidState("entity"))?;
        let operation = spec
            .operation
            .ok_or(InstructionError::InvalidState("operation"))?;
        let agreed_fx = spec
            .agreed_fx
            .ok_or(InstructionError::InvalidState("agreed_fx"))?;
        let currency = spec
            .currency
            .ok_or(InstructionError::InvalidState("currency"))?;
        let settlement_date = spec
            .settlement_date
            .ok_or(InstructionError::InvalidState("settlement_date"))?;
        let units = units.ok_or(InstructionError::InvalidState("units"))?;
        let price_per_unit = spec
            .price_per_unit
            .ok_or(InstructionError::InvalidState("price_per_unit"))?;

        let line_total = rounding::line_total(agreed_fx, price_per_unit, units).ok_or_else(|| {
            InstructionError::invalid(
                "price_per_unit",
                format!(
                    "{} units at {} and rate {} exceed the representable amount",
                    units, price_per_unit, agreed_fx
                ),
            )
        })?;
        check_settlement_date(settlement_date, &currency)?;

        Ok(Self {
            entity,
            operation,
            agreed_fx,
            currency,
            instruction_date: spec.instruction_date,
            settlement_date,
            units,
            price_per_unit,
            line_total,
        })
    }

    /// The field values of this instruction as a spec record.
    pub fn to_spec(&self) -> InstructionSpec {
        InstructionSpec {
            entity: Some(self.entity.clone()),
            operation: Some(self.operation),
            agreed_fx: Some(self.agreed_fx),
            currency: Some(self.currency.clone()),
            instruction_date: self.instruction_date,
            settlement_date: Some(self.settlement_date),
            units: Some(i64::from(self.units)),
            price_per_unit: Some(self.price_per_unit),
        }
    }

    pub fn with_agreed_fx(&self, agreed_fx: Decimal) -> Result<Self, InstructionError> {
        Self::new(InstructionSpec {
            agreed_fx: Some(agreed_fx),
            ..self.to_spec()
        })
    }

    pub fn with_units(&self, units: i64) -> Result<Self, InstructionError> {
        Self::new(InstructionSpec {
            units: Some(units),
            ..self.to_spec()
        })
    }

    pub fn with_price_per_unit(&self, price_per_unit: Decimal) -> Result<Self, InstructionError> {
        Self::new(InstructionSpec {
            price_per_unit: Some(price_per_unit),
            ..self.to_spec()
        })
    }

    pub fn with_settlement_date(&self, settlement_date: NaiveDate) -> Result<Self, InstructionError> {
        Self::new(InstructionSpec {
            settlement_date: Some(settlement_date),
            ..self.to_spec()
        })
    }

    /// The settlement date rolled forward to the first day the market
    /// of this instruction's currency is open. Computed on every call.
    pub fn effective_settlement_date(&self) -> NaiveDate {
        WeekConvention::for_currency(&self.currency).next_tradable_date(self.settlement_date)
    }

    /// Value of the instruction in the reporting currency, at three
    /// decimal places.
    pub fn line_total(&self) -> Decimal {
        self.line_total
    }

    // --- Accessors ---

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn agreed_fx(&self) -> Decimal {
        self.agreed_fx
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn instruction_date(&self) -> Option<NaiveDate> {
        self.instruction_date
    }

    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }
}

impl TryFrom<InstructionSpec> for Instruction {
    type Error = InstructionError;

    fn try_from(spec: InstructionSpec) -> Result<Self, Self::Error> {
        Self::new(spec)
    }
}

fn check_agreed_fx(agreed_fx: Decimal) -> Result<(), InstructionError> {
    if agreed_fx < Decimal::ZERO {
        return Err(InstructionError::invalid(
            "agreed_fx",
            format!("rate cannot be negative, got {}", agreed_fx),
        ));
    }
    Ok(())
}

fn check_units(units: i64) -> Result<u32, InstructionError> {
    if units <= 0 {
        return Err(InstructionError::invalid(
            "units",
            format!("must be greater than zero, got {}", units),
        ));
    }
    u32::try_from(units)
        .map_err(|_| InstructionError::invalid("units", format!("{} is out of range", units)))
}

fn check_price_per_unit(price: Decimal) -> Result<(), InstructionError> {
    if price <= Decimal::ZERO {
        return Err(InstructionError::invalid(
            "price_per_unit",
            format!("must be greater than zero, got {}", price),
        ));
    }
    Ok(())
}

fn check_settlement_date(date: NaiveDate, currency: &CurrencyCode) -> Result<(), InstructionError> {
    if WeekConvention::for_currency(currency)
        .checked_next_tradable_date(date)
        .is_none()
    {
        return Err(InstructionError::invalid(
            "settlement_date",
            format!("no {} trading day on or after {}", currency, date),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spec(currency: &str, settlement_date: Option<NaiveDate>, units: i64) -> InstructionSpec {
        InstructionSpec {
            entity: Some(EntityId::new("foo")),
            operation: Some(Operation::Buy),
            agreed_fx: Some(dec!(0.50)),
            currency: Some(CurrencyCode::new(currency)),
            instruction_date: Some(date(2016, 1, 1)),
            settlement_date,
            units: Some(units),
            price_per_unit: Some(dec!(100.25)),
        }
    }

    fn instruction(currency: &str, settlement_date: NaiveDate, units: i64) -> Instruction {
        Instruction::new(spec(currency, Some(settlement_date), units)).unwrap()
    }

    #[test]
    fn test_effective_date_sunday_to_thursday_currency() {
        assert_eq!(
            instruction("AED", date(2016, 6, 17), 45).effective_settlement_date(),
            date(2016, 6, 19)
        );
        assert_eq!(
            instruction("SAR", date(2016, 8, 20), 330).effective_settlement_date(),
            date(2016, 8, 21)
        );
        assert_eq!(
            instruction("AED", date(2016, 9, 15), 220).effective_settlement_date(),
            date(2016, 9, 15)
        );
    }

    #[test]
    fn test_effective_date_monday_to_friday_currency() {
        assert_eq!(
            instruction("USD", date(2016, 6, 17), 200).effective_settlement_date(),
            date(2016, 6, 17)
        );
        assert_eq!(
            instruction("GBP", date(2016, 10, 14), 300).effective_settlement_date(),
            date(2016, 10, 14)
        );
        assert_eq!(
            instruction("EUR", date(2016, 11, 26), 250).effective_settlement_date(),
            date(2016, 11, 28)
        );
    }

    #[test]
    fn test_missing_settlement_date_is_invalid_state() {
        let err = Instruction::new(spec("USD", None, 110)).unwrap_err();
        assert_eq!(err, InstructionError::InvalidState("settlement_date"));
    }

    #[test]
    fn test_negative_units_is_invalid_argument() {
        let err = Instruction::new(spec("USD", Some(date(2016, 7, 21)), -30)).unwrap_err();
        assert!(matches!(
            err,
            InstructionError::InvalidArgument { field: "units", .. }
        ));
    }

    #[test]
    fn test_field_constraints_checked_before_presence() {
        let mut s = spec("USD", None, -30);
        s.currency = None;
        assert!(matches!(
            Instruction::new(s).unwrap_err(),
            InstructionError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_negative_rate_rejected_zero_rate_accepted() {
        let mut s = spec("USD", Some(date(2016, 7, 21)), 10);
        s.agreed_fx = Some(dec!(-0.01));
        assert!(matches!(
            Instruction::new(s.clone()).unwrap_err(),
            InstructionError::InvalidArgument { field: "agreed_fx", .. }
        ));
        s.agreed_fx = Some(Decimal::ZERO);
        assert!(Instruction::new(s).is_ok());
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let mut s = spec("USD", Some(date(2016, 7, 21)), 10);
        s.price_per_unit = Some(Decimal::ZERO);
        assert!(matches!(
            Instruction::new(s).unwrap_err(),
            InstructionError::InvalidArgument { field: "price_per_unit", .. }
        ));
    }

    #[test]
    fn test_missing_units_is_invalid_state() {
        let mut s = spec("USD", Some(date(2016, 7, 21)), 10);
        s.units = None;
        assert_eq!(
            Instruction::new(s).unwrap_err(),
            InstructionError::InvalidState("units")
        );
    }

    #[test]
    fn test_with_methods_revalidate() {
        let original = instruction("USD", date(2016, 7, 21), 10);
        assert!(original.with_units(0).is_err());
        assert!(original.with_agreed_fx(dec!(-1)).is_err());
        assert!(original.with_price_per_unit(dec!(-5)).is_err());

        let edited = original.with_units(20).unwrap();
        assert_eq!(edited.units(), 20);
        assert_eq!(original.units(), 10);

        let moved = original.with_settlement_date(date(2016, 7, 23)).unwrap();
        assert_eq!(moved.effective_settlement_date(), date(2016, 7, 25));
    }

    #[test]
    fn test_line_total() {
        let ins = instruction("USD", date(2016, 7, 21), 200);
        assert_eq!(ins.line_total(), dec!(10025));
    }

    #[test]
    fn test_unrepresentable_line_total_rejected() {
        let mut s = spec("USD", Some(date(2016, 7, 21)), 4_000_000_000);
        s.agreed_fx = Some(Decimal::from(1_000_000_000u64));
        s.price_per_unit = Some(Decimal::from(100_000_000_000u64));
        assert!(matches!(
            Instruction::new(s.clone()).unwrap_err(),
            InstructionError::InvalidArgument { field: "price_per_unit", .. }
        ));

        s.agreed_fx = Some(Decimal::ONE);
        s.units = Some(1);
        s.price_per_unit = Some(Decimal::MAX);
        assert!(Instruction::new(s.clone()).is_err());

        // 4 * 10^25 still fits at three decimals.
        s.units = Some(1000);
        s.price_per_unit = Some(Decimal::from_i128_with_scale(4 * 10i128.pow(22), 0));
        let ins = Instruction::new(s).unwrap();
        assert_eq!(ins.line_total(), Decimal::from_i128_with_scale(4 * 10i128.pow(28), 3));
    }

    #[test]
    fn test_settlement_date_needs_a_trading_day_ahead() {
        let mut day = NaiveDate::MAX;
        for _ in 0..7 {
            for currency in ["USD", "AED"] {
                let convention = WeekConvention::for_currency(&CurrencyCode::new(currency));
                let open_ahead = std::iter::successors(Some(day), |d| d.succ_opt())
                    .any(|d| !convention.is_non_tradable(d));
                let result = Instruction::new(spec(currency, Some(day), 1));
                if open_ahead {
                    let ins = result.unwrap();
                    assert!(!convention.is_non_tradable(ins.effective_settlement_date()));
                } else {
                    assert!(matches!(
                        result.unwrap_err(),
                        InstructionError::InvalidArgument { field: "settlement_date", .. }
                    ));
                }
            }
            day = day.pred_opt().unwrap();
        }
    }

    #[test]
    fn test_json_goes_through_validation() {
        let json = r#"{
            "entity": "foo", "operation": "BUY", "agreed_fx": "0.50",
            "currency": "usd", "settlement_date": "2016-07-21",
            "units": -3, "price_per_unit": "100.25"
        }"#;
        let err = serde_json::from_str::<Instruction>(json).unwrap_err();
        assert!(err.to_string().contains("units"));

        let ok = json.replace("-3", "3");
        let ins: Instruction = serde_json::from_str(&ok).unwrap();
        assert_eq!(ins.currency().as_str(), "USD");
        assert_eq!(ins.instruction_date(), None);
    }
}

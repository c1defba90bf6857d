//! # fx-settlement-reporting
//!
//! Settlement and ranking reports over foreign-exchange trade instructions.
//!
//! Given a book of validated instructions, this crate shifts each settlement
//! date onto the next tradable day for the instruction's currency and folds
//! the book into per-day settled amounts and per-entity rankings.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, entities, operations, the
//!   trading calendar and the validated instruction value
//! - **reporting** — Two-stage rounding, keyed accumulation, the reporting
//!   engine and presentation collaborators
//! - **simulation** — Demo instruction book and random instruction generation

pub mod core;
pub mod reporting;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::calendar::WeekConvention;
    pub use crate::core::currency::CurrencyCode;
    pub use crate::core::entity::EntityId;
    pub use crate::core::instruction::{Instruction, InstructionError, InstructionSpec};
    pub use crate::core::operation::Operation;
    pub use crate::reporting::engine::{
        EntityRanking, GlobalReport, ReportingEngine, SettledPerDay, SettlementPartition,
    };
    pub use crate::reporting::presenter::{ReportPresenter, TextPresenter};
}

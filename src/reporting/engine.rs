use crate::core::entity::EntityId;
use crate::core::instruction::Instruction;
use crate::core::operation::Operation;
use crate::reporting::accumulator::Accumulator;
use crate::reporting::presenter::ReportPresenter;
use crate::reporting::rounding;
use chrono::NaiveDate;
use log::{debug, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors arising while combining or presenting reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot merge a {found} partition into a {expected} report")]
    OperationMismatch {
        expected: Operation,
        found: Operation,
    },
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Amounts settled per effective settlement day for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledPerDay {
    operation: Operation,
    /// Ascending by day.
    amounts: BTreeMap<NaiveDate, Decimal>,
    /// Days whose amount is too large for a [`Decimal`]. They have no
    /// entry in `amounts`.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    overflowed: BTreeSet<NaiveDate>,
}

impl SettledPerDay {
    fn empty(operation: Operation) -> Self {
        Self {
            operation,
            amounts: BTreeMap::new(),
            overflowed: BTreeSet::new(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn amounts(&self) -> &BTreeMap<NaiveDate, Decimal> {
        &self.amounts
    }

    /// Amount settled on `day`, if anything representable settled then.
    pub fn get(&self, day: NaiveDate) -> Option<Decimal> {
        self.amounts.get(&day).copied()
    }

    pub fn overflowed(&self) -> &BTreeSet<NaiveDate> {
        &self.overflowed
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Decimal)> {
        self.amounts.iter()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty() && self.overflowed.is_empty()
    }

    /// Sum over every day, `None` if it cannot be represented.
    pub fn total(&self) -> Option<Decimal> {
        rounding::checked_sum(self.amounts.values().copied())
    }
}

/// Unrounded line totals of one slice of a book, grouped by effective
/// settlement day in input order.
///
/// Built with [`ReportingEngine::partition_settled_per_day`] and turned
/// into a report with [`ReportingEngine::merge_settled_per_day`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementPartition {
    operation: Operation,
    lines: BTreeMap<NaiveDate, Vec<Decimal>>,
}

impl SettlementPartition {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Number of line totals carried.
    pub fn line_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }
}

/// One row of an [`EntityRanking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntity {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub entity: EntityId,
    pub amount: Decimal,
}

/// Entities ordered by total instructed amount, largest first.
///
/// Entities with equal totals are ordered by identifier, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRanking {
    operation: Operation,
    entries: Vec<RankedEntity>,
    /// Entities whose total is too large for a [`Decimal`], ascending.
    /// They are not ranked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    overflowed: Vec<EntityId>,
}

impl EntityRanking {
    fn empty(operation: Operation) -> Self {
        Self {
            operation,
            entries: Vec::new(),
            overflowed: Vec::new(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn entries(&self) -> &[RankedEntity] {
        &self.entries
    }

    /// Total for `entity`, if it appears in the ranking.
    pub fn get(&self, entity: &EntityId) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| &e.entity == entity)
            .map(|e| e.amount)
    }

    pub fn overflowed(&self) -> &[EntityId] {
        &self.overflowed
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedEntity> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.overflowed.is_empty()
    }

    /// Sum over every ranked entity, `None` if it cannot be represented.
    pub fn total(&self) -> Option<Decimal> {
        rounding::checked_sum(self.entries.iter().map(|e| e.amount))
    }
}

/// The four report bodies produced for a book of instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalReport {
    pub settled_incoming: SettledPerDay,
    pub settled_outgoing: SettledPerDay,
    pub ranking_incoming: EntityRanking,
    pub ranking_outgoing: EntityRanking,
}

impl GlobalReport {
    pub fn settled(&self, operation: Operation) -> &SettledPerDay {
        match operation {
            Operation::Sell => &self.settled_incoming,
            Operation::Buy => &self.settled_outgoing,
        }
    }

    pub fn ranking(&self, operation: Operation) -> &EntityRanking {
        match operation {
            Operation::Sell => &self.ranking_incoming,
            Operation::Buy => &self.ranking_outgoing,
        }
    }
}

/// The reporting engine.
///
/// Stateless folds over a caller-supplied book of instructions. None of
/// the report functions fail: an empty book yields an empty report, and
/// a day or entity whose amount overflows is listed apart from the
/// amounts.
pub struct ReportingEngine;

impl ReportingEngine {
    /// Amount settled per effective settlement day for `operation`.
    ///
    /// # Algorithm
    ///
    /// 1. Keep the instructions whose operation matches.
    /// 2. Key each by its effective settlement date.
    /// 3. Fold its line total into the day's running amount, rounding
    ///    the running amount to cents after every line.
    pub fn amount_settled_per_day(instructions: &[Instruction], operation: Operation) -> SettledPerDay {
        if !Self::has_input(instructions, operation) {
            return SettledPerDay::empty(operation);
        }
        Self::settle(Self::partition_settled_per_day(instructions, operation))
    }

    /// Steps 1 and 2 of [`ReportingEngine::amount_settled_per_day`] over
    /// one slice of a book, with no rounding to cents yet.
    pub fn partition_settled_per_day(instructions: &[Instruction], operation: Operation) -> SettlementPartition {
        let mut lines: BTreeMap<NaiveDate, Vec<Decimal>> = BTreeMap::new();
        for ins in instructions.iter().filter(|i| i.operation() == operation) {
            let day = ins.effective_settlement_date();
            let line = ins.line_total();
            trace!("{} {} settles {} on {}", operation, ins.entity(), line, day);
            lines.entry(day).or_default().push(line);
        }
        SettlementPartition { operation, lines }
    }

    /// Settlement report over consecutive slices of a book.
    ///
    /// `partitions` must come in the order of the slices they were built
    /// from. Each day's lines are folded in that order, so the result is
    /// the report of the whole book, cent for cent.
    pub fn merge_settled_per_day<I>(operation: Operation, partitions: I) -> Result<SettledPerDay, ReportError>
    where
        I: IntoIterator<Item = SettlementPartition>,
    {
        let mut lines: BTreeMap<NaiveDate, Vec<Decimal>> = BTreeMap::new();
        for partition in partitions {
            if partition.operation != operation {
                return Err(ReportError::OperationMismatch {
                    expected: operation,
                    found: partition.operation,
                });
            }
            for (day, day_lines) in partition.lines {
                lines.entry(day).or_default().extend(day_lines);
            }
        }
        Ok(Self::settle(SettlementPartition { operation, lines }))
    }

    /// Step 3: fold each day's lines, in order, into its running amount.
    fn settle(partition: SettlementPartition) -> SettledPerDay {
        let operation = partition.operation;
        let mut acc = Accumulator::new();
        for (day, lines) in partition.lines {
            for line in lines {
                if !acc.add(day, line) {
                    warn!("{} amount settled on {} overflows, day left out of the totals", operation, day);
                    break;
                }
            }
        }

        debug!("{} settlement report covers {} days", operation, acc.len());
        let (amounts, overflowed) = acc.into_parts();
        SettledPerDay {
            operation,
            amounts,
            overflowed,
        }
    }

    /// Entities ranked by total instructed amount for `operation`.
    pub fn entity_ranking(instructions: &[Instruction], operation: Operation) -> EntityRanking {
        if !Self::has_input(instructions, operation) {
            return EntityRanking::empty(operation);
        }

        let acc: Accumulator<EntityId> = instructions
            .iter()
            .filter(|i| i.operation() == operation)
            .map(|i| (i.entity().clone(), i.line_total()))
            .collect();

        let (totals, overflowed) = acc.into_parts();
        for entity in &overflowed {
            warn!("{} total of {} overflows, entity left out of the ranking", operation, entity);
        }

        // Accumulator iterates by entity, and the sort is stable, so
        // equal amounts keep ascending entity order.
        let mut totals: Vec<(EntityId, Decimal)> = totals.into_iter().collect();
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        let entries: Vec<RankedEntity> = totals
            .into_iter()
            .enumerate()
            .map(|(i, (entity, amount))| RankedEntity {
                rank: i + 1,
                entity,
                amount,
            })
            .collect();

        debug!("{} ranking covers {} entities", operation, entries.len());
        EntityRanking {
            operation,
            entries,
            overflowed: overflowed.into_iter().collect(),
        }
    }

    /// All four report bodies: settled per day then ranking, incoming
    /// (sell) before outgoing (buy).
    pub fn global_report(instructions: &[Instruction]) -> GlobalReport {
        GlobalReport {
            settled_incoming: Self::amount_settled_per_day(instructions, Operation::Sell),
            settled_outgoing: Self::amount_settled_per_day(instructions, Operation::Buy),
            ranking_incoming: Self::entity_ranking(instructions, Operation::Sell),
            ranking_outgoing: Self::entity_ranking(instructions, Operation::Buy),
        }
    }

    /// Compute the global report and hand each body to `presenter`, in
    /// the order of [`ReportingEngine::global_report`].
    pub fn generate_global_report<P: ReportPresenter + ?Sized>(
        instructions: &[Instruction],
        presenter: &mut P,
    ) -> Result<(), ReportError> {
        let report = Self::global_report(instructions);
        presenter.present_settled_per_day(&report.settled_incoming)?;
        presenter.present_settled_per_day(&report.settled_outgoing)?;
        presenter.present_ranking(&report.ranking_incoming)?;
        presenter.present_ranking(&report.ranking_outgoing)?;
        presenter.finish()
    }

    fn has_input(instructions: &[Instruction], operation: Operation) -> bool {
        if instructions.is_empty() {
            debug!("no instructions supplied, {} report is empty", operation);
            return false;
        }
        true
    }
}

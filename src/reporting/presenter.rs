//! Presentation collaborators for finished reports.
//!
//! The engine hands every report body to a [`ReportPresenter`]; how the
//! body is laid out is entirely up to the presenter.

use crate::core::currency::CurrencyCode;
use crate::reporting::engine::{EntityRanking, ReportError, SettledPerDay};
use serde::Serialize;
use std::io::Write;

/// Receives report bodies in the order the engine produces them.
pub trait ReportPresenter {
    fn present_settled_per_day(&mut self, report: &SettledPerDay) -> Result<(), ReportError>;

    fn present_ranking(&mut self, ranking: &EntityRanking) -> Result<(), ReportError>;

    /// Called once after the last body.
    fn finish(&mut self) -> Result<(), ReportError> {
        Ok(())
    }
}

const OVERFLOW_NOTE: &str = "too large to represent";

/// Plain text console layout, one line per day or entity.
pub struct TextPresenter<W: Write> {
    out: W,
    reporting_currency: CurrencyCode,
}

impl<W: Write> TextPresenter<W> {
    /// Amounts are labelled as USD.
    pub fn new(out: W) -> Self {
        Self::with_currency(out, CurrencyCode::new("USD"))
    }

    pub fn with_currency(out: W, reporting_currency: CurrencyCode) -> Self {
        Self {
            out,
            reporting_currency,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportPresenter for TextPresenter<W> {
    fn present_settled_per_day(&mut self, report: &SettledPerDay) -> Result<(), ReportError> {
        writeln!(
            self.out,
            "\nAmount in {} settled per day for {} instructions:",
            self.reporting_currency,
            report.operation().label().to_lowercase()
        )?;
        for (day, amount) in report.iter() {
            writeln!(
                self.out,
                "Day: {}, Amount: {} {}",
                day, amount, self.reporting_currency
            )?;
        }
        for day in report.overflowed() {
            writeln!(self.out, "Day: {}, Amount: {}", day, OVERFLOW_NOTE)?;
        }
        Ok(())
    }

    fn present_ranking(&mut self, ranking: &EntityRanking) -> Result<(), ReportError> {
        writeln!(
            self.out,
            "\nRanking of entities in descending order by amount instructed to {} instructions:",
            ranking.operation().label().to_lowercase()
        )?;
        for row in ranking.iter() {
            writeln!(
                self.out,
                "{:<15}, {:<10}",
                format!("Entity: {}", row.entity),
                format!("Amount: {} {}", row.amount, self.reporting_currency)
            )?;
        }
        for entity in ranking.overflowed() {
            writeln!(
                self.out,
                "{:<15}, Amount: {}",
                format!("Entity: {}", entity),
                OVERFLOW_NOTE
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
enum JsonBody {
    SettledPerDay(SettledPerDay),
    EntityRanking(EntityRanking),
}

/// Writes all bodies as one pretty-printed JSON array on [`finish`].
///
/// [`finish`]: ReportPresenter::finish
pub struct JsonPresenter<W: Write> {
    out: W,
    bodies: Vec<JsonBody>,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bodies: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportPresenter for JsonPresenter<W> {
    fn present_settled_per_day(&mut self, report: &SettledPerDay) -> Result<(), ReportError> {
        self.bodies.push(JsonBody::SettledPerDay(report.clone()));
        Ok(())
    }

    fn present_ranking(&mut self, ranking: &EntityRanking) -> Result<(), ReportError> {
        self.bodies.push(JsonBody::EntityRanking(ranking.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut self.out, &self.bodies)?;
        writeln!(self.out)?;
        self.bodies.clear();
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every body in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingPresenter {
    pub settled: Vec<SettledPerDay>,
    pub rankings: Vec<EntityRanking>,
    pub finished: bool,
}

impl ReportPresenter for CollectingPresenter {
    fn present_settled_per_day(&mut self, report: &SettledPerDay) -> Result<(), ReportError> {
        self.settled.push(report.clone());
        Ok(())
    }

    fn present_ranking(&mut self, ranking: &EntityRanking) -> Result<(), ReportError> {
        self.rankings.push(ranking.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ReportError> {
        self.finished = true;
        Ok(())
    }
}

//! Weekly trading conventions and settlement date adjustment.
//!
//! Each currency trades under one of two fixed weekly patterns. A
//! settlement date that lands on a weekend of its currency's market is
//! rolled forward to the first tradable day. There is no holiday table;
//! the adjustment is purely day-of-week.

use crate::core::currency::CurrencyCode;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The weekly trading pattern of a currency's home market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekConvention {
    /// Trades Monday to Friday; Saturday and Sunday are closed.
    MondayToFriday,
    /// Trades Sunday to Thursday; Friday and Saturday are closed.
    SundayToThursday,
}

impl WeekConvention {
    /// The convention followed by `currency`.
    pub fn for_currency(currency: &CurrencyCode) -> Self {
        if currency.is_sunday_to_thursday_market() {
            WeekConvention::SundayToThursday
        } else {
            WeekConvention::MondayToFriday
        }
    }

    /// The two closed weekdays of this convention.
    pub fn weekend(self) -> [Weekday; 2] {
        match self {
            WeekConvention::MondayToFriday => [Weekday::Sat, Weekday::Sun],
            WeekConvention::SundayToThursday => [Weekday::Fri, Weekday::Sat],
        }
    }

    /// The five open weekdays, in trading-week order.
    pub fn tradable_days(self) -> [Weekday; 5] {
        match self {
            WeekConvention::MondayToFriday => [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            WeekConvention::SundayToThursday => [
                Weekday::Sun,
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
            ],
        }
    }

    pub fn is_non_tradable(self, date: NaiveDate) -> bool {
        self.weekend().contains(&date.weekday())
    }

    /// First tradable date on or after `date`, or `None` if the
    /// representable calendar ends before the market opens again.
    ///
    /// Both weekends are two days long, so at most two days are added.
    pub fn checked_next_tradable_date(self, date: NaiveDate) -> Option<NaiveDate> {
        let mut current = date;
        while self.is_non_tradable(current) {
            current = current.succ_opt()?;
        }
        Some(current)
    }

    /// First tradable date on or after `date`.
    ///
    /// Within the last two days of the calendar there may be no such
    /// date; `NaiveDate::MAX` is returned then, closed as it is.
    /// [`Instruction`](crate::core::instruction::Instruction) rejects
    /// those settlement dates, so its effective date is always open.
    pub fn next_tradable_date(self, date: NaiveDate) -> NaiveDate {
        self.checked_next_tradable_date(date).unwrap_or(NaiveDate::MAX)
    }
}

/// Whether the home market of `currency` trades Sunday to Thursday.
pub fn is_sunday_to_thursday_market(currency: &CurrencyCode) -> bool {
    WeekConvention::for_currency(currency) == WeekConvention::SundayToThursday
}

/// Whether `date` is a closed day for the market of `currency`.
pub fn is_non_tradable_day(date: NaiveDate, currency: &CurrencyCode) -> bool {
    WeekConvention::for_currency(currency).is_non_tradable(date)
}

/// Roll `date` forward to the first day the market of `currency` is open.
///
/// Saturates at `NaiveDate::MAX`, see [`WeekConvention::next_tradable_date`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_settlement_reporting::core::calendar::next_tradable_date;
/// use fx_settlement_reporting::core::currency::CurrencyCode;
///
/// let friday = NaiveDate::from_ymd_opt(2016, 6, 17).unwrap();
/// let sunday = NaiveDate::from_ymd_opt(2016, 6, 19).unwrap();
/// assert_eq!(next_tradable_date(friday, &CurrencyCode::new("AED")), sunday);
/// assert_eq!(next_tradable_date(friday, &CurrencyCode::new("USD")), friday);
/// ```
pub fn next_tradable_date(date: NaiveDate, currency: &CurrencyCode) -> NaiveDate {
    WeekConvention::for_currency(currency).next_tradable_date(date)
}

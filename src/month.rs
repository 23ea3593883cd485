use chrono::{Datelike, Local, Month, Months, NaiveDate};
use derive_more::Display;
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Canonical string form of a [`DisplayedMonth`] (`yyyy-MM`).
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Format of the month title shown above the grid (`MMMM yyyy`).
pub const TITLE_FORMAT: &str = "%B %Y";

/// A calendar month identified by year and month only.
///
/// Internally the month is anchored at its first day so that no day-of-month
/// component can leak into comparisons.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "{}", "first.format(MONTH_FORMAT)")]
pub struct DisplayedMonth {
    first: NaiveDate,
}

impl DisplayedMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| DisplayedMonth { first })
    }

    /// The month containing `date`.
    pub fn of<T: Datelike>(date: &T) -> Self {
        DisplayedMonth {
            first: NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or_default(),
        }
    }

    pub fn current() -> Self {
        Self::of(&Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.first.month()).unwrap_or(Month::January)
    }

    pub fn number_from_month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year() && date.month() == self.number_from_month()
    }

    /// `n` months later. `None` if the result leaves chrono's date range.
    pub fn checked_add(&self, n: u32) -> Option<Self> {
        self.first
            .checked_add_months(Months::new(n))
            .map(|first| DisplayedMonth { first })
    }

    /// `n` months earlier. `None` if the result leaves chrono's date range.
    pub fn checked_sub(&self, n: u32) -> Option<Self> {
        self.first
            .checked_sub_months(Months::new(n))
            .map(|first| DisplayedMonth { first })
    }

    /// The following month; saturates at the end of the representable range.
    pub fn succ(&self) -> Self {
        self.checked_add(1).unwrap_or(*self)
    }

    /// The preceding month; saturates at the start of the representable range.
    pub fn pred(&self) -> Self {
        self.checked_sub(1).unwrap_or(*self)
    }

    pub fn title(&self) -> String {
        self.first.format(TITLE_FORMAT).to_string()
    }
}

impl Default for DisplayedMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl FromStr for DisplayedMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono refuses to parse a date without a day, so pin it to the 1st
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|e| Error::from(e).with_msg(&format!("'{}' is not a yyyy-MM month", s)))?;

        if first.format(MONTH_FORMAT).to_string() != s {
            return Err(Error::new(
                ErrorKind::DateParse,
                &format!("'{}' is not a yyyy-MM month", s),
            ));
        }

        Ok(DisplayedMonth { first })
    }
}

/// Sign of the most recent navigation, used to orient the slide animation.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    #[display(fmt = "-1")]
    Backward,
    #[display(fmt = "0")]
    Neutral,
    #[display(fmt = "+1")]
    Forward,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Backward => -1,
            Direction::Neutral => 0,
            Direction::Forward => 1,
        }
    }

    /// Direction of travel when moving from `from` to `to`.
    pub fn between(from: &DisplayedMonth, to: &DisplayedMonth) -> Self {
        match to.cmp(from) {
            Ordering::Less => Direction::Backward,
            Ordering::Equal => Direction::Neutral,
            Ordering::Greater => Direction::Forward,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Neutral
    }
}

//! Calendar-based spans.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::TemporalError;
use crate::names;

/// Unit words for rendering a period; absent entries use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PeriodLabels {
    pub years: Option<String>,
    pub months: Option<String>,
    pub days: Option<String>,
}

impl PeriodLabels {
    pub fn years(&self) -> &str {
        self.years.as_deref().unwrap_or(names::YEAR_LABEL)
    }

    pub fn months(&self) -> &str {
        self.months.as_deref().unwrap_or(names::MONTH_LABEL)
    }

    pub fn days(&self) -> &str {
        self.days.as_deref().unwrap_or(names::DAY_LABEL)
    }

    /// Field-wise: our label where we have one, otherwise theirs.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            years: self.years.clone().or_else(|| other.years.clone()),
            months: self.months.clone().or_else(|| other.months.clone()),
            days: self.days.clone().or_else(|| other.days.clone()),
        }
    }
}

/// A span of years, months and days.
///
/// Fields are kept as given: adding days never rolls them into months, since
/// month lengths depend on the date the period is applied to. Ordering is
/// lexicographic over (years, months, days).
#[derive(Debug, Clone, Default)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
    labels: PeriodLabels,
}

fn overflow() -> TemporalError {
    TemporalError::out_of_range("period arithmetic")
}

fn narrow(value: i64) -> Result<i32, TemporalError> {
    i32::try_from(value).map_err(|_| overflow())
}

impl Period {
    pub fn of(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
            labels: PeriodLabels::default(),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn of_years(years: i32) -> Self {
        Self::of(years, 0, 0)
    }

    pub fn of_months(months: i32) -> Self {
        Self::of(0, months, 0)
    }

    pub fn of_weeks(weeks: i32) -> Result<Self, TemporalError> {
        weeks
            .checked_mul(7)
            .map(Self::of_days)
            .ok_or_else(overflow)
    }

    pub fn of_days(days: i32) -> Self {
        Self::of(0, 0, days)
    }

    #[must_use]
    pub fn with_labels(mut self, labels: PeriodLabels) -> Self {
        self.labels = labels;
        self
    }

    pub const fn years(&self) -> i32 {
        self.years
    }

    pub const fn months(&self) -> i32 {
        self.months
    }

    pub const fn days(&self) -> i32 {
        self.days
    }

    pub const fn labels(&self) -> &PeriodLabels {
        &self.labels
    }

    /// Years and months as a month count.
    pub fn total_months(&self) -> i64 {
        i64::from(self.years) * 12 + i64::from(self.months)
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    pub fn plus(&self, other: &Self) -> Result<Self, TemporalError> {
        Ok(Self {
            years: self.years.checked_add(other.years).ok_or_else(overflow)?,
            months: self.months.checked_add(other.months).ok_or_else(overflow)?,
            days: self.days.checked_add(other.days).ok_or_else(overflow)?,
            labels: self.labels.merge(&other.labels),
        })
    }

    pub fn minus(&self, other: &Self) -> Result<Self, TemporalError> {
        self.plus(&other.negated()?)
    }

    pub fn negated(&self) -> Result<Self, TemporalError> {
        Ok(Self {
            years: self.years.checked_neg().ok_or_else(overflow)?,
            months: self.months.checked_neg().ok_or_else(overflow)?,
            days: self.days.checked_neg().ok_or_else(overflow)?,
            labels: self.labels.clone(),
        })
    }

    pub fn plus_years(&self, years: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_years(narrow(years)?))
    }

    pub fn plus_months(&self, months: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_months(narrow(months)?))
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_weeks(narrow(weeks)?)?)
    }

    pub fn plus_days(&self, days: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_days(narrow(days)?))
    }

    const fn key(&self) -> (i32, i32, i32) {
        (self.years, self.months, self.days)
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

//! Calendar dates in either chronology.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::chronology::{self, Calendar, Chronology};
use crate::clock::Clock;
use crate::error::TemporalError;
use crate::period::Period;
use crate::zone::{Frame, ZoneOrOffset};

/// How the caller named the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthRef {
    Number(i64),
    Name(String),
    /// Both forms; they must agree.
    Both { number: i64, name: String },
}

impl From<i64> for MonthRef {
    fn from(number: i64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for MonthRef {
    fn from(number: i32) -> Self {
        Self::Number(i64::from(number))
    }
}

impl From<u32> for MonthRef {
    fn from(number: u32) -> Self {
        Self::Number(i64::from(number))
    }
}

impl From<&str> for MonthRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for MonthRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl MonthRef {
    fn resolve(self, chronology: Chronology) -> Result<(u32, String), TemporalError> {
        match self {
            Self::Number(number) => {
                let name = chronology.resolve_month_name(number)?;
                let number =
                    u32::try_from(number).map_err(|_| TemporalError::InvalidMonthNumber(number))?;
                Ok((number, name.to_string()))
            }
            Self::Name(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(TemporalError::construction(
                        "month name",
                        name,
                        "must not be empty",
                    ));
                }
                let number = chronology.resolve_month_number(name)?;
                Ok((number, name.to_string()))
            }
            Self::Both { number, name } => {
                chronology.resolve_month_name(number)?;
                let (resolved, name) = Self::Name(name).resolve(chronology)?;
                if i64::from(resolved) != number {
                    return Err(TemporalError::construction(
                        "month name",
                        name,
                        "does not match the month number",
                    ));
                }
                Ok((resolved, name))
            }
        }
    }
}

/// A day in a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Date {
    day: u32,
    month: u32,
    month_name: String,
    year: i32,
    calendar: Calendar,
    epoch_day: i64,
}

impl Date {
    /// Builds a date, resolving the month against the calendar's chronology.
    pub fn new(
        day: u32,
        month: impl Into<MonthRef>,
        year: i32,
        calendar: Calendar,
    ) -> Result<Self, TemporalError> {
        let chronology = calendar.chronology();
        let (month, month_name) = month.into().resolve(chronology)?;
        let epoch_day = chronology.to_epoch_day(year, month, day)?;
        Ok(Self {
            day,
            month,
            month_name,
            year,
            calendar,
            epoch_day,
        })
    }

    /// Builds a date in the default calendar.
    pub fn of(day: u32, month: impl Into<MonthRef>, year: i32) -> Result<Self, TemporalError> {
        Self::new(day, month, year, Calendar::default())
    }

    /// The date that falls on an epoch day in the given calendar.
    pub fn of_epoch_day(epoch_day: i64, calendar: Calendar) -> Result<Self, TemporalError> {
        let chronology = calendar.chronology();
        let (year, month, day) = chronology.from_epoch_day(epoch_day)?;
        let month_name = chronology.resolve_month_name(i64::from(month))?.to_string();
        Ok(Self {
            day,
            month,
            month_name,
            year,
            calendar,
            epoch_day,
        })
    }

    pub(crate) fn of_iso(date: NaiveDate, calendar: Calendar) -> Result<Self, TemporalError> {
        Self::of_epoch_day(chronology::epoch_day_of(date), calendar)
    }

    /// Today in the given zone, or in the implicit frame.
    pub fn now(
        clock: &impl Clock,
        calendar: Calendar,
        zone: Option<&ZoneOrOffset>,
    ) -> Result<Self, TemporalError> {
        let local = Frame::of(zone).to_local(clock.now());
        Self::of_iso(local.date(), calendar)
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The month name, spelled as it was given.
    pub fn month_name(&self) -> &str {
        &self.month_name
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub const fn chronology(&self) -> Chronology {
        self.calendar.chronology()
    }

    pub const fn to_epoch_day(&self) -> i64 {
        self.epoch_day
    }

    pub fn day_of_year(&self) -> Result<u32, TemporalError> {
        self.chronology()
            .day_of_year(self.year, self.month, self.day)
    }

    pub fn day_of_week(&self) -> &'static str {
        chronology::day_of_week_name(self.epoch_day)
    }

    pub const fn is_leap_year(&self) -> bool {
        self.chronology().is_leap_year(self.year)
    }

    pub fn month_length(&self) -> Result<u32, TemporalError> {
        self.chronology().month_length(self.month, self.year)
    }

    pub const fn year_length(&self) -> u32 {
        self.chronology().year_length(self.year)
    }

    /// The same day expressed in another calendar.
    pub fn to_calendar(&self, calendar: Calendar) -> Result<Self, TemporalError> {
        Self::of_epoch_day(self.epoch_day, calendar)
    }

    /// The proleptic Gregorian date of this day.
    pub fn to_iso(&self) -> Result<NaiveDate, TemporalError> {
        chronology::iso_date(self.epoch_day)
    }

    /// Start of the day in the implicit frame.
    pub fn instant(&self) -> Result<chrono::DateTime<Utc>, TemporalError> {
        Frame::implicit().to_utc(self.to_iso()?.and_time(NaiveTime::MIN))
    }

    pub fn plus_years(&self, years: i64) -> Result<Self, TemporalError> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| TemporalError::out_of_range("year arithmetic"))?;
        self.plus_months(months)
    }

    pub fn plus_months(&self, months: i64) -> Result<Self, TemporalError> {
        if months == 0 {
            return Ok(self.clone());
        }
        let (year, month, day) =
            self.chronology()
                .plus_months(self.year, self.month, self.day, months)?;
        self.with_fields(year, month, day)
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, TemporalError> {
        let days = weeks
            .checked_mul(7)
            .ok_or_else(|| TemporalError::out_of_range("week arithmetic"))?;
        self.plus_days(days)
    }

    pub fn plus_days(&self, days: i64) -> Result<Self, TemporalError> {
        if days == 0 {
            return Ok(self.clone());
        }
        let epoch_day = self
            .epoch_day
            .checked_add(days)
            .ok_or_else(|| TemporalError::out_of_range("day arithmetic"))?;
        let (year, month, day) = self.chronology().from_epoch_day(epoch_day)?;
        self.with_fields(year, month, day)
    }

    /// Applies a calendar span: months (years counted as twelve) first, then days.
    pub fn plus_period(&self, period: &Period) -> Result<Self, TemporalError> {
        let months = i64::from(period.years()) * 12 + i64::from(period.months());
        self.plus_months(months)?.plus_days(i64::from(period.days()))
    }

    /// Rebuilds the date, keeping the month spelling while the month is unchanged.
    fn with_fields(&self, year: i32, month: u32, day: u32) -> Result<Self, TemporalError> {
        let chronology = self.chronology();
        let month_name = if month == self.month {
            self.month_name.clone()
        } else {
            chronology.resolve_month_name(i64::from(month))?.to_string()
        };
        Ok(Self {
            day,
            month,
            month_name,
            year,
            calendar: self.calendar.clone(),
            epoch_day: chronology.to_epoch_day(year, month, day)?,
        })
    }
}

//! Calendar rule-sets: leap years, month lengths, month names, day numbering.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TemporalError;
use crate::{hijri, names};

/// Rata die of 1970-01-01, the zero of epoch-day numbering.
pub(crate) const UNIX_EPOCH_RATA_DIE: i64 = 719_163;

const SOLAR_MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A supported calendar rule-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Chronology {
    /// Proleptic Gregorian calendar.
    #[default]
    Solar,
    /// Tabular Hijri calendar.
    Lunar,
}

impl Chronology {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
        }
    }

    /// Canonical localized calendar name, used when a calendar is built without one.
    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            Self::Solar => names::SOLAR_CALENDAR_NAMES[0],
            Self::Lunar => names::LUNAR_CALENDAR_NAMES[0],
        }
    }

    /// Resolves a localized calendar name or one of its aliases.
    pub fn from_name(name: &str) -> Result<Self, TemporalError> {
        let name = name.trim();
        let matches = |candidates: &[&str]| candidates.iter().any(|c| c.eq_ignore_ascii_case(name));
        if matches(names::SOLAR_CALENDAR_NAMES) {
            Ok(Self::Solar)
        } else if matches(names::LUNAR_CALENDAR_NAMES) {
            Ok(Self::Lunar)
        } else {
            Err(TemporalError::construction(
                "calendar",
                name,
                "unknown calendar name",
            ))
        }
    }

    #[must_use]
    pub const fn is_leap_year(&self, year: i32) -> bool {
        match self {
            Self::Solar => year % 4 == 0 && (year % 100 != 0 || year % 400 == 0),
            Self::Lunar => hijri::is_leap_year(year as i64),
        }
    }

    pub fn month_length(&self, month: u32, year: i32) -> Result<u32, TemporalError> {
        let index = month_index(i64::from(month))?;
        Ok(match self {
            Self::Solar if month == 2 && self.is_leap_year(year) => 29,
            Self::Solar => SOLAR_MONTH_LENGTHS[index],
            Self::Lunar => hijri::month_length(month, i64::from(year)),
        })
    }

    /// 366/365 for the solar calendar, 355/354 for the lunar one.
    #[must_use]
    pub const fn year_length(&self, year: i32) -> u32 {
        match self {
            Self::Solar => {
                if self.is_leap_year(year) {
                    366
                } else {
                    365
                }
            }
            Self::Lunar => hijri::year_length(year as i64),
        }
    }

    pub fn resolve_month_number(&self, name: &str) -> Result<u32, TemporalError> {
        let number = match self {
            Self::Solar => names::solar_month_number(name),
            Self::Lunar => names::lunar_month_number(name),
        };
        number.ok_or_else(|| TemporalError::UnknownMonthName {
            name: name.to_string(),
            chronology: *self,
        })
    }

    pub fn resolve_month_name(&self, number: i64) -> Result<&'static str, TemporalError> {
        let index = month_index(number)?;
        Ok(match self {
            Self::Solar => names::SOLAR_MONTHS[index],
            Self::Lunar => names::LUNAR_MONTHS[index],
        })
    }

    /// Checks that (year, month, day) names a real day of this calendar.
    pub fn validate(&self, year: i32, month: u32, day: u32) -> Result<(), TemporalError> {
        if day < 1 {
            return Err(TemporalError::construction("day", day, "must be at least 1"));
        }
        let length = self.month_length(month, year)?;
        if day > length {
            return Err(TemporalError::construction(
                "day",
                day,
                "exceeds the length of the month",
            ));
        }
        Ok(())
    }

    /// Days since 1970-01-01 for a valid date of this calendar.
    pub fn to_epoch_day(&self, year: i32, month: u32, day: u32) -> Result<i64, TemporalError> {
        self.validate(year, month, day)?;
        let rata_die = match self {
            Self::Solar => {
                let date = NaiveDate::from_ymd_opt(year, month, day)
                    .ok_or_else(|| TemporalError::out_of_range("date"))?;
                i64::from(date.num_days_from_ce())
            }
            Self::Lunar => hijri::to_rata_die(i64::from(year), month, day),
        };
        Ok(rata_die - UNIX_EPOCH_RATA_DIE)
    }

    /// (year, month, day) of an epoch day in this calendar.
    pub fn from_epoch_day(&self, epoch_day: i64) -> Result<(i32, u32, u32), TemporalError> {
        let rata_die = epoch_day
            .checked_add(UNIX_EPOCH_RATA_DIE)
            .ok_or_else(|| TemporalError::out_of_range("epoch day"))?;
        match self {
            Self::Solar => {
                let date = i32::try_from(rata_die)
                    .ok()
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .ok_or_else(|| TemporalError::out_of_range("epoch day"))?;
                Ok((date.year(), date.month(), date.day()))
            }
            Self::Lunar => {
                let (year, month, day) = hijri::from_rata_die(rata_die)
                    .ok_or_else(|| TemporalError::out_of_range("epoch day"))?;
                let year =
                    i32::try_from(year).map_err(|_| TemporalError::out_of_range("epoch day"))?;
                Ok((year, month, day))
            }
        }
    }

    pub fn day_of_year(&self, year: i32, month: u32, day: u32) -> Result<u32, TemporalError> {
        self.validate(year, month, day)?;
        Ok(match self {
            Self::Solar => {
                let mut ordinal = day;
                for m in 1..month {
                    ordinal += self.month_length(m, year)?;
                }
                ordinal
            }
            Self::Lunar => hijri::day_of_year(i64::from(year), month, day),
        })
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    pub fn plus_months(
        &self,
        year: i32,
        month: u32,
        day: u32,
        months: i64,
    ) -> Result<(i32, u32, u32), TemporalError> {
        let overflow = || TemporalError::out_of_range("month arithmetic");
        let total = i64::from(year)
            .checked_mul(12)
            .and_then(|t| t.checked_add(i64::from(month) - 1))
            .and_then(|t| t.checked_add(months))
            .ok_or_else(overflow)?;
        let new_year = i32::try_from(total.div_euclid(12)).map_err(|_| overflow())?;
        let new_month = u32::try_from(total.rem_euclid(12) + 1).map_err(|_| overflow())?;
        let new_day = day.min(self.month_length(new_month, new_year)?);
        Ok((new_year, new_month, new_day))
    }
}

impl fmt::Display for Chronology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chronology {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

fn month_index(number: i64) -> Result<usize, TemporalError> {
    if (1..=12).contains(&number) {
        usize::try_from(number - 1).map_err(|_| TemporalError::InvalidMonthNumber(number))
    } else {
        Err(TemporalError::InvalidMonthNumber(number))
    }
}

/// The proleptic Gregorian date of an epoch day.
pub(crate) fn iso_date(epoch_day: i64) -> Result<NaiveDate, TemporalError> {
    epoch_day
        .checked_add(UNIX_EPOCH_RATA_DIE)
        .and_then(|rd| i32::try_from(rd).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| TemporalError::out_of_range("date"))
}

pub(crate) fn epoch_day_of(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_RATA_DIE
}

/// Localized weekday name of an epoch day.
///
/// Epoch day 0 (1970-01-01) is a Thursday: `((0 + 3) mod 7) + 1 = 4`.
#[must_use]
pub fn day_of_week_name(epoch_day: i64) -> &'static str {
    let index = epoch_day.wrapping_add(3).rem_euclid(7) + 1;
    usize::try_from(index)
        .ok()
        .and_then(names::weekday)
        .unwrap_or(names::WEEKDAYS[0])
}

/// A chronology paired with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Calendar {
    name: String,
    chronology: Chronology,
}

impl Calendar {
    /// Builds a calendar; the name defaults to the chronology's canonical name.
    pub fn new(name: Option<String>, chronology: Chronology) -> Self {
        let name = name.unwrap_or_else(|| chronology.canonical_name().to_string());
        Self { name, chronology }
    }

    /// Builds a calendar from a localized name, keeping that spelling.
    pub fn named(name: impl Into<String>) -> Result<Self, TemporalError> {
        let name = name.into();
        let chronology = Chronology::from_name(&name)?;
        Ok(Self { name, chronology })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn chronology(&self) -> Chronology {
        self.chronology
    }
}

impl From<Chronology> for Calendar {
    fn from(chronology: Chronology) -> Self {
        Self::new(None, chronology)
    }
}

impl Default for Calendar {
    /// The calendar of the process-wide default chronology.
    fn default() -> Self {
        Self::from(crate::config::settings().chronology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solar_leap_years() {
        assert!(Chronology::Solar.is_leap_year(2024));
        assert!(Chronology::Solar.is_leap_year(2000));
        assert!(!Chronology::Solar.is_leap_year(1900));
        assert!(!Chronology::Solar.is_leap_year(2023));
        assert!(Chronology::Solar.is_leap_year(-4));
    }

    #[test]
    fn year_lengths_per_chronology() {
        assert_eq!(Chronology::Solar.year_length(2024), 366);
        assert_eq!(Chronology::Solar.year_length(2023), 365);
        assert_eq!(Chronology::Lunar.year_length(1445), 355);
        assert_eq!(Chronology::Lunar.year_length(1446), 354);

        for year in 1300..1600 {
            assert!([354, 355].contains(&Chronology::Lunar.year_length(year)));
        }
        for year in 1800..2200 {
            assert!([365, 366].contains(&Chronology::Solar.year_length(year)));
        }
    }

    #[test]
    fn month_lengths() {
        assert_eq!(Chronology::Solar.month_length(2, 2024).unwrap(), 29);
        assert_eq!(Chronology::Solar.month_length(2, 2023).unwrap(), 28);
        assert_eq!(Chronology::Solar.month_length(4, 2023).unwrap(), 30);
        assert_eq!(Chronology::Lunar.month_length(9, 1445).unwrap(), 30);
        assert_eq!(Chronology::Lunar.month_length(12, 1445).unwrap(), 30);
        assert_eq!(Chronology::Lunar.month_length(12, 1446).unwrap(), 29);
        assert_eq!(
            Chronology::Solar.month_length(13, 2024),
            Err(TemporalError::InvalidMonthNumber(13))
        );
    }

    #[test]
    fn month_name_resolution_is_scoped_to_chronology() {
        assert_eq!(Chronology::Solar.resolve_month_number("مارس").unwrap(), 3);
        assert_eq!(Chronology::Lunar.resolve_month_number("رمضان").unwrap(), 9);
        assert_eq!(
            Chronology::Solar.resolve_month_number("رمضان"),
            Err(TemporalError::UnknownMonthName {
                name: "رمضان".to_string(),
                chronology: Chronology::Solar,
            })
        );
        assert_eq!(Chronology::Lunar.resolve_month_name(1).unwrap(), "محرم");
        assert_eq!(
            Chronology::Lunar.resolve_month_name(0),
            Err(TemporalError::InvalidMonthNumber(0))
        );
    }

    #[test]
    fn epoch_day_roundtrip_in_both_chronologies() {
        for chronology in [Chronology::Solar, Chronology::Lunar] {
            for epoch_day in [-800_000, -1, 0, 1, 19_723, 60_000] {
                let (y, m, d) = chronology.from_epoch_day(epoch_day).unwrap();
                assert_eq!(chronology.to_epoch_day(y, m, d).unwrap(), epoch_day);
            }
        }
    }

    #[test]
    fn epoch_day_zero_is_new_year_1970() {
        assert_eq!(Chronology::Solar.to_epoch_day(1970, 1, 1).unwrap(), 0);
        assert_eq!(Chronology::Solar.to_epoch_day(2024, 1, 1).unwrap(), 19_723);
    }

    #[test]
    fn weekday_names() {
        assert_eq!(day_of_week_name(0), "الخميس");
        assert_eq!(day_of_week_name(19_723), "الاثنين");
        assert_eq!(day_of_week_name(-1), "الأربعاء");
    }

    #[test]
    fn plus_months_clamps_day() {
        assert_eq!(
            Chronology::Solar.plus_months(2024, 1, 31, 1).unwrap(),
            (2024, 2, 29)
        );
        assert_eq!(
            Chronology::Solar.plus_months(2024, 3, 15, -15).unwrap(),
            (2022, 12, 15)
        );
        assert_eq!(
            Chronology::Lunar.plus_months(1445, 1, 30, 1).unwrap(),
            (1445, 2, 29)
        );
    }

    #[test]
    fn day_of_year() {
        assert_eq!(Chronology::Solar.day_of_year(2024, 3, 1).unwrap(), 61);
        assert_eq!(Chronology::Solar.day_of_year(2023, 12, 31).unwrap(), 365);
        assert_eq!(Chronology::Lunar.day_of_year(1445, 9, 1).unwrap(), 237);
    }

    #[test]
    fn validate_rejects_bad_days() {
        assert!(Chronology::Solar.validate(2023, 2, 29).is_err());
        assert!(Chronology::Solar.validate(2024, 2, 29).is_ok());
        assert!(Chronology::Lunar.validate(1445, 2, 30).is_err());
        assert!(Chronology::Solar.validate(2024, 1, 0).is_err());
    }

    #[test]
    fn calendar_names() {
        assert_eq!(Calendar::from(Chronology::Lunar).name(), "الهجري");
        let calendar = Calendar::named("التقويم الهجري").unwrap();
        assert_eq!(calendar.chronology(), Chronology::Lunar);
        assert_eq!(calendar.name(), "التقويم الهجري");
        assert!(Calendar::named("يولياني").is_err());
        assert_eq!("gregorian".parse::<Chronology>().unwrap(), Chronology::Solar);
    }

    #[test]
    fn chronology_serde_roundtrip() {
        let json = serde_json::to_string(&Chronology::Lunar).unwrap();
        assert_eq!(json, "\"lunar\"");
        let parsed: Chronology = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Chronology::Lunar);
    }
}

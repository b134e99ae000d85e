//! The closed set of point kinds, and spans between two points.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::amount::Amount;
use crate::chronology::{self, Chronology};
use crate::combined::CombinedAmount;
use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::{Operator, TemporalError, TemporalKind};
use crate::period::Period;
use crate::time::Time;
use crate::zone::{Frame, ZoneOrOffset};

/// A date, a time of day, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Date(Date),
    Time(Time),
    DateTime(DateTime),
}

impl Point {
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::Date(_) => TemporalKind::Date,
            Self::Time(_) => TemporalKind::Time,
            Self::DateTime(_) => TemporalKind::DateTime,
        }
    }

    pub const fn date(&self) -> Option<&Date> {
        match self {
            Self::Date(date) => Some(date),
            Self::DateTime(dt) => Some(dt.date()),
            Self::Time(_) => None,
        }
    }

    pub const fn time(&self) -> Option<&Time> {
        match self {
            Self::Time(time) => Some(time),
            Self::DateTime(dt) => Some(dt.time()),
            Self::Date(_) => None,
        }
    }

    pub const fn zone(&self) -> Option<&ZoneOrOffset> {
        match self {
            Self::Time(time) => time.zone(),
            Self::DateTime(dt) => dt.zone(),
            Self::Date(_) => None,
        }
    }

    /// The absolute instant used for ordering.
    pub fn instant(&self) -> Result<chrono::DateTime<Utc>, TemporalError> {
        match self {
            Self::Date(date) => date.instant(),
            Self::Time(time) => time.instant(),
            Self::DateTime(dt) => Ok(dt.instant()),
        }
    }

    /// The frame this point's wall fields are read in.
    fn frame(&self) -> Frame {
        Frame::of(self.zone())
    }

    /// Wall reading; dates read as their start of day, times on 1970-01-01.
    fn wall(&self) -> Result<NaiveDateTime, TemporalError> {
        match self {
            Self::Date(date) => Ok(date.to_iso()?.and_time(NaiveTime::MIN)),
            Self::Time(time) => Ok(NaiveDate::default().and_time(time.to_naive())),
            Self::DateTime(dt) => dt.to_naive(),
        }
    }

    fn chronology(&self) -> Chronology {
        self.date().map_or(Chronology::Solar, Date::chronology)
    }
}

impl From<Date> for Point {
    fn from(date: Date) -> Self {
        Self::Date(date)
    }
}

impl From<Time> for Point {
    fn from(time: Time) -> Self {
        Self::Time(time)
    }
}

impl From<DateTime> for Point {
    fn from(dt: DateTime) -> Self {
        Self::DateTime(dt)
    }
}

/// The span from `start` to `end`.
///
/// Two dates give a period. Otherwise `end` is read on `start`'s wall clock:
/// under a day gives a duration, longer gives a period plus the remaining
/// time (borrowing a day when the time of day went backwards), or just the
/// period when no time remains. A time of day cannot be measured against a
/// dated point.
pub fn between(start: &Point, end: &Point) -> Result<Amount, TemporalError> {
    match (start, end) {
        (Point::Date(from), Point::Date(to)) => {
            let to = to.to_calendar(from.calendar().clone())?;
            return Ok(Amount::Period(period_between(from, &to)?));
        }
        (Point::Time(_), Point::Date(_) | Point::DateTime(_))
        | (Point::Date(_) | Point::DateTime(_), Point::Time(_)) => {
            return Err(TemporalError::unsupported(
                Operator::Subtract,
                end.kind(),
                start.kind(),
            ));
        }
        _ => {}
    }

    let start_wall = start.wall()?;
    let end_wall = start.frame().to_local(end.instant()?);
    let difference = end_wall.signed_duration_since(start_wall);
    if difference.abs() < TimeDelta::days(1) {
        return Ok(Amount::Duration(Duration::from_delta(difference)));
    }

    let chronology = start.chronology();
    let calendar = chronology::Calendar::from(chronology);
    let from = Date::of_iso(start_wall.date(), calendar.clone())?;
    let to = Date::of_iso(end_wall.date(), calendar)?;
    let mut period = period_between(&from, &to)?;

    let mut time = end_wall.time().signed_duration_since(start_wall.time());
    if time < TimeDelta::zero() {
        time += TimeDelta::days(1);
        period = period.plus_days(-1)?;
    }

    if time.is_zero() {
        Ok(Amount::Period(period))
    } else {
        Ok(Amount::Combined(CombinedAmount::new(
            period,
            Duration::from_delta(time),
        )?))
    }
}

/// Whole years, months and days from one date to another of the same calendar.
fn period_between(from: &Date, to: &Date) -> Result<Period, TemporalError> {
    let overflow = || TemporalError::out_of_range("period between dates");
    let month_index = |d: &Date| i64::from(d.year()) * 12 + i64::from(d.month()) - 1;

    let mut total_months = month_index(to) - month_index(from);
    let mut days = i64::from(to.day()) - i64::from(from.day());
    if total_months > 0 && days < 0 {
        total_months -= 1;
        let anchor = from.plus_months(total_months)?;
        days = to.to_epoch_day() - anchor.to_epoch_day();
    } else if total_months < 0 && days > 0 {
        total_months += 1;
        days -= i64::from(to.month_length()?);
    }

    let years = i32::try_from(total_months / 12).map_err(|_| overflow())?;
    let months = i32::try_from(total_months % 12).map_err(|_| overflow())?;
    let days = i32::try_from(days).map_err(|_| overflow())?;
    Ok(Period::of(years, months, days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::Calendar;

    fn solar(day: u32, month: u32, year: i32) -> Date {
        Date::new(day, month, year, Calendar::from(Chronology::Solar)).unwrap()
    }

    fn at(date: Date, hour: u32, minute: u32) -> Point {
        let zone = ZoneOrOffset::parse("+03:00").unwrap();
        let time = Time::builder(hour, minute).zone(zone).build().unwrap();
        Point::DateTime(DateTime::new(date, time).unwrap())
    }

    #[test]
    fn dates_give_periods() {
        let span = between(&solar(15, 3, 2023).into(), &solar(25, 6, 2024).into()).unwrap();
        assert_eq!(span, Amount::Period(Period::of(1, 3, 10)));

        let span = between(&solar(31, 1, 2024).into(), &solar(1, 3, 2024).into()).unwrap();
        assert_eq!(span, Amount::Period(Period::of(0, 1, 1)));

        let span = between(&solar(25, 6, 2024).into(), &solar(15, 3, 2023).into()).unwrap();
        assert_eq!(span, Amount::Period(Period::of(-1, -3, -10)));
    }

    #[test]
    fn lunar_dates_count_lunar_months() {
        let lunar = Calendar::from(Chronology::Lunar);
        let from = Date::new(1, 9, 1445, lunar.clone()).unwrap();
        let to = Date::new(1, 10, 1445, lunar).unwrap();
        let span = between(&from.into(), &to.into()).unwrap();
        assert_eq!(span, Amount::Period(Period::of_months(1)));
    }

    #[test]
    fn short_spans_give_durations() {
        let span = between(&at(solar(1, 1, 2024), 22, 0), &at(solar(2, 1, 2024), 1, 30)).unwrap();
        assert_eq!(span, Amount::Duration(Duration::hms(3, 30, 0).unwrap()));
    }

    #[test]
    fn long_spans_give_period_and_remainder() {
        let span = between(&at(solar(1, 1, 2024), 22, 0), &at(solar(3, 1, 2024), 1, 30)).unwrap();
        let expected = CombinedAmount::new(Period::of_days(1), Duration::hms(3, 30, 0).unwrap()).unwrap();
        assert_eq!(span, Amount::Combined(expected));

        let span = between(&at(solar(1, 1, 2024), 8, 0), &at(solar(1, 2, 2024), 8, 0)).unwrap();
        assert_eq!(span, Amount::Period(Period::of_months(1)));
    }

    #[test]
    fn times_give_durations() {
        let from = Time::builder(8, 0).zone(ZoneOrOffset::parse("Z").unwrap()).build().unwrap();
        let to = Time::builder(17, 45).zone(ZoneOrOffset::parse("Z").unwrap()).build().unwrap();
        let span = between(&from.into(), &to.into()).unwrap();
        assert_eq!(span, Amount::Duration(Duration::hms(9, 45, 0).unwrap()));
    }

    #[test]
    fn time_against_a_date_is_unsupported() {
        let time = Point::Time(Time::of(8, 0).unwrap());
        let date = Point::Date(solar(1, 1, 2024));
        assert_eq!(
            between(&time, &date),
            Err(TemporalError::unsupported(
                Operator::Subtract,
                TemporalKind::Date,
                TemporalKind::Time
            ))
        );
    }
}

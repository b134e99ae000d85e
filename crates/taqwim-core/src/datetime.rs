//! Dates with a time of day, anchored to an instant.

use chrono::{NaiveDateTime, Utc};
use tracing::trace;

use crate::chronology::{self, Calendar};
use crate::clock::Clock;
use crate::date::Date;
use crate::duration::Duration;
use crate::error::TemporalError;
use crate::period::Period;
use crate::time::Time;
use crate::zone::{Frame, ZoneOrOffset};

/// A date and time of day, read in a zone (or the implicit frame).
///
/// The instant is derived from the wall fields on construction and kept in
/// step by every operation; it cannot be set on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
    zone: Option<ZoneOrOffset>,
    instant: chrono::DateTime<Utc>,
}

impl DateTime {
    /// Composes a date and a time; the time's zone becomes the date-time's zone.
    pub fn new(date: Date, time: Time) -> Result<Self, TemporalError> {
        let zone = time.zone().cloned();
        Self::resolve(date, time.with_zone(None), zone)
    }

    /// The wall reading of an instant in the given zone (or the implicit frame).
    pub fn from_instant(
        instant: chrono::DateTime<Utc>,
        calendar: Calendar,
        zone: Option<ZoneOrOffset>,
    ) -> Result<Self, TemporalError> {
        let local = Frame::of(zone.as_ref()).to_local(instant);
        Ok(Self {
            date: Date::of_iso(local.date(), calendar)?,
            time: Time::from_naive(local.time()),
            zone,
            instant,
        })
    }

    pub fn now(
        clock: &impl Clock,
        calendar: Calendar,
        zone: Option<ZoneOrOffset>,
    ) -> Result<Self, TemporalError> {
        Self::from_instant(clock.now(), calendar, zone)
    }

    /// Anchors wall fields to an instant. A reading that falls in a gap is
    /// moved to the wall time the instant actually shows.
    fn resolve(date: Date, time: Time, zone: Option<ZoneOrOffset>) -> Result<Self, TemporalError> {
        let frame = Frame::of(zone.as_ref());
        let wall = date.to_iso()?.and_time(time.to_naive());
        let instant = frame.to_utc(wall)?;
        let shown = frame.to_local(instant);
        let (date, time) = if shown == wall {
            (date, time)
        } else {
            let days = chronology::epoch_day_of(shown.date()) - date.to_epoch_day();
            (date.plus_days(days)?, time.restyled(shown.time()))
        };
        Ok(Self {
            date,
            time,
            zone,
            instant,
        })
    }

    pub const fn date(&self) -> &Date {
        &self.date
    }

    /// The time of day; its zone is carried by the date-time instead.
    pub const fn time(&self) -> &Time {
        &self.time
    }

    pub const fn zone(&self) -> Option<&ZoneOrOffset> {
        self.zone.as_ref()
    }

    pub const fn instant(&self) -> chrono::DateTime<Utc> {
        self.instant
    }

    pub fn frame(&self) -> Frame {
        Frame::of(self.zone.as_ref())
    }

    /// The wall reading as a proleptic Gregorian date-time.
    pub fn to_naive(&self) -> Result<NaiveDateTime, TemporalError> {
        Ok(self.date.to_iso()?.and_time(self.time.to_naive()))
    }

    /// Applies a calendar span to the wall date; the time of day is kept.
    pub fn plus_period(&self, period: &Period) -> Result<Self, TemporalError> {
        if period.is_zero() {
            return Ok(self.clone());
        }
        let date = self.date.plus_period(period)?;
        Self::resolve(date, self.time.clone(), self.zone.clone())
    }

    /// Moves the instant by a clock span and re-reads the wall fields, so a
    /// time-of-day overflow carries into the date.
    pub fn plus_duration(&self, duration: &Duration) -> Result<Self, TemporalError> {
        if duration.is_zero() {
            return Ok(self.clone());
        }
        let instant = self
            .instant
            .checked_add_signed(duration.span())
            .ok_or_else(|| TemporalError::out_of_range("date-time arithmetic"))?;
        let local = self.frame().to_local(instant);
        let days = chronology::epoch_day_of(local.date()) - self.date.to_epoch_day();
        trace!(days, "date-time duration carry");
        Ok(Self {
            date: self.date.plus_days(days)?,
            time: self.time.restyled(local.time()),
            zone: self.zone.clone(),
            instant,
        })
    }

    pub fn plus_years(&self, years: i64) -> Result<Self, TemporalError> {
        self.with_date(self.date.plus_years(years)?)
    }

    pub fn plus_months(&self, months: i64) -> Result<Self, TemporalError> {
        self.with_date(self.date.plus_months(months)?)
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, TemporalError> {
        self.with_date(self.date.plus_weeks(weeks)?)
    }

    pub fn plus_days(&self, days: i64) -> Result<Self, TemporalError> {
        self.with_date(self.date.plus_days(days)?)
    }

    pub fn plus_hours(&self, hours: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_hours(hours)?)
    }

    pub fn plus_minutes(&self, minutes: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_minutes(minutes)?)
    }

    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_seconds(seconds)?)
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_nanos(nanos))
    }

    fn with_date(&self, date: Date) -> Result<Self, TemporalError> {
        Self::resolve(date, self.time.clone(), self.zone.clone())
    }
}

//! Times of day, with optional seconds, fraction, meridiem and zone.

use chrono::{NaiveDate, NaiveTime, Timelike, Utc};

use crate::clock::Clock;
use crate::error::TemporalError;
use crate::names;
use crate::zone::{Frame, ZoneOrOffset};

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;
pub(crate) const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Morning or evening marker of a 12-hour clock reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// The localized marker rendered after the time.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Am => names::AM_MARKER,
            Self::Pm => names::PM_MARKER,
        }
    }

    /// Parses a localized or Latin marker (`ص`, `صباحاً`, `م`, `مساءً`, `am`, `pm`...).
    pub fn parse(text: &str) -> Option<Self> {
        names::parse_meridiem(text).map(|pm| if pm { Self::Pm } else { Self::Am })
    }

    const fn of_hour24(hour: u32) -> Self {
        if hour >= 12 { Self::Pm } else { Self::Am }
    }
}

/// Converts a 12-hour reading to a 24-hour one; without a meridiem the hour is already 24-hour.
#[must_use]
pub const fn hour24(hour: u32, meridiem: Option<Meridiem>) -> u32 {
    match meridiem {
        Some(Meridiem::Pm) if hour < 12 => hour + 12,
        Some(Meridiem::Am) if hour == 12 => 0,
        _ => hour,
    }
}

/// Parses the digits after a seconds decimal point as nanoseconds, right-padding to nine digits.
pub fn parse_fraction_to_nanos(fraction: &str) -> Result<u32, TemporalError> {
    parse_fraction(fraction, 9)
}

/// Parses the digits after a seconds decimal point as milliseconds, right-padding to three digits.
pub fn parse_millis_fraction(fraction: &str) -> Result<u32, TemporalError> {
    parse_fraction(fraction, 3)
}

fn parse_fraction(fraction: &str, width: usize) -> Result<u32, TemporalError> {
    if fraction.is_empty() {
        return Ok(0);
    }
    if fraction.len() > width {
        return Err(TemporalError::construction(
            "fraction",
            fraction,
            "has more digits than the unit allows",
        ));
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(TemporalError::construction(
            "fraction",
            fraction,
            "must contain only digits",
        ));
    }
    let padded = format!("{fraction:0<width$}");
    padded
        .parse()
        .map_err(|_| TemporalError::construction("fraction", fraction, "must contain only digits"))
}

/// A time of day.
///
/// `second` and `nano` remember whether the caller supplied them, which
/// controls rendering; arithmetic treats absent fields as zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Time {
    hour: u32,
    minute: u32,
    second: Option<u32>,
    nano: Option<u32>,
    meridiem: Option<Meridiem>,
    zone: Option<ZoneOrOffset>,
}

/// Collects optional time fields before validation.
#[derive(Debug, Clone)]
#[must_use]
pub struct TimeBuilder {
    hour: u32,
    minute: u32,
    second: Option<u32>,
    nano: Option<u32>,
    meridiem: Option<Meridiem>,
    zone: Option<ZoneOrOffset>,
}

impl TimeBuilder {
    pub const fn second(mut self, second: u32) -> Self {
        self.second = Some(second);
        self
    }

    pub const fn nano(mut self, nano: u32) -> Self {
        self.nano = Some(nano);
        self
    }

    pub const fn meridiem(mut self, meridiem: Meridiem) -> Self {
        self.meridiem = Some(meridiem);
        self
    }

    pub fn zone(mut self, zone: ZoneOrOffset) -> Self {
        self.zone = Some(zone);
        self
    }

    pub fn build(self) -> Result<Time, TemporalError> {
        let hour_range = if self.meridiem.is_some() { 1..=12 } else { 0..=23 };
        if !hour_range.contains(&self.hour) {
            let reason = if self.meridiem.is_some() {
                "must be between 1 and 12 with a meridiem"
            } else {
                "must be between 0 and 23"
            };
            return Err(TemporalError::construction("hour", self.hour, reason));
        }
        if self.minute > 59 {
            return Err(TemporalError::construction(
                "minute",
                self.minute,
                "must be between 0 and 59",
            ));
        }
        if let Some(second) = self.second.filter(|s| *s > 59) {
            return Err(TemporalError::construction(
                "second",
                second,
                "must be between 0 and 59",
            ));
        }
        if let Some(nano) = self.nano.filter(|n| i64::from(*n) >= NANOS_PER_SECOND) {
            return Err(TemporalError::construction(
                "nanosecond",
                nano,
                "must be between 0 and 999999999",
            ));
        }
        Ok(Time {
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            nano: self.nano,
            meridiem: self.meridiem,
            zone: self.zone,
        })
    }
}

impl Time {
    /// Starts a time from its required fields.
    pub const fn builder(hour: u32, minute: u32) -> TimeBuilder {
        TimeBuilder {
            hour,
            minute,
            second: None,
            nano: None,
            meridiem: None,
            zone: None,
        }
    }

    /// A 24-hour time with hour and minute only.
    pub fn of(hour: u32, minute: u32) -> Result<Self, TemporalError> {
        Self::builder(hour, minute).build()
    }

    pub fn of_second_of_day(second_of_day: i64) -> Result<Self, TemporalError> {
        if !(0..SECONDS_PER_DAY).contains(&second_of_day) {
            return Err(TemporalError::construction(
                "second of day",
                second_of_day,
                "must be between 0 and 86399",
            ));
        }
        Self::of_nano_of_day(second_of_day * NANOS_PER_SECOND)
    }

    pub fn of_nano_of_day(nano_of_day: i64) -> Result<Self, TemporalError> {
        if !(0..NANOS_PER_DAY).contains(&nano_of_day) {
            return Err(TemporalError::construction(
                "nano of day",
                nano_of_day,
                "must be between 0 and 86399999999999",
            ));
        }
        let template = Self::builder(0, 0).build()?;
        Ok(template.with_nano_of_day(nano_of_day))
    }

    /// The current time in the given zone, or in the implicit frame.
    pub fn now(clock: &impl Clock, zone: Option<ZoneOrOffset>) -> Self {
        let local = Frame::of(zone.as_ref()).to_local(clock.now());
        Self::from_naive(local.time()).with_zone(zone)
    }

    /// A 24-hour reading with seconds; the fraction only when non-zero.
    pub(crate) fn from_naive(naive: NaiveTime) -> Self {
        let nano = naive.nanosecond().min(999_999_999);
        Self {
            hour: naive.hour(),
            minute: naive.minute(),
            second: Some(naive.second()),
            nano: (nano != 0).then_some(nano),
            meridiem: None,
            zone: None,
        }
    }

    /// A time carrying `naive`'s reading in this time's style: the meridiem
    /// clock is kept, and optional fields stay absent while they are zero.
    pub(crate) fn restyled(&self, naive: NaiveTime) -> Self {
        let hour24 = naive.hour();
        let (hour, meridiem) = match self.meridiem {
            Some(_) => {
                let hour12 = match hour24 % 12 {
                    0 => 12,
                    h => h,
                };
                (hour12, Some(Meridiem::of_hour24(hour24)))
            }
            None => (hour24, None),
        };
        let second = naive.second();
        let nano = naive.nanosecond().min(999_999_999);
        Self {
            hour,
            minute: naive.minute(),
            second: (self.second.is_some() || second != 0 || nano != 0).then_some(second),
            nano: (self.nano.is_some() || nano != 0).then_some(nano),
            meridiem,
            zone: self.zone.clone(),
        }
    }

    /// Hour of day, 0 to 23.
    pub const fn hour(&self) -> u32 {
        hour24(self.hour, self.meridiem)
    }

    /// Hour as stored: 1 to 12 when a meridiem is present.
    pub const fn clock_hour(&self) -> u32 {
        self.hour
    }

    pub const fn minute(&self) -> u32 {
        self.minute
    }

    pub const fn second(&self) -> u32 {
        match self.second {
            Some(s) => s,
            None => 0,
        }
    }

    pub const fn nano(&self) -> u32 {
        match self.nano {
            Some(n) => n,
            None => 0,
        }
    }

    pub const fn millisecond(&self) -> u32 {
        self.nano() / 1_000_000
    }

    /// The second as supplied, if it was.
    pub const fn explicit_second(&self) -> Option<u32> {
        self.second
    }

    /// The nanosecond as supplied, if it was.
    pub const fn explicit_nano(&self) -> Option<u32> {
        self.nano
    }

    pub const fn meridiem(&self) -> Option<Meridiem> {
        self.meridiem
    }

    pub const fn zone(&self) -> Option<&ZoneOrOffset> {
        self.zone.as_ref()
    }

    #[must_use]
    pub fn with_zone(mut self, zone: Option<ZoneOrOffset>) -> Self {
        self.zone = zone;
        self
    }

    pub fn second_of_day(&self) -> i64 {
        i64::from(self.hour()) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second())
    }

    pub fn nano_of_day(&self) -> i64 {
        self.second_of_day() * NANOS_PER_SECOND + i64::from(self.nano())
    }

    pub fn to_naive(&self) -> NaiveTime {
        // Fields were range-checked on construction.
        NaiveTime::from_hms_nano_opt(self.hour(), self.minute, self.second(), self.nano())
            .unwrap_or_default()
    }

    /// The instant of this time on 1970-01-01 in its zone or the implicit frame.
    pub fn instant(&self) -> Result<chrono::DateTime<Utc>, TemporalError> {
        let reference = NaiveDate::default().and_time(self.to_naive());
        Frame::of(self.zone.as_ref()).to_utc(reference)
    }

    #[must_use]
    pub fn plus_hours(&self, hours: i64) -> Self {
        self.plus_nanos_wrapping(i128::from(hours) * i128::from(NANOS_PER_HOUR))
    }

    #[must_use]
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        self.plus_nanos_wrapping(i128::from(minutes) * i128::from(NANOS_PER_MINUTE))
    }

    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        self.plus_nanos_wrapping(i128::from(seconds) * i128::from(NANOS_PER_SECOND))
    }

    #[must_use]
    pub fn plus_nanos(&self, nanos: i64) -> Self {
        self.plus_nanos_wrapping(i128::from(nanos))
    }

    /// Moves the reading around the 24-hour dial.
    pub(crate) fn plus_nanos_wrapping(&self, delta: i128) -> Self {
        let day = i128::from(NANOS_PER_DAY);
        let shifted = (i128::from(self.nano_of_day()) + delta.rem_euclid(day)).rem_euclid(day);
        // `shifted` is in 0..NANOS_PER_DAY.
        let nano_of_day = i64::try_from(shifted).unwrap_or_default();
        self.with_nano_of_day(nano_of_day)
    }

    fn with_nano_of_day(&self, nano_of_day: i64) -> Self {
        let seconds = u32::try_from(nano_of_day / NANOS_PER_SECOND).unwrap_or_default();
        let nanos = u32::try_from(nano_of_day % NANOS_PER_SECOND).unwrap_or_default();
        let naive = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).unwrap_or_default();
        self.restyled(naive)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::clock::FixedClock;

    // ========== Construction Tests ==========

    #[test]
    fn builder_validates_ranges() {
        assert!(Time::of(0, 0).is_ok());
        assert!(Time::of(23, 59).is_ok());
        assert_eq!(
            Time::of(24, 0),
            Err(TemporalError::construction("hour", 24, "must be between 0 and 23"))
        );
        assert!(Time::of(10, 60).is_err());
        assert!(Time::builder(10, 0).second(60).build().is_err());
        assert!(Time::builder(10, 0).nano(1_000_000_000).build().is_err());
        assert!(Time::builder(10, 0).nano(999_999_999).build().is_ok());
    }

    #[test]
    fn meridiem_restricts_hour_to_twelve() {
        assert!(Time::builder(0, 0).meridiem(Meridiem::Am).build().is_err());
        assert!(Time::builder(13, 0).meridiem(Meridiem::Pm).build().is_err());
        assert!(Time::builder(12, 0).meridiem(Meridiem::Am).build().is_ok());
    }

    #[test]
    fn hour24_conversion() {
        assert_eq!(hour24(12, Some(Meridiem::Am)), 0);
        assert_eq!(hour24(1, Some(Meridiem::Am)), 1);
        assert_eq!(hour24(12, Some(Meridiem::Pm)), 12);
        assert_eq!(hour24(9, Some(Meridiem::Pm)), 21);
        assert_eq!(hour24(17, None), 17);
    }

    #[test]
    fn accessors() {
        let time = Time::builder(9, 5)
            .second(7)
            .nano(250_000_000)
            .meridiem(Meridiem::Pm)
            .build()
            .unwrap();
        assert_eq!(time.hour(), 21);
        assert_eq!(time.clock_hour(), 9);
        assert_eq!(time.minute(), 5);
        assert_eq!(time.second(), 7);
        assert_eq!(time.millisecond(), 250);
        assert_eq!(time.second_of_day(), 21 * 3600 + 5 * 60 + 7);
    }

    #[test]
    fn of_second_and_nano_of_day() {
        let time = Time::of_second_of_day(3661).unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (1, 1, 1));
        let time = Time::of_nano_of_day(NANOS_PER_DAY - 1).unwrap();
        assert_eq!(time.nano(), 999_999_999);
        assert!(Time::of_second_of_day(86_400).is_err());
        assert!(Time::of_nano_of_day(-1).is_err());
    }

    // ========== Arithmetic Tests ==========

    #[test]
    fn shifts_wrap_around_midnight() {
        let time = Time::of(23, 30).unwrap();
        let later = time.plus_minutes(90);
        assert_eq!((later.hour(), later.minute()), (1, 0));
        assert_eq!(later.explicit_second(), None);

        let earlier = Time::of(0, 15).unwrap().plus_hours(-1);
        assert_eq!((earlier.hour(), earlier.minute()), (23, 15));

        let big = Time::of(6, 0).unwrap().plus_hours(i64::MAX);
        assert!(big.hour() < 24);
    }

    #[test]
    fn shifts_keep_meridiem_style() {
        let time = Time::builder(11, 30).meridiem(Meridiem::Am).build().unwrap();
        let later = time.plus_hours(2);
        assert_eq!(later.clock_hour(), 1);
        assert_eq!(later.meridiem(), Some(Meridiem::Pm));
        assert_eq!(later.hour(), 13);
    }

    #[test]
    fn shifts_reveal_non_zero_seconds() {
        let later = Time::of(10, 0).unwrap().plus_seconds(5);
        assert_eq!(later.explicit_second(), Some(5));
        assert_eq!(later.explicit_nano(), None);
        let later = Time::of(10, 0).unwrap().plus_nanos(5);
        assert_eq!(later.explicit_second(), Some(0));
        assert_eq!(later.explicit_nano(), Some(5));
    }

    // ========== Fraction Tests ==========

    #[test]
    fn fractions_are_right_padded() {
        assert_eq!(parse_fraction_to_nanos("5").unwrap(), 500_000_000);
        assert_eq!(parse_fraction_to_nanos("000000001").unwrap(), 1);
        assert_eq!(parse_fraction_to_nanos("").unwrap(), 0);
        assert!(parse_fraction_to_nanos("1234567890").is_err());
        assert_eq!(parse_millis_fraction("25").unwrap(), 250);
        assert!(parse_millis_fraction("2500").is_err());
        assert!(parse_millis_fraction("2a").is_err());
    }

    // ========== Clock Tests ==========

    #[test]
    fn now_reads_the_clock_in_the_zone() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 11, 20, 15, 30).unwrap());
        let zone = ZoneOrOffset::parse("+03:00").unwrap();
        let time = Time::now(&clock, Some(zone));
        assert_eq!((time.hour(), time.minute(), time.second()), (23, 15, 30));
        assert_eq!(time.zone().map(ZoneOrOffset::raw), Some("+03:00"));
    }

    #[test]
    fn meridiem_parsing() {
        assert_eq!(Meridiem::parse("مساءً"), Some(Meridiem::Pm));
        assert_eq!(Meridiem::parse("ص"), Some(Meridiem::Am));
        assert_eq!(Meridiem::parse("x"), None);
    }
}

//! Localized text rendering for every temporal value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::arithmetic::Temporal;
use crate::chronology::Calendar;
use crate::combined::CombinedAmount;
use crate::config;
use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::TemporalError;
use crate::names;
use crate::period::Period;
use crate::point::Point;
use crate::time::Time;
use crate::zone::ZoneOrOffset;

/// Digits used when rendering numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralStyle {
    /// ASCII `0`-`9`.
    #[default]
    Latin,
    /// Arabic-Indic `٠`-`٩`.
    ArabicIndic,
}

impl NumeralStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Latin => "latin",
            Self::ArabicIndic => "arabic_indic",
        }
    }

    /// Rewrites the ASCII digits of `text`; everything else is kept.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Latin => text.to_string(),
            Self::ArabicIndic => text
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(digit) => char::from_u32(0x0660 + digit).unwrap_or(c),
                    None => c,
                })
                .collect(),
        }
    }
}

impl fmt::Display for NumeralStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumeralStyle {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latin" => Ok(Self::Latin),
            "arabic_indic" | "arabic-indic" => Ok(Self::ArabicIndic),
            other => Err(TemporalError::construction(
                "numerals",
                other,
                "expected latin or arabic_indic",
            )),
        }
    }
}

/// Renders values as plain localized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formatter {
    numerals: NumeralStyle,
}

impl Formatter {
    pub const fn new(numerals: NumeralStyle) -> Self {
        Self { numerals }
    }

    /// A formatter using the process-wide numeral style.
    pub fn from_settings() -> Self {
        Self::new(config::settings().numerals)
    }

    pub const fn numerals(&self) -> NumeralStyle {
        self.numerals
    }

    pub fn number(&self, value: impl fmt::Display) -> String {
        self.numerals.apply(&value.to_string())
    }

    fn padded(&self, value: u32, width: usize) -> String {
        self.numerals.apply(&format!("{value:0width$}"))
    }

    // ========== Points ==========

    /// `<day> <month> <year>` followed by the calendar.
    pub fn date(&self, date: &Date) -> String {
        let fields = format!(
            "{} {} {}",
            self.number(date.day()),
            date.month_name(),
            self.number(date.year())
        );
        join([fields, self.calendar(date.calendar())])
    }

    /// The calendar name, introduced by the calendar prefix unless the name
    /// already says "calendar".
    pub fn calendar(&self, calendar: &Calendar) -> String {
        let name = calendar.name().trim();
        if name.is_empty() || name.contains(names::CALENDAR_WORD) {
            name.to_string()
        } else {
            format!("{} {name}", names::CALENDAR_PREFIX)
        }
    }

    /// The clock reading followed by the time's zone, if any.
    pub fn time(&self, time: &Time) -> String {
        join([
            self.clock(time),
            time.zone().map(|z| self.zone(z)).unwrap_or_default(),
        ])
    }

    fn clock(&self, time: &Time) -> String {
        let mut text = format!("{}:{}", self.number(time.hour()), self.padded(time.minute(), 2));
        if let Some(second) = time.explicit_second() {
            text.push(':');
            text.push_str(&self.padded(second, 2));
        }
        if let Some(nano) = time.explicit_nano() {
            text.push('.');
            text.push_str(&self.padded(nano, 9));
        }
        if let Some(meridiem) = time.meridiem() {
            text.push(' ');
            text.push_str(meridiem.marker());
        }
        text
    }

    /// Offsets render as written; named zones get the zone prefix.
    pub fn zone(&self, zone: &ZoneOrOffset) -> String {
        let raw = zone.raw().trim();
        if zone.is_offset() || raw.is_empty() || raw.starts_with(names::ZONE_PREFIX) {
            raw.to_string()
        } else {
            format!("{} {raw}", names::ZONE_PREFIX)
        }
    }

    pub fn date_time(&self, dt: &DateTime) -> String {
        join([
            self.date(dt.date()),
            self.clock(dt.time()),
            dt.zone().map(|z| self.zone(z)).unwrap_or_default(),
        ])
    }

    pub fn point(&self, point: &Point) -> String {
        match point {
            Point::Date(date) => self.date(date),
            Point::Time(time) => self.time(time),
            Point::DateTime(dt) => self.date_time(dt),
        }
    }

    // ========== Amounts ==========

    /// Non-zero hours, minutes, seconds (with a millisecond fraction) and
    /// nanoseconds joined by the conjunction.
    pub fn duration(&self, duration: &Duration) -> String {
        let labels = duration.labels();
        let mut terms = Vec::with_capacity(4);
        if duration.hours() != 0 {
            terms.push(self.term(duration.hours(), labels.hours()));
        }
        if duration.minutes() != 0 {
            terms.push(self.term(duration.minutes(), labels.minutes()));
        }
        if duration.seconds() != 0 || duration.millis() != 0 {
            terms.push(format!(
                "{} {}",
                self.seconds(duration.seconds(), duration.millis()),
                labels.seconds()
            ));
        }
        if duration.nanos() != 0 {
            terms.push(self.term(duration.nanos(), labels.nanos()));
        }
        if terms.is_empty() {
            return self.term(0, labels.seconds());
        }
        terms.join(&conjunction())
    }

    fn seconds(&self, seconds: i64, millis: i32) -> String {
        if millis == 0 {
            return self.number(seconds);
        }
        let sign = if seconds < 0 || millis < 0 { "-" } else { "" };
        format!(
            "{sign}{}.{}",
            self.number(seconds.unsigned_abs()),
            self.padded(millis.unsigned_abs(), 3)
        )
    }

    /// Non-zero years, months and days joined by the conjunction.
    pub fn period(&self, period: &Period) -> String {
        let labels = period.labels();
        let terms: Vec<String> = [
            (period.years(), labels.years()),
            (period.months(), labels.months()),
            (period.days(), labels.days()),
        ]
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, label)| self.term(value, label))
        .collect();
        if terms.is_empty() {
            return self.term(0, labels.days());
        }
        terms.join(&conjunction())
    }

    pub fn combined(&self, combined: &CombinedAmount) -> String {
        format!(
            "{}{}{}",
            self.period(combined.period()),
            conjunction(),
            self.duration(combined.duration())
        )
    }

    pub fn amount(&self, amount: &Amount) -> String {
        match amount {
            Amount::Duration(duration) => self.duration(duration),
            Amount::Period(period) => self.period(period),
            Amount::Combined(combined) => self.combined(combined),
        }
    }

    pub fn temporal(&self, value: &Temporal) -> String {
        match value {
            Temporal::Point(point) => self.point(point),
            Temporal::Amount(amount) => self.amount(amount),
        }
    }

    fn term(&self, value: impl fmt::Display, label: &str) -> String {
        format!("{} {label}", self.number(value))
    }
}

fn conjunction() -> String {
    format!(" {} ", names::CONJUNCTION)
}

/// Space-joins the non-empty parts.
fn join<const N: usize>(parts: [String; N]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

macro_rules! display_with {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&Formatter::from_settings().$method(self))
                }
            }
        )*
    };
}

display_with! {
    Date => date,
    Calendar => calendar,
    Time => time,
    ZoneOrOffset => zone,
    DateTime => date_time,
    Point => point,
    Duration => duration,
    Period => period,
    CombinedAmount => combined,
    Amount => amount,
    Temporal => temporal,
}

//! Multi-calendar temporal values.
//!
//! This crate contains:
//! - Points: dates, times of day and date-times in a solar or lunar calendar
//! - Amounts: clock durations, calendar periods and their normalized pair
//! - Arithmetic and comparison across every point and amount kind
//! - Arabic rendering of all of the above

mod amount;
mod arithmetic;
pub mod chronology;
pub mod clock;
mod combined;
pub mod config;
mod date;
mod datetime;
mod duration;
pub mod error;
pub mod format;
mod hijri;
pub mod names;
mod period;
mod point;
pub mod time;
pub mod zone;

pub use amount::Amount;
pub use arithmetic::Temporal;
pub use chronology::{Calendar, Chronology};
pub use clock::{Clock, FixedClock, SystemClock};
pub use combined::CombinedAmount;
pub use config::{Config, Settings};
pub use date::{Date, MonthRef};
pub use datetime::DateTime;
pub use duration::{Duration, DurationLabels};
pub use error::{Operator, TemporalError, TemporalKind};
pub use format::{Formatter, NumeralStyle};
pub use period::{Period, PeriodLabels};
pub use point::{Point, between};
pub use time::{Meridiem, Time, TimeBuilder};
pub use zone::{Frame, Zone, ZoneOrOffset};

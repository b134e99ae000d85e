//! Clock-based spans.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::TimeDelta;

use crate::error::TemporalError;
use crate::names;
use crate::time::NANOS_PER_SECOND;

/// Unit words for rendering a duration; absent entries use the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DurationLabels {
    pub hours: Option<String>,
    pub minutes: Option<String>,
    pub seconds: Option<String>,
    pub nanos: Option<String>,
}

impl DurationLabels {
    pub fn hours(&self) -> &str {
        self.hours.as_deref().unwrap_or(names::HOUR_LABEL)
    }

    pub fn minutes(&self) -> &str {
        self.minutes.as_deref().unwrap_or(names::MINUTE_LABEL)
    }

    pub fn seconds(&self) -> &str {
        self.seconds.as_deref().unwrap_or(names::SECOND_LABEL)
    }

    pub fn nanos(&self) -> &str {
        self.nanos.as_deref().unwrap_or(names::NANOSECOND_LABEL)
    }

    /// Field-wise: our label where we have one, otherwise theirs.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            hours: self.hours.clone().or_else(|| other.hours.clone()),
            minutes: self.minutes.clone().or_else(|| other.minutes.clone()),
            seconds: self.seconds.clone().or_else(|| other.seconds.clone()),
            nanos: self.nanos.clone().or_else(|| other.nanos.clone()),
        }
    }
}

/// A span of clock time.
///
/// Every field is read from one [`TimeDelta`]. Negative spans report each
/// field truncated toward zero with the span's sign. Labels only affect
/// rendering and take no part in equality or ordering.
#[derive(Debug, Clone, Default)]
pub struct Duration {
    span: TimeDelta,
    labels: DurationLabels,
}

fn overflow() -> TemporalError {
    TemporalError::out_of_range("duration arithmetic")
}

impl Duration {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_delta(span: TimeDelta) -> Self {
        Self {
            span,
            labels: DurationLabels::default(),
        }
    }

    pub fn of_days(days: i64) -> Result<Self, TemporalError> {
        TimeDelta::try_days(days).map(Self::from_delta).ok_or_else(overflow)
    }

    pub fn of_hours(hours: i64) -> Result<Self, TemporalError> {
        TimeDelta::try_hours(hours).map(Self::from_delta).ok_or_else(overflow)
    }

    pub fn of_minutes(minutes: i64) -> Result<Self, TemporalError> {
        TimeDelta::try_minutes(minutes).map(Self::from_delta).ok_or_else(overflow)
    }

    pub fn of_seconds(seconds: i64) -> Result<Self, TemporalError> {
        TimeDelta::try_seconds(seconds).map(Self::from_delta).ok_or_else(overflow)
    }

    pub fn of_millis(millis: i64) -> Result<Self, TemporalError> {
        TimeDelta::try_milliseconds(millis)
            .map(Self::from_delta)
            .ok_or_else(overflow)
    }

    pub fn of_nanos(nanos: i64) -> Self {
        Self::from_delta(TimeDelta::nanoseconds(nanos))
    }

    /// Hours, minutes and seconds summed into one span.
    pub fn hms(hours: i64, minutes: i64, seconds: i64) -> Result<Self, TemporalError> {
        Self::of_hours(hours)?
            .plus(&Self::of_minutes(minutes)?)?
            .plus(&Self::of_seconds(seconds)?)
    }

    /// A span of whole nanoseconds.
    pub fn from_total_nanos(total: i128) -> Result<Self, TemporalError> {
        let per_second = i128::from(NANOS_PER_SECOND);
        let seconds = i64::try_from(total.div_euclid(per_second)).map_err(|_| overflow())?;
        let nanos = u32::try_from(total.rem_euclid(per_second)).map_err(|_| overflow())?;
        TimeDelta::new(seconds, nanos)
            .map(Self::from_delta)
            .ok_or_else(overflow)
    }

    #[must_use]
    pub fn with_labels(mut self, labels: DurationLabels) -> Self {
        self.labels = labels;
        self
    }

    pub const fn span(&self) -> TimeDelta {
        self.span
    }

    pub const fn labels(&self) -> &DurationLabels {
        &self.labels
    }

    /// Whole hours; may exceed 23.
    pub fn hours(&self) -> i64 {
        self.span.num_seconds() / 3600
    }

    pub fn minutes(&self) -> i64 {
        (self.span.num_seconds() % 3600) / 60
    }

    pub fn seconds(&self) -> i64 {
        self.span.num_seconds() % 60
    }

    pub fn millis(&self) -> i32 {
        self.span.subsec_nanos() / 1_000_000
    }

    /// Nanoseconds below the millisecond.
    pub fn nanos(&self) -> i32 {
        self.span.subsec_nanos() % 1_000_000
    }

    /// Whole days, truncated toward zero.
    pub fn num_days(&self) -> i64 {
        self.span.num_days()
    }

    pub fn total_nanos(&self) -> i128 {
        i128::from(self.span.num_seconds()) * i128::from(NANOS_PER_SECOND)
            + i128::from(self.span.subsec_nanos())
    }

    pub fn is_zero(&self) -> bool {
        self.span.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.span < TimeDelta::zero()
    }

    pub fn plus(&self, other: &Self) -> Result<Self, TemporalError> {
        let span = self.span.checked_add(&other.span).ok_or_else(overflow)?;
        Ok(Self {
            span,
            labels: self.labels.merge(&other.labels),
        })
    }

    pub fn minus(&self, other: &Self) -> Result<Self, TemporalError> {
        let span = self.span.checked_sub(&other.span).ok_or_else(overflow)?;
        Ok(Self {
            span,
            labels: self.labels.merge(&other.labels),
        })
    }

    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            span: -self.span,
            labels: self.labels.clone(),
        }
    }

    pub fn plus_days(&self, days: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_days(days)?)
    }

    pub fn plus_hours(&self, hours: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_hours(hours)?)
    }

    pub fn plus_minutes(&self, minutes: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_minutes(minutes)?)
    }

    pub fn plus_seconds(&self, seconds: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_seconds(seconds)?)
    }

    pub fn plus_millis(&self, millis: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_millis(millis)?)
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, TemporalError> {
        self.plus(&Self::of_nanos(nanos))
    }
}

impl From<TimeDelta> for Duration {
    fn from(span: TimeDelta) -> Self {
        Self::from_delta(span)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span
    }
}

impl Eq for Duration {}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.span.hash(state);
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.span.cmp(&other.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_derive_from_the_span() {
        let duration = Duration::hms(26, 10, 5)
            .unwrap()
            .plus(&Duration::of_nanos(7_000_123))
            .unwrap();
        assert_eq!(duration.hours(), 26);
        assert_eq!(duration.minutes(), 10);
        assert_eq!(duration.seconds(), 5);
        assert_eq!(duration.millis(), 7);
        assert_eq!(duration.nanos(), 123);
        assert_eq!(duration.num_days(), 1);
    }

    #[test]
    fn negative_fields_truncate_toward_zero() {
        let duration = Duration::hms(-2, -10, -5).unwrap();
        assert_eq!(duration.hours(), -2);
        assert_eq!(duration.minutes(), -10);
        assert_eq!(duration.seconds(), -5);
        assert!(duration.is_negative());
    }

    #[test]
    fn addition_is_span_addition() {
        let sum = Duration::hms(2, 10, 5)
            .unwrap()
            .plus(&Duration::of_hours(3).unwrap())
            .unwrap();
        assert_eq!(sum, Duration::hms(5, 10, 5).unwrap());
        let difference = sum.minus(&Duration::of_minutes(20).unwrap()).unwrap();
        assert_eq!(difference, Duration::hms(4, 50, 5).unwrap());
    }

    #[test]
    fn labels_merge_and_do_not_affect_equality() {
        let hours = Duration::of_hours(2).unwrap().with_labels(DurationLabels {
            hours: Some("ساعات".to_string()),
            ..DurationLabels::default()
        });
        let minutes = Duration::of_minutes(5).unwrap().with_labels(DurationLabels {
            hours: Some("ignored".to_string()),
            minutes: Some("دقائق".to_string()),
            ..DurationLabels::default()
        });
        let sum = hours.plus(&minutes).unwrap();
        assert_eq!(sum.labels().hours(), "ساعات");
        assert_eq!(sum.labels().minutes(), "دقائق");
        assert_eq!(sum.labels().seconds(), names::SECOND_LABEL);
        assert_eq!(sum, Duration::hms(2, 5, 0).unwrap());
    }

    #[test]
    fn ordering_follows_the_span() {
        assert!(Duration::of_minutes(59).unwrap() < Duration::of_hours(1).unwrap());
        assert!(Duration::of_nanos(-1) < Duration::zero());
    }

    #[test]
    fn total_nanos_roundtrip() {
        for total in [0_i128, 1, -1, 86_400_000_000_000, -1_500_000_000] {
            assert_eq!(Duration::from_total_nanos(total).unwrap().total_nanos(), total);
        }
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            Duration::of_days(i64::MAX),
            Err(TemporalError::out_of_range("duration arithmetic"))
        );
        assert!(Duration::from_total_nanos(i128::MAX).is_err());
    }
}

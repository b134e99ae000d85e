//! Period plus duration, kept normalized.

use tracing::trace;

use crate::duration::Duration;
use crate::error::TemporalError;
use crate::period::Period;
use crate::time::NANOS_PER_DAY;

/// A calendar span followed by a clock span under one day.
///
/// Whole days in the clock part are always carried into the period's day
/// field, so `0 <= duration < 24h` holds for every value. A negative clock
/// part borrows a day from the period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CombinedAmount {
    period: Period,
    duration: Duration,
}

impl CombinedAmount {
    /// Builds a normalized amount.
    pub fn new(period: Period, duration: Duration) -> Result<Self, TemporalError> {
        normalize(period, duration)
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn of_years(years: i32) -> Self {
        Self::from(Period::of_years(years))
    }

    pub fn of_months(months: i32) -> Self {
        Self::from(Period::of_months(months))
    }

    pub fn of_weeks(weeks: i32) -> Result<Self, TemporalError> {
        Period::of_weeks(weeks).map(Self::from)
    }

    pub fn of_days(days: i32) -> Self {
        Self::from(Period::of_days(days))
    }

    pub fn of_hours(hours: i64) -> Result<Self, TemporalError> {
        Self::try_from(Duration::of_hours(hours)?)
    }

    pub fn of_minutes(minutes: i64) -> Result<Self, TemporalError> {
        Self::try_from(Duration::of_minutes(minutes)?)
    }

    pub fn of_seconds(seconds: i64) -> Result<Self, TemporalError> {
        Self::try_from(Duration::of_seconds(seconds)?)
    }

    pub fn of_millis(millis: i64) -> Result<Self, TemporalError> {
        Self::try_from(Duration::of_millis(millis)?)
    }

    pub fn of_nanos(nanos: i64) -> Result<Self, TemporalError> {
        Self::try_from(Duration::of_nanos(nanos))
    }

    pub const fn period(&self) -> &Period {
        &self.period
    }

    pub const fn duration(&self) -> &Duration {
        &self.duration
    }

    pub const fn years(&self) -> i32 {
        self.period.years()
    }

    pub const fn months(&self) -> i32 {
        self.period.months()
    }

    pub const fn days(&self) -> i32 {
        self.period.days()
    }

    pub fn hours(&self) -> i64 {
        self.duration.hours()
    }

    pub fn minutes(&self) -> i64 {
        self.duration.minutes()
    }

    pub fn seconds(&self) -> i64 {
        self.duration.seconds()
    }

    pub fn millis(&self) -> i32 {
        self.duration.millis()
    }

    pub fn nanos(&self) -> i32 {
        self.duration.nanos()
    }

    pub fn is_zero(&self) -> bool {
        self.period.is_zero() && self.duration.is_zero()
    }

    /// Re-runs normalization; a normalized value comes back equal.
    pub fn normalized(&self) -> Result<Self, TemporalError> {
        normalize(self.period.clone(), self.duration.clone())
    }

    pub fn plus(&self, other: &Self) -> Result<Self, TemporalError> {
        normalize(
            self.period.plus(&other.period)?,
            self.duration.plus(&other.duration)?,
        )
    }

    pub fn minus(&self, other: &Self) -> Result<Self, TemporalError> {
        self.plus(&other.negated()?)
    }

    pub fn plus_period(&self, period: &Period) -> Result<Self, TemporalError> {
        normalize(self.period.plus(period)?, self.duration.clone())
    }

    pub fn plus_duration(&self, duration: &Duration) -> Result<Self, TemporalError> {
        normalize(self.period.clone(), self.duration.plus(duration)?)
    }

    pub fn negated(&self) -> Result<Self, TemporalError> {
        normalize(self.period.negated()?, self.duration.negated())
    }

    pub fn plus_years(&self, years: i64) -> Result<Self, TemporalError> {
        Ok(self.with_period(self.period.plus_years(years)?))
    }

    pub fn plus_months(&self, months: i64) -> Result<Self, TemporalError> {
        Ok(self.with_period(self.period.plus_months(months)?))
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self, TemporalError> {
        Ok(self.with_period(self.period.plus_weeks(weeks)?))
    }

    pub fn plus_days(&self, days: i64) -> Result<Self, TemporalError> {
        Ok(self.with_period(self.period.plus_days(days)?))
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

    pub fn plus_millis(&self, millis: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_millis(millis)?)
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self, TemporalError> {
        self.plus_duration(&Duration::of_nanos(nanos))
    }

    fn with_period(&self, period: Period) -> Self {
        Self {
            period,
            duration: self.duration.clone(),
        }
    }
}

impl From<Period> for CombinedAmount {
    fn from(period: Period) -> Self {
        Self {
            period,
            duration: Duration::zero(),
        }
    }
}

impl TryFrom<Duration> for CombinedAmount {
    type Error = TemporalError;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        normalize(Period::zero(), duration)
    }
}

/// Carries whole days of `duration` into `period`'s day field.
///
/// Minutes, seconds and sub-second fields pass through unchanged; only the
/// hour count is reduced below 24. Labels on both parts are kept.
fn normalize(period: Period, duration: Duration) -> Result<CombinedAmount, TemporalError> {
    let total = duration.total_nanos();
    let day = i128::from(NANOS_PER_DAY);
    let extra_days = total.div_euclid(day);
    if extra_days == 0 {
        return Ok(CombinedAmount { period, duration });
    }

    let remainder = total.rem_euclid(day);
    let extra_days =
        i64::try_from(extra_days).map_err(|_| TemporalError::out_of_range("normalization"))?;
    trace!(extra_days, "carrying duration overflow into period days");

    let labels = duration.labels().clone();
    Ok(CombinedAmount {
        period: period.plus_days(extra_days)?,
        duration: Duration::from_total_nanos(remainder)?.with_labels(labels),
    })
}

#[cfg(test)]
mod tests {
    use crate::duration::DurationLabels;
    use crate::period::PeriodLabels;

    use super::*;

    fn hours_in_range(amount: &CombinedAmount) -> bool {
        (0..24).contains(&amount.hours()) && !amount.duration().is_negative()
    }

    #[test]
    fn carries_whole_days() {
        let amount = CombinedAmount::new(
            Period::of(0, 1, 2),
            Duration::hms(50, 15, 30).unwrap(),
        )
        .unwrap();
        assert_eq!(amount.period(), &Period::of(0, 1, 4));
        assert_eq!(amount.hours(), 2);
        assert_eq!(amount.minutes(), 15);
        assert_eq!(amount.seconds(), 30);
    }

    #[test]
    fn negative_duration_borrows_a_day() {
        let amount = CombinedAmount::new(Period::of_days(3), Duration::of_hours(-2).unwrap()).unwrap();
        assert_eq!(amount.period(), &Period::of_days(2));
        assert_eq!(amount.hours(), 22);
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = [
            (Period::zero(), Duration::zero()),
            (Period::of(1, 2, 3), Duration::hms(23, 59, 59).unwrap()),
            (Period::of_days(-1), Duration::hms(-49, 0, 1).unwrap()),
            (Period::of(0, 0, 5), Duration::of_nanos(-1)),
            (Period::of_months(7), Duration::of_days(400).unwrap()),
        ];
        for (period, duration) in cases {
            let once = CombinedAmount::new(period, duration).unwrap();
            let twice = once.normalized().unwrap();
            assert_eq!(once, twice);
            assert!(hours_in_range(&once), "{once:?}");
            assert!(hours_in_range(&twice), "{twice:?}");
        }
    }

    #[test]
    fn addition_adds_parts_then_normalizes() {
        let left = CombinedAmount::new(Period::of_days(1), Duration::of_hours(20).unwrap()).unwrap();
        let right = CombinedAmount::new(Period::of_months(1), Duration::of_hours(5).unwrap()).unwrap();
        let sum = left.plus(&right).unwrap();
        assert_eq!(sum.period(), &Period::of(0, 1, 2));
        assert_eq!(sum.hours(), 1);

        let with_period = left.plus_period(&Period::of_years(1)).unwrap();
        assert_eq!(with_period.period(), &Period::of(1, 0, 1));
        assert_eq!(with_period.duration(), left.duration());

        let with_duration = left.plus_duration(&Duration::of_hours(4).unwrap()).unwrap();
        assert_eq!(with_duration.period(), &Period::of_days(2));
        assert_eq!(with_duration.hours(), 0);
    }

    #[test]
    fn factories_normalize() {
        let amount = CombinedAmount::of_hours(30).unwrap();
        assert_eq!(amount.days(), 1);
        assert_eq!(amount.hours(), 6);
        assert_eq!(CombinedAmount::of_weeks(2).unwrap().days(), 14);
        assert!(CombinedAmount::zero().is_zero());
    }

    #[test]
    fn labels_survive_normalization() {
        let duration = Duration::of_hours(25).unwrap().with_labels(DurationLabels {
            hours: Some("ساعات".to_string()),
            ..DurationLabels::default()
        });
        let period = Period::of_days(1).with_labels(PeriodLabels {
            days: Some("أيام".to_string()),
            ..PeriodLabels::default()
        });
        let amount = CombinedAmount::new(period, duration).unwrap();
        assert_eq!(amount.duration().labels().hours(), "ساعات");
        assert_eq!(amount.period().labels().days(), "أيام");
        assert_eq!(amount.days(), 2);
    }
}

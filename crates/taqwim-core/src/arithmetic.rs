//! Addition, subtraction and comparison across points and amounts.

use std::cmp::Ordering;

use tracing::trace;

use crate::amount::Amount;
use crate::combined::CombinedAmount;
use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::{Operator, TemporalError, TemporalKind};
use crate::period::Period;
use crate::point::Point;
use crate::time::Time;

const SUB_DAY_ON_DATE: &str = "cannot apply a span under 24 hours to a date-only value";

/// Any value the expression evaluator can combine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Temporal {
    Point(Point),
    Amount(Amount),
}

// ========== Point Arithmetic ==========

fn sign_period(period: &Period, operator: Operator) -> Result<Period, TemporalError> {
    match operator {
        Operator::Subtract => period.negated(),
        _ => Ok(period.clone()),
    }
}

fn sign_duration(duration: &Duration, operator: Operator) -> Duration {
    match operator {
        Operator::Subtract => duration.negated(),
        _ => duration.clone(),
    }
}

fn shift_date(date: &Date, amount: &Amount, operator: Operator) -> Result<Date, TemporalError> {
    match amount {
        Amount::Period(period) => date.plus_period(&sign_period(period, operator)?),
        Amount::Combined(combined) => date.plus_period(&sign_period(combined.period(), operator)?),
        Amount::Duration(duration) => {
            let days = sign_duration(duration, operator).num_days();
            if days == 0 {
                return Err(TemporalError::InvalidOperation {
                    operator,
                    operand: SUB_DAY_ON_DATE,
                });
            }
            date.plus_days(days)
        }
    }
}

fn shift_time(time: &Time, amount: &Amount, operator: Operator) -> Result<Time, TemporalError> {
    let duration = match amount {
        Amount::Duration(duration) => duration,
        Amount::Combined(combined) if combined.period().is_zero() => combined.duration(),
        Amount::Period(_) | Amount::Combined(_) => {
            return Err(TemporalError::unsupported(
                operator,
                TemporalKind::Time,
                amount.kind(),
            ));
        }
    };
    Ok(time.plus_nanos_wrapping(sign_duration(duration, operator).total_nanos()))
}

fn shift_date_time(
    dt: &DateTime,
    amount: &Amount,
    operator: Operator,
) -> Result<DateTime, TemporalError> {
    trace!(kind = %amount.kind(), %operator, "shifting date-time");
    match amount {
        Amount::Duration(duration) => dt.plus_duration(&sign_duration(duration, operator)),
        Amount::Period(period) => dt.plus_period(&sign_period(period, operator)?),
        Amount::Combined(combined) => dt
            .plus_period(&sign_period(combined.period(), operator)?)?
            .plus_duration(&sign_duration(combined.duration(), operator)),
    }
}

impl Date {
    /// Adds a period, a combined amount (its period part) or a duration of at
    /// least one day (its whole days).
    pub fn plus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_date(self, amount, Operator::Add)
    }

    pub fn minus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_date(self, amount, Operator::Subtract)
    }
}

impl Time {
    /// Adds a duration around the 24-hour dial. Calendar units are rejected.
    pub fn plus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_time(self, amount, Operator::Add)
    }

    pub fn minus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_time(self, amount, Operator::Subtract)
    }
}

impl DateTime {
    /// Adds any amount: the period part moves the wall date, the duration
    /// part moves the instant.
    pub fn plus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_date_time(self, amount, Operator::Add)
    }

    pub fn minus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        shift_date_time(self, amount, Operator::Subtract)
    }
}

impl Point {
    pub fn plus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        self.shift(amount, Operator::Add)
    }

    pub fn minus(&self, amount: &Amount) -> Result<Self, TemporalError> {
        self.shift(amount, Operator::Subtract)
    }

    fn shift(&self, amount: &Amount, operator: Operator) -> Result<Self, TemporalError> {
        Ok(match self {
            Self::Date(date) => Self::Date(shift_date(date, amount, operator)?),
            Self::Time(time) => Self::Time(shift_time(time, amount, operator)?),
            Self::DateTime(dt) => Self::DateTime(shift_date_time(dt, amount, operator)?),
        })
    }

    /// Orders two points by their instants.
    pub fn compare(&self, operator: Operator, other: &Self) -> Result<bool, TemporalError> {
        ensure_comparison(operator)?;
        let ordering = match (self, other) {
            (Self::Date(left), Self::Date(right)) => left.to_epoch_day().cmp(&right.to_epoch_day()),
            _ => self.instant()?.cmp(&other.instant()?),
        };
        Ok(holds(operator, ordering))
    }
}

// ========== Amount Arithmetic ==========

fn combine(left: &Amount, right: &Amount, operator: Operator) -> Result<Amount, TemporalError> {
    let subtract = operator == Operator::Subtract;
    Ok(match (left, right) {
        (Amount::Duration(l), Amount::Duration(r)) => {
            Amount::Duration(if subtract { l.minus(r)? } else { l.plus(r)? })
        }
        (Amount::Duration(_), Amount::Period(_) | Amount::Combined(_)) => {
            return Err(TemporalError::unsupported(
                operator,
                left.kind(),
                right.kind(),
            ));
        }
        (Amount::Period(l), r) => {
            let projection = r.calendar_projection()?;
            Amount::Period(if subtract {
                l.minus(&projection)?
            } else {
                l.plus(&projection)?
            })
        }
        (Amount::Combined(l), Amount::Duration(r)) => {
            Amount::Combined(l.plus_duration(&sign_duration(r, operator))?)
        }
        (Amount::Combined(l), Amount::Period(r)) => {
            Amount::Combined(l.plus_period(&sign_period(r, operator)?)?)
        }
        (Amount::Combined(l), Amount::Combined(r)) => {
            Amount::Combined(if subtract { l.minus(r)? } else { l.plus(r)? })
        }
    })
}

impl Amount {
    /// Duration + duration stays a duration; a period absorbs the calendar
    /// part of anything; a combined amount absorbs both parts and re-normalizes.
    pub fn plus(&self, other: &Self) -> Result<Self, TemporalError> {
        combine(self, other, Operator::Add)
    }

    pub fn minus(&self, other: &Self) -> Result<Self, TemporalError> {
        combine(self, other, Operator::Subtract)
    }

    /// Same-kind comparison. Combined amounts satisfy a relation only when
    /// both their period and duration parts do.
    pub fn compare(&self, operator: Operator, other: &Self) -> Result<bool, TemporalError> {
        ensure_comparison(operator)?;
        match (self, other) {
            (Self::Duration(l), Self::Duration(r)) => Ok(holds(operator, l.cmp(r))),
            (Self::Period(l), Self::Period(r)) => Ok(holds(operator, l.cmp(r))),
            (Self::Combined(l), Self::Combined(r)) => Ok(combined_holds(operator, l, r)),
            _ => mixed(operator, self.kind(), other.kind()),
        }
    }
}

fn combined_holds(operator: Operator, left: &CombinedAmount, right: &CombinedAmount) -> bool {
    let period = holds(operator, left.period().cmp(right.period()));
    let duration = holds(operator, left.duration().cmp(right.duration()));
    match operator {
        Operator::NotEqual => period || duration,
        _ => period && duration,
    }
}

// ========== Comparison Helpers ==========

fn ensure_comparison(operator: Operator) -> Result<(), TemporalError> {
    match operator {
        Operator::Add | Operator::Subtract => Err(TemporalError::InvalidOperation {
            operator,
            operand: "not a comparison operator",
        }),
        _ => Ok(()),
    }
}

const fn holds(operator: Operator, ordering: Ordering) -> bool {
    match operator {
        Operator::Equal => ordering.is_eq(),
        Operator::NotEqual => ordering.is_ne(),
        Operator::Less => ordering.is_lt(),
        Operator::LessEqual => ordering.is_le(),
        Operator::Greater => ordering.is_gt(),
        Operator::GreaterEqual => ordering.is_ge(),
        Operator::Add | Operator::Subtract => false,
    }
}

/// Values of different kinds are never equal and have no order.
fn mixed(
    operator: Operator,
    left: TemporalKind,
    right: TemporalKind,
) -> Result<bool, TemporalError> {
    match operator {
        Operator::Equal => Ok(false),
        Operator::NotEqual => Ok(true),
        _ => Err(TemporalError::unsupported(operator, left, right)),
    }
}

// ========== Evaluator Surface ==========

impl Temporal {
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::Point(point) => point.kind(),
            Self::Amount(amount) => amount.kind(),
        }
    }

    /// `point + amount` or `amount + amount`.
    pub fn plus(&self, other: &Self) -> Result<Self, TemporalError> {
        self.apply(Operator::Add, other)
    }

    /// `point - amount` or `amount - amount`.
    pub fn minus(&self, other: &Self) -> Result<Self, TemporalError> {
        self.apply(Operator::Subtract, other)
    }

    fn apply(&self, operator: Operator, other: &Self) -> Result<Self, TemporalError> {
        match (self, other) {
            (Self::Point(point), Self::Amount(amount)) => {
                point.shift(amount, operator).map(Self::Point)
            }
            (Self::Amount(left), Self::Amount(right)) => {
                combine(left, right, operator).map(Self::Amount)
            }
            _ => Err(TemporalError::unsupported(
                operator,
                self.kind(),
                other.kind(),
            )),
        }
    }

    /// Evaluates one of the six comparison operators.
    pub fn compare(&self, operator: Operator, other: &Self) -> Result<bool, TemporalError> {
        ensure_comparison(operator)?;
        match (self, other) {
            (Self::Point(left), Self::Point(right)) => left.compare(operator, right),
            (Self::Amount(left), Self::Amount(right)) => left.compare(operator, right),
            _ => mixed(operator, self.kind(), other.kind()),
        }
    }

    pub fn equals(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::Equal, other)
    }

    pub fn not_equals(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::NotEqual, other)
    }

    pub fn less_than(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::Less, other)
    }

    pub fn less_equal(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::LessEqual, other)
    }

    pub fn greater_than(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::Greater, other)
    }

    pub fn greater_equal(&self, other: &Self) -> Result<bool, TemporalError> {
        self.compare(Operator::GreaterEqual, other)
    }
}

impl From<Point> for Temporal {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl From<Amount> for Temporal {
    fn from(amount: Amount) -> Self {
        Self::Amount(amount)
    }
}

impl From<Date> for Temporal {
    fn from(date: Date) -> Self {
        Self::Point(Point::Date(date))
    }
}

impl From<Time> for Temporal {
    fn from(time: Time) -> Self {
        Self::Point(Point::Time(time))
    }
}

impl From<DateTime> for Temporal {
    fn from(dt: DateTime) -> Self {
        Self::Point(Point::DateTime(dt))
    }
}

impl From<Duration> for Temporal {
    fn from(duration: Duration) -> Self {
        Self::Amount(Amount::Duration(duration))
    }
}

impl From<Period> for Temporal {
    fn from(period: Period) -> Self {
        Self::Amount(Amount::Period(period))
    }
}

impl From<CombinedAmount> for Temporal {
    fn from(combined: CombinedAmount) -> Self {
        Self::Amount(Amount::Combined(combined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::{Calendar, Chronology};
    use crate::zone::ZoneOrOffset;

    fn solar(day: u32, month: u32, year: i32) -> Date {
        Date::new(day, month, year, Calendar::from(Chronology::Solar)).unwrap()
    }

    fn hours(h: i64) -> Amount {
        Amount::Duration(Duration::of_hours(h).unwrap())
    }

    fn days(d: i32) -> Amount {
        Amount::Period(Period::of_days(d))
    }

    // ========== Date Tests ==========

    #[test]
    fn date_rejects_sub_day_durations() {
        let date = solar(1, 1, 2024);
        assert_eq!(
            date.plus(&hours(23)),
            Err(TemporalError::InvalidOperation {
                operator: Operator::Add,
                operand: SUB_DAY_ON_DATE,
            })
        );
        assert_eq!(
            date.minus(&hours(5)),
            Err(TemporalError::InvalidOperation {
                operator: Operator::Subtract,
                operand: SUB_DAY_ON_DATE,
            })
        );
    }

    #[test]
    fn date_takes_whole_days_of_long_durations() {
        let date = solar(1, 1, 2024);
        assert_eq!(date.plus(&hours(49)).unwrap(), solar(3, 1, 2024));
        assert_eq!(date.minus(&hours(24)).unwrap(), solar(31, 12, 2023));
    }

    #[test]
    fn date_takes_period_part_of_combined() {
        let combined =
            CombinedAmount::new(Period::of_months(1), Duration::of_hours(5).unwrap()).unwrap();
        let date = solar(31, 1, 2024).plus(&Amount::Combined(combined)).unwrap();
        assert_eq!(date, solar(29, 2, 2024));
    }

    // ========== Time Tests ==========

    #[test]
    fn time_accepts_durations_only() {
        let time = Time::of(23, 30).unwrap();
        let later = time.plus(&Amount::Duration(Duration::of_minutes(90).unwrap())).unwrap();
        assert_eq!((later.hour(), later.minute()), (1, 0));
        assert_eq!(
            time.plus(&days(1)),
            Err(TemporalError::unsupported(
                Operator::Add,
                TemporalKind::Time,
                TemporalKind::Period
            ))
        );
        let with_days = CombinedAmount::new(Period::of_days(1), Duration::zero()).unwrap();
        assert!(time.minus(&Amount::Combined(with_days)).is_err());
        let clock_only = CombinedAmount::of_hours(2).unwrap();
        let earlier = time.minus(&Amount::Combined(clock_only)).unwrap();
        assert_eq!(earlier.hour(), 21);
    }

    // ========== Date-Time Tests ==========

    #[test]
    fn date_time_combined_applies_both_parts() {
        let zone = ZoneOrOffset::parse("+00:00").unwrap();
        let time = Time::builder(22, 0).zone(zone).build().unwrap();
        let dt = DateTime::new(solar(31, 1, 2024), time).unwrap();
        let combined =
            CombinedAmount::new(Period::of_months(1), Duration::of_hours(3).unwrap()).unwrap();
        let shifted = dt.plus(&Amount::Combined(combined.clone())).unwrap();
        assert_eq!(shifted.date(), &solar(1, 3, 2024));
        assert_eq!(shifted.time().hour(), 1);
        let back = shifted.minus(&Amount::Combined(combined)).unwrap();
        assert_eq!(back.date(), &solar(31, 1, 2024));
        assert_eq!(back.time().hour(), 22);
    }

    // ========== Amount Tests ==========

    #[test]
    fn duration_only_adds_durations() {
        let sum = hours(2).plus(&hours(3)).unwrap();
        assert_eq!(sum, hours(5));
        assert_eq!(
            hours(2).plus(&days(1)),
            Err(TemporalError::unsupported(
                Operator::Add,
                TemporalKind::Duration,
                TemporalKind::Period
            ))
        );
    }

    #[test]
    fn period_absorbs_calendar_projection() {
        assert_eq!(days(1).plus(&hours(50)).unwrap(), days(3));
        assert_eq!(days(1).minus(&days(3)).unwrap(), days(-2));
        let combined = Amount::Combined(
            CombinedAmount::new(Period::of_months(2), Duration::of_hours(1).unwrap()).unwrap(),
        );
        assert_eq!(
            days(1).plus(&combined).unwrap(),
            Amount::Period(Period::of(0, 2, 1))
        );
    }

    #[test]
    fn period_minus_combined_drops_the_clock_part() {
        let combined = Amount::Combined(CombinedAmount::of_hours(1).unwrap());
        assert_eq!(days(1).minus(&combined).unwrap(), days(1));
        assert_eq!(days(1).minus(&hours(50)).unwrap(), days(-1));
    }

    #[test]
    fn combined_absorbs_everything() {
        let combined = Amount::Combined(CombinedAmount::of_hours(20).unwrap());
        let sum = combined.plus(&hours(5)).unwrap();
        let Amount::Combined(sum) = sum else {
            panic!("expected combined amount");
        };
        assert_eq!(sum.days(), 1);
        assert_eq!(sum.hours(), 1);

        let with_period = combined.plus(&days(2)).unwrap();
        let Amount::Combined(with_period) = with_period else {
            panic!("expected combined amount");
        };
        assert_eq!((with_period.days(), with_period.hours()), (2, 20));
    }

    #[test]
    fn same_kind_comparisons() {
        assert!(hours(2).compare(Operator::Less, &hours(3)).unwrap());
        assert!(days(2).compare(Operator::GreaterEqual, &days(2)).unwrap());
        assert!(
            Amount::Period(Period::of(1, 0, 0))
                .compare(Operator::Greater, &Amount::Period(Period::of(0, 11, 30)))
                .unwrap()
        );
    }

    #[test]
    fn combined_comparison_is_conjunctive() {
        let small = Amount::Combined(
            CombinedAmount::new(Period::of_days(1), Duration::of_hours(1).unwrap()).unwrap(),
        );
        let mixed_order = Amount::Combined(
            CombinedAmount::new(Period::of_days(2), Duration::zero()).unwrap(),
        );
        let large = Amount::Combined(
            CombinedAmount::new(Period::of_days(2), Duration::of_hours(2).unwrap()).unwrap(),
        );
        assert!(small.compare(Operator::Less, &large).unwrap());
        assert!(!small.compare(Operator::Less, &mixed_order).unwrap());
        assert!(!small.compare(Operator::Greater, &mixed_order).unwrap());
        assert!(small.compare(Operator::NotEqual, &mixed_order).unwrap());
        assert!(!small.compare(Operator::Equal, &mixed_order).unwrap());
    }

    #[test]
    fn mixed_kinds_degrade_for_equality_only() {
        assert!(!hours(24).compare(Operator::Equal, &days(1)).unwrap());
        assert!(hours(24).compare(Operator::NotEqual, &days(1)).unwrap());
        assert_eq!(
            hours(24).compare(Operator::Less, &days(1)),
            Err(TemporalError::unsupported(
                Operator::Less,
                TemporalKind::Duration,
                TemporalKind::Period
            ))
        );
    }

    // ========== Evaluator Tests ==========

    #[test]
    fn evaluator_dispatch() {
        let date = Temporal::from(solar(1, 1, 2024));
        let period = Temporal::from(Period::of_days(10));
        let shifted = date.plus(&period).unwrap();
        assert_eq!(shifted, Temporal::from(solar(11, 1, 2024)));
        assert!(shifted.greater_than(&date).unwrap());
        assert!(date.less_equal(&date).unwrap());

        assert_eq!(
            period.plus(&date),
            Err(TemporalError::unsupported(
                Operator::Add,
                TemporalKind::Period,
                TemporalKind::Date
            ))
        );
        assert_eq!(
            date.minus(&shifted),
            Err(TemporalError::unsupported(
                Operator::Subtract,
                TemporalKind::Date,
                TemporalKind::Date
            ))
        );
    }

    #[test]
    fn evaluator_point_against_amount() {
        let date = Temporal::from(solar(1, 1, 2024));
        let duration = Temporal::from(Duration::of_hours(1).unwrap());
        assert!(!date.equals(&duration).unwrap());
        assert!(date.not_equals(&duration).unwrap());
        assert!(date.less_than(&duration).is_err());
        assert!(matches!(
            date.compare(Operator::Add, &date),
            Err(TemporalError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn points_compare_by_instant() {
        let plus3 = ZoneOrOffset::parse("+03:00").unwrap();
        let utc = ZoneOrOffset::parse("Z").unwrap();
        let riyadh_noon = DateTime::new(
            solar(1, 1, 2024),
            Time::builder(12, 0).zone(plus3).build().unwrap(),
        )
        .unwrap();
        let utc_nine = DateTime::new(
            solar(1, 1, 2024),
            Time::builder(9, 0).zone(utc).build().unwrap(),
        )
        .unwrap();
        let left = Temporal::from(riyadh_noon);
        let right = Temporal::from(utc_nine);
        assert!(left.equals(&right).unwrap());
        assert!(left.greater_equal(&right).unwrap());
        assert!(!left.greater_than(&right).unwrap());
    }
}

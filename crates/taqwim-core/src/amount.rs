//! The closed set of amount kinds.

use crate::combined::CombinedAmount;
use crate::duration::Duration;
use crate::error::{TemporalError, TemporalKind};
use crate::period::Period;

/// A clock span, a calendar span, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Amount {
    Duration(Duration),
    Period(Period),
    Combined(CombinedAmount),
}

impl Amount {
    pub const fn kind(&self) -> TemporalKind {
        match self {
            Self::Duration(_) => TemporalKind::Duration,
            Self::Period(_) => TemporalKind::Period,
            Self::Combined(_) => TemporalKind::Combined,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Duration(d) => d.is_zero(),
            Self::Period(p) => p.is_zero(),
            Self::Combined(c) => c.is_zero(),
        }
    }

    /// The same kind of amount pointing the other way.
    pub fn negated(&self) -> Result<Self, TemporalError> {
        Ok(match self {
            Self::Duration(d) => Self::Duration(d.negated()),
            Self::Period(p) => Self::Period(p.negated()?),
            Self::Combined(c) => Self::Combined(c.negated()?),
        })
    }

    /// The calendar part of this amount: whole days of a duration
    /// (truncated toward zero), or the period of a combined amount.
    pub fn calendar_projection(&self) -> Result<Period, TemporalError> {
        match self {
            Self::Duration(d) => {
                let days = i32::try_from(d.num_days())
                    .map_err(|_| TemporalError::out_of_range("calendar projection"))?;
                Ok(Period::of_days(days))
            }
            Self::Period(p) => Ok(p.clone()),
            Self::Combined(c) => Ok(c.period().clone()),
        }
    }
}

impl From<Duration> for Amount {
    fn from(duration: Duration) -> Self {
        Self::Duration(duration)
    }
}

impl From<Period> for Amount {
    fn from(period: Period) -> Self {
        Self::Period(period)
    }
}

impl From<CombinedAmount> for Amount {
    fn from(combined: CombinedAmount) -> Self {
        Self::Combined(combined)
    }
}

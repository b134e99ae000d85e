//! Error conditions raised by construction, resolution and arithmetic.

use std::fmt;

use thiserror::Error;

use crate::chronology::Chronology;

/// Operators the expression evaluator can apply to temporal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Whether this is one of the four ordering operators.
    #[must_use]
    pub const fn is_relational(&self) -> bool {
        matches!(
            self,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a temporal value, used to describe operands in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    Duration,
    Period,
    Combined,
}

impl TemporalKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "date_time",
            Self::Duration => "duration",
            Self::Period => "period",
            Self::Combined => "period_with_duration",
        }
    }
}

impl fmt::Display for TemporalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every failure the engine can report.
///
/// Construction either fully succeeds or yields one of these; no operation
/// leaves a partially built value behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemporalError {
    /// A field was out of range or empty.
    #[error("invalid {field}: {value} ({reason})")]
    Construction {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// No month of the chronology carries this name.
    #[error("unknown month name '{name}' in the {chronology} calendar")]
    UnknownMonthName { name: String, chronology: Chronology },

    /// Month numbers run from 1 to 12.
    #[error("invalid month number: {0}")]
    InvalidMonthNumber(i64),

    /// Offset text did not parse, or the zone name is not mapped.
    #[error("invalid zone or offset: '{0}'")]
    InvalidZoneSpec(String),

    /// The operator is known for these kinds but not for this operand.
    #[error("invalid operation '{operator}': {operand}")]
    InvalidOperation {
        operator: Operator,
        operand: &'static str,
    },

    /// The operator is not defined between these kinds.
    #[error("unsupported operation: {left} {operator} {right}")]
    UnsupportedOperation {
        operator: Operator,
        left: TemporalKind,
        right: TemporalKind,
    },

    /// The result falls outside the representable range.
    #[error("{operation} is out of the supported range")]
    OutOfRange { operation: &'static str },
}

impl TemporalError {
    pub(crate) fn construction(
        field: &'static str,
        value: impl fmt::Display,
        reason: &'static str,
    ) -> Self {
        Self::Construction {
            field,
            value: value.to_string(),
            reason,
        }
    }

    pub(crate) const fn unsupported(
        operator: Operator,
        left: TemporalKind,
        right: TemporalKind,
    ) -> Self {
        Self::UnsupportedOperation {
            operator,
            left,
            right,
        }
    }

    pub(crate) const fn out_of_range(operation: &'static str) -> Self {
        Self::OutOfRange { operation }
    }
}

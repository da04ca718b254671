//! Comparison operators and sort direction.

use crate::error::SqlError;
use std::fmt;
use std::str::FromStr;

/// Comparison operator used by predicates, `CASE WHEN` and `HAVING`.
///
/// The set is closed; conversions from raw values outside it fail with
/// [`SqlError::UnsupportedOperator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Operator {
    Equal = 0,
    NotEqual = 1,
    GreaterThan = 2,
    GreaterThanEqualTo = 3,
    LessThan = 4,
    LessThanEqualTo = 5,
    Like = 6,
}

impl Operator {
    /// Every supported operator, in discriminant order.
    pub const ALL: [Operator; 7] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThan,
        Operator::GreaterThanEqualTo,
        Operator::LessThan,
        Operator::LessThanEqualTo,
        Operator::Like,
    ];

    /// The symbol spliced between a column and its operand.
    ///
    /// `Like` carries its own surrounding spaces.
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanEqualTo => "<=",
            Operator::Like => " LIKE ",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol().trim())
    }
}

impl TryFrom<u8> for Operator {
    type Error = SqlError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Operator::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| SqlError::UnsupportedOperator(format!("discriminant {value}")))
    }
}

impl FromStr for Operator {
    type Err = SqlError;

    /// Accepts a symbol (`=`, `<>`, `LIKE`, ...) or a variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s.trim() {
            "=" | "Equal" => Operator::Equal,
            "!=" | "<>" | "NotEqual" => Operator::NotEqual,
            ">" | "GreaterThan" => Operator::GreaterThan,
            ">=" | "GreaterThanEqualTo" => Operator::GreaterThanEqualTo,
            "<" | "LessThan" => Operator::LessThan,
            "<=" | "LessThanEqualTo" => Operator::LessThanEqualTo,
            t if t.eq_ignore_ascii_case("like") => Operator::Like,
            other => return Err(SqlError::UnsupportedOperator(other.to_string())),
        };
        Ok(op)
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn keyword(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

//! Small immutable records consumed by the statement builders.

use crate::config::IdentifierQuoting;
use crate::error::{SqlError, SqlResult};
use crate::schema::{ColumnRef, Table};
use crate::value::{Literal, ValueKind};

/// A column projected under an alias: `Column AS 'Alias'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aliased<C> {
    column: C,
    alias: String,
}

impl<C: Table> Aliased<C> {
    /// Fails with [`SqlError::InvalidArgument`] when `alias` is empty.
    pub fn new(column: C, alias: impl Into<String>) -> SqlResult<Self> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(SqlError::invalid_argument(format!(
                "alias for column '{}' must not be empty",
                column.column_name()
            )));
        }
        Ok(Self { column, alias })
    }

    pub fn column(&self) -> C {
        self.column
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// A `SET` entry: `Column=Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<T> {
    column: T,
    value: Literal,
}

impl<T: Table> Assignment<T> {
    pub fn new(column: T, value: impl Into<Literal>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    /// Build from a raw value and an explicit classification.
    pub fn classified(column: T, raw: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(column, Literal::new(raw, kind))
    }

    pub fn column(&self) -> T {
        self.column
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }
}

/// Join mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
        }
    }
}

/// One join predicate: the right column's table is joined on `left = right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOn<L, R> {
    pub kind: JoinKind,
    pub left: L,
    pub right: R,
}

impl<L: Table, R: Table> JoinOn<L, R> {
    pub fn new(kind: JoinKind, left: L, right: R) -> Self {
        Self { kind, left, right }
    }

    pub fn inner(left: L, right: R) -> Self {
        Self::new(JoinKind::Inner, left, right)
    }

    pub fn left(left: L, right: R) -> Self {
        Self::new(JoinKind::Left, left, right)
    }

    pub fn right(left: L, right: R) -> Self {
        Self::new(JoinKind::Right, left, right)
    }
}

/// Aggregate function over a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Count(ColumnRef),
    CountAll,
    Min(ColumnRef),
    Max(ColumnRef),
    Sum(ColumnRef),
    Avg(ColumnRef),
}

impl Aggregate {
    pub fn count<T: Table>(column: T) -> Self {
        Aggregate::Count(column.column_ref())
    }

    pub fn count_all() -> Self {
        Aggregate::CountAll
    }

    pub fn min<T: Table>(column: T) -> Self {
        Aggregate::Min(column.column_ref())
    }

    pub fn max<T: Table>(column: T) -> Self {
        Aggregate::Max(column.column_ref())
    }

    pub fn sum<T: Table>(column: T) -> Self {
        Aggregate::Sum(column.column_ref())
    }

    pub fn avg<T: Table>(column: T) -> Self {
        Aggregate::Avg(column.column_ref())
    }

    pub const fn function(&self) -> &'static str {
        match self {
            Aggregate::Count(_) | Aggregate::CountAll => "COUNT",
            Aggregate::Min(_) => "MIN",
            Aggregate::Max(_) => "MAX",
            Aggregate::Sum(_) => "SUM",
            Aggregate::Avg(_) => "AVG",
        }
    }

    pub fn column(&self) -> Option<ColumnRef> {
        match self {
            Aggregate::CountAll => None,
            Aggregate::Count(c)
            | Aggregate::Min(c)
            | Aggregate::Max(c)
            | Aggregate::Sum(c)
            | Aggregate::Avg(c) => Some(*c),
        }
    }

    pub(crate) fn write_sql(&self, out: &mut String, qualified: bool, quoting: IdentifierQuoting) {
        out.push_str(self.function());
        out.push('(');
        match self.column() {
            Some(col) => col.write_sql(out, qualified, quoting),
            None => out.push('*'),
        }
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableSchema;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Orders {
        Id,
        Amount,
    }

    impl Table for Orders {
        const SCHEMA: TableSchema = TableSchema::new("Orders", &["Id", "Amount"]);

        fn column_index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn alias_rejects_empty() {
        let err = Aliased::new(Orders::Id, "  ").unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(Aliased::new(Orders::Id, "Key").unwrap().alias(), "Key");
    }

    #[test]
    fn assignment_classified() {
        let a = Assignment::classified(Orders::Amount, "9.99", ValueKind::Numeric);
        assert_eq!(a.column(), Orders::Amount);
        assert_eq!(a.value().to_sql(), "9.99");
    }

    #[test]
    fn aggregate_rendering() {
        let mut out = String::new();
        Aggregate::sum(Orders::Amount).write_sql(&mut out, true, IdentifierQuoting::Plain);
        assert_eq!(out, "SUM(Orders.Amount)");

        let mut out = String::new();
        Aggregate::count_all().write_sql(&mut out, true, IdentifierQuoting::Plain);
        assert_eq!(out, "COUNT(*)");
    }

    #[test]
    fn join_kinds() {
        assert_eq!(JoinKind::default().keyword(), "INNER JOIN");
        assert_eq!(JoinOn::left(Orders::Id, Orders::Amount).kind, JoinKind::Left);
    }
}

use super::seeded;
use crate::accumulator::Accumulator;
use crate::config::SqlConfig;
use crate::error::{SqlError, SqlResult};
use crate::schema::Table;
use crate::statement::{Statement, StatementKind};
use crate::value::Literal;
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Columns,
    Values,
}

/// INSERT statement builder.
///
/// ```ignore
/// let sql = insert_into::<Orders>()
///     .column(Orders::Id)
///     .column(Orders::Amount)
///     .values(1)
///     .values(9.99)
///     .to_sql();
/// assert_eq!(sql, "INSERT INTO Orders (Id, Amount) VALUES (1, 9.99);");
/// ```
///
/// Several rows are separated with [`next_row`](Self::next_row). Each row
/// must carry as many values as there are columns.
#[derive(Clone)]
#[must_use]
pub struct InsertInto<T: Table> {
    acc: Accumulator,
    phase: Phase,
    columns: usize,
    /// values in the row currently open
    row_values: usize,
    rows: usize,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> InsertInto<T> {
    pub fn new() -> Self {
        Self::with_config(SqlConfig::default())
    }

    pub fn with_config(config: SqlConfig) -> Self {
        Self {
            acc: seeded("INSERT INTO ", T::SCHEMA.name, config),
            phase: Phase::Start,
            columns: 0,
            row_values: 0,
            rows: 0,
            _table: PhantomData,
        }
    }

    /// Append a column to the target list, opening it on first call.
    pub fn column(mut self, column: T) -> Self {
        match self.phase {
            Phase::Start => {
                self.acc.push_str(" (");
                self.phase = Phase::Columns;
            }
            Phase::Columns => self.acc.push_str(", "),
            Phase::Values => {
                self.acc.fail(SqlError::clause_order(
                    "column",
                    "columns must precede VALUES",
                ));
                return self;
            }
        }
        self.acc.push_column(column.column_ref(), false);
        self.columns += 1;
        self
    }

    /// Append several columns; an empty sequence is an invalid argument.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let columns: Vec<T> = columns.into_iter().collect();
        if columns.is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("columns requires at least one column"));
            return self;
        }
        for column in columns {
            self = self.column(column);
        }
        self
    }

    /// Append one value to the current row, closing the column list first.
    pub fn values(mut self, value: impl Into<Literal>) -> Self {
        match self.phase {
            Phase::Start => {
                self.acc.fail(SqlError::clause_order(
                    "VALUES",
                    "no column list to insert into",
                ));
                return self;
            }
            Phase::Columns => {
                self.acc.push_str(") VALUES (");
                self.phase = Phase::Values;
                self.rows = 1;
            }
            Phase::Values if self.row_values > 0 => self.acc.push_str(", "),
            Phase::Values => {}
        }
        self.acc.push_literal(&value.into());
        self.row_values += 1;
        self
    }

    /// Append several values to the current row; an empty sequence is an
    /// invalid argument.
    pub fn values_all<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let values: Vec<Literal> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("values_all requires at least one value"));
            return self;
        }
        for value in values {
            self = self.values(value);
        }
        self
    }

    /// Close the current row and open another: `), (`.
    pub fn next_row(mut self) -> Self {
        if self.phase != Phase::Values {
            self.acc
                .fail(SqlError::clause_order("next_row", "no VALUES row to close"));
            return self;
        }
        if self.row_values != self.columns {
            self.acc.fail(SqlError::ValueCountMismatch {
                columns: self.columns,
                values: self.row_values,
            });
            return self;
        }
        self.acc.push_str("), (");
        self.row_values = 0;
        self.rows += 1;
        self
    }

    /// Rows started so far.
    pub fn row_count(&self) -> usize {
        self.rows
    }
}

impl<T: Table> Default for InsertInto<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Statement for InsertInto<T> {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    fn pending(&self) -> &'static str {
        match self.phase {
            Phase::Start => "",
            Phase::Columns | Phase::Values => ")",
        }
    }

    fn validate(&self) -> SqlResult<()> {
        self.acc.check()?;
        if self.phase != Phase::Values {
            return Err(SqlError::clause_order("VALUES", "INSERT has no VALUES"));
        }
        if self.row_values != self.columns {
            return Err(SqlError::ValueCountMismatch {
                columns: self.columns,
                values: self.row_values,
            });
        }
        Ok(())
    }
}

impl<T: Table> fmt::Display for InsertInto<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<T: Table> fmt::Debug for InsertInto<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertInto")
            .field("table", &T::SCHEMA.name)
            .field("sql", &self.acc.as_str())
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("error", &self.acc.error())
            .finish()
    }
}

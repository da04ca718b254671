use super::seeded;
use crate::accumulator::Accumulator;
use crate::compose::{Compose, WhereClause, sealed};
use crate::config::SqlConfig;
use crate::error::{SqlError, SqlResult};
use crate::schema::Table;
use crate::statement::{Statement, StatementKind};
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Where,
    Limit,
}

/// DELETE statement builder.
///
/// A DELETE without WHERE renders normally but fails validation with
/// [`SqlError::MissingWhere`] unless [`allow_delete_all`](Self::allow_delete_all)
/// was called.
#[derive(Clone)]
#[must_use]
pub struct Delete<T: Table> {
    acc: Accumulator,
    phase: Phase,
    has_where: bool,
    allow_delete_all: bool,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> Delete<T> {
    pub fn new() -> Self {
        Self::with_config(SqlConfig::default())
    }

    pub fn with_config(config: SqlConfig) -> Self {
        Self {
            acc: seeded("DELETE FROM ", T::SCHEMA.name, config),
            phase: Phase::Start,
            has_where: false,
            allow_delete_all: false,
            _table: PhantomData,
        }
    }

    /// Permit deleting every row (no WHERE clause).
    pub fn allow_delete_all(mut self) -> Self {
        self.allow_delete_all = true;
        self
    }

    /// Hand the statement to a predicate composer; `end_where()` returns it.
    pub fn start_where(self) -> WhereClause<Self> {
        WhereClause::new(self)
    }

    /// ` LIMIT n`
    pub fn limit(mut self, n: u64) -> Self {
        if self.phase == Phase::Limit {
            self.acc
                .fail(SqlError::clause_order("LIMIT", "LIMIT already present"));
            return self;
        }
        self.acc.push_str(&format!(" LIMIT {n}"));
        self.phase = Phase::Limit;
        self
    }
}

impl<T: Table> Default for Delete<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Statement for Delete<T> {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    fn validate(&self) -> SqlResult<()> {
        self.acc.check()?;
        if !self.has_where && !self.allow_delete_all {
            return Err(SqlError::MissingWhere(format!(
                "DELETE FROM {} has no WHERE clause; call allow_delete_all() to delete every row",
                T::SCHEMA.name
            )));
        }
        Ok(())
    }
}

impl<T: Table> sealed::Sealed for Delete<T> {}

impl<T: Table> Compose for Delete<T> {
    type Tables = (T,);

    fn accumulator_mut(&mut self) -> &mut Accumulator {
        &mut self.acc
    }

    fn where_emitted(&self) -> bool {
        self.phase == Phase::Where
    }

    fn open_where(&mut self) -> SqlResult<()> {
        match self.phase {
            Phase::Start => {
                self.phase = Phase::Where;
                self.has_where = true;
                Ok(())
            }
            Phase::Where => Err(SqlError::clause_order(
                "WHERE",
                "statement already has a WHERE clause",
            )),
            Phase::Limit => Err(SqlError::clause_order("WHERE", "WHERE must precede LIMIT")),
        }
    }
}

impl<T: Table> fmt::Display for Delete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<T: Table> fmt::Debug for Delete<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delete")
            .field("table", &T::SCHEMA.name)
            .field("sql", &self.acc.as_str())
            .field("allow_delete_all", &self.allow_delete_all)
            .field("error", &self.acc.error())
            .finish()
    }
}

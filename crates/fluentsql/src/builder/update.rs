use super::seeded;
use crate::accumulator::Accumulator;
use crate::compose::{CaseClause, Compose, WhereClause, sealed};
use crate::config::SqlConfig;
use crate::error::{SqlError, SqlResult};
use crate::meta::Assignment;
use crate::schema::Table;
use crate::statement::{Statement, StatementKind};
use crate::value::Literal;
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Start,
    Set,
    Where,
    Limit,
}

/// UPDATE statement builder.
///
/// At least one assignment is required before a WHERE clause can be opened
/// and before the statement validates.
#[derive(Clone)]
#[must_use]
pub struct Update<T: Table> {
    acc: Accumulator,
    phase: Phase,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> Update<T> {
    pub fn new() -> Self {
        Self::with_config(SqlConfig::default())
    }

    pub fn with_config(config: SqlConfig) -> Self {
        Self {
            acc: seeded("UPDATE ", T::SCHEMA.name, config),
            phase: Phase::Start,
            _table: PhantomData,
        }
    }

    /// `Column=Value`, opening ` SET ` on first call.
    pub fn set(mut self, assignment: Assignment<T>) -> Self {
        if self.assignment_target(assignment.column()) {
            self.acc.push_literal(assignment.value());
        }
        self
    }

    /// Append several assignments; an empty sequence is an invalid argument.
    pub fn set_all<I>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = Assignment<T>>,
    {
        let assignments: Vec<Assignment<T>> = assignments.into_iter().collect();
        if assignments.is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("set_all requires at least one assignment"));
            return self;
        }
        for assignment in assignments {
            self = self.set(assignment);
        }
        self
    }

    pub fn set_value(self, column: T, value: impl Into<Literal>) -> Self {
        self.set(Assignment::new(column, value))
    }

    /// `Column=CASE ... END`
    pub fn set_case(mut self, column: T) -> CaseClause<Self> {
        if self.assignment_target(column) {
            CaseClause::new(self)
        } else {
            CaseClause::refused(self)
        }
    }

    /// Hand the statement to a predicate composer; `end_where()` returns it.
    pub fn start_where(self) -> WhereClause<Self> {
        WhereClause::new(self)
    }

    /// ` LIMIT n`
    pub fn limit(mut self, n: u64) -> Self {
        match self.phase {
            Phase::Set | Phase::Where => {
                self.acc.push_str(&format!(" LIMIT {n}"));
                self.phase = Phase::Limit;
            }
            Phase::Start => self
                .acc
                .fail(SqlError::clause_order("LIMIT", "UPDATE requires SET first")),
            Phase::Limit => self
                .acc
                .fail(SqlError::clause_order("LIMIT", "LIMIT already present")),
        }
        self
    }

    /// Emit the separator and `Column=`.
    fn assignment_target(&mut self, column: T) -> bool {
        match self.phase {
            Phase::Start => {
                self.acc.push_str(" SET ");
                self.phase = Phase::Set;
            }
            Phase::Set => self.acc.push_str(", "),
            _ => {
                self.acc
                    .fail(SqlError::clause_order("SET", "assignments must precede WHERE"));
                return false;
            }
        }
        self.acc.push_column(column.column_ref(), false);
        self.acc.push('=');
        true
    }
}

impl<T: Table> Default for Update<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Statement for Update<T> {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    fn validate(&self) -> SqlResult<()> {
        self.acc.check()?;
        if self.phase == Phase::Start {
            return Err(SqlError::clause_order("SET", "UPDATE requires SET"));
        }
        Ok(())
    }
}

impl<T: Table> sealed::Sealed for Update<T> {}

impl<T: Table> Compose for Update<T> {
    type Tables = (T,);

    fn accumulator_mut(&mut self) -> &mut Accumulator {
        &mut self.acc
    }

    fn where_emitted(&self) -> bool {
        self.phase == Phase::Where
    }

    fn open_where(&mut self) -> SqlResult<()> {
        match self.phase {
            Phase::Set => {
                self.phase = Phase::Where;
                Ok(())
            }
            Phase::Start => Err(SqlError::clause_order("WHERE", "UPDATE requires SET first")),
            Phase::Where => Err(SqlError::clause_order(
                "WHERE",
                "statement already has a WHERE clause",
            )),
            Phase::Limit => Err(SqlError::clause_order("WHERE", "WHERE must precede LIMIT")),
        }
    }
}

impl<T: Table> fmt::Display for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<T: Table> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Update")
            .field("table", &T::SCHEMA.name)
            .field("sql", &self.acc.as_str())
            .field("phase", &self.phase)
            .field("error", &self.acc.error())
            .finish()
    }
}

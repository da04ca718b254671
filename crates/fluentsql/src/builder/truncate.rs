use super::seeded;
use crate::accumulator::Accumulator;
use crate::config::SqlConfig;
use crate::schema::Table;
use crate::statement::{Statement, StatementKind};
use std::fmt;
use std::marker::PhantomData;

/// `TRUNCATE TABLE <table>`; takes no further clauses.
#[derive(Clone)]
#[must_use]
pub struct Truncate<T: Table> {
    acc: Accumulator,
    _table: PhantomData<fn() -> T>,
}

impl<T: Table> Truncate<T> {
    pub fn new() -> Self {
        Self::with_config(SqlConfig::default())
    }

    pub fn with_config(config: SqlConfig) -> Self {
        Self {
            acc: seeded("TRUNCATE TABLE ", T::SCHEMA.name, config),
            _table: PhantomData,
        }
    }
}

impl<T: Table> Default for Truncate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> Statement for Truncate<T> {
    fn kind(&self) -> StatementKind {
        StatementKind::Truncate
    }

    fn accumulator(&self) -> &Accumulator {
        &self.acc
    }
}

impl<T: Table> fmt::Display for Truncate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<T: Table> fmt::Debug for Truncate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Truncate")
            .field("table", &T::SCHEMA.name)
            .finish()
    }
}

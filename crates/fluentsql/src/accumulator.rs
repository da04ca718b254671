//! Append-only text buffer owned by one statement builder.

use crate::config::SqlConfig;
use crate::error::{SqlError, SqlResult};
use crate::logging;
use crate::meta::Aggregate;
use crate::builder::Select;
use crate::schema::{ColumnRef, TableSet, write_ident};
use crate::statement::{Statement, TERMINATOR};
use crate::value::Literal;

/// Command text under construction plus the first error detected while
/// composing it.
#[derive(Debug, Clone)]
pub struct Accumulator {
    sql: String,
    config: SqlConfig,
    error: Option<SqlError>,
}

impl Accumulator {
    pub(crate) fn new(keyword: &str, config: SqlConfig) -> Self {
        let mut sql = String::with_capacity(128);
        sql.push_str(keyword);
        Self {
            sql,
            config,
            error: None,
        }
    }

    /// Text accumulated so far, without terminator.
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn config(&self) -> SqlConfig {
        self.config
    }

    /// The first error recorded, if any.
    pub fn error(&self) -> Option<&SqlError> {
        self.error.as_ref()
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push(&mut self, c: char) {
        self.sql.push(c);
    }

    pub(crate) fn push_table(&mut self, name: &str) {
        write_ident(&mut self.sql, name, self.config.identifier_quoting);
    }

    pub(crate) fn push_column(&mut self, column: ColumnRef, qualified: bool) {
        column.write_sql(&mut self.sql, qualified, self.config.identifier_quoting);
    }

    pub(crate) fn push_aggregate(&mut self, aggregate: &Aggregate, qualified: bool) {
        aggregate.write_sql(&mut self.sql, qualified, self.config.identifier_quoting);
    }

    pub(crate) fn push_literal(&mut self, literal: &Literal) {
        let rendered = literal.render(self.config.literal_quoting);
        self.sql.push_str(&rendered);
    }

    /// ` AS '<alias>'`
    pub(crate) fn push_alias(&mut self, alias: &str) {
        self.sql.push_str(" AS ");
        self.push_literal(&Literal::text(alias));
    }

    /// `(<select>)`, with the embedded SELECT's terminator stripped.
    ///
    /// An invalid subquery is not embedded; its error is recorded here.
    pub(crate) fn push_subquery<O: TableSet>(&mut self, sub: &Select<O>) -> bool {
        if let Err(err) = sub.validate() {
            self.fail(err);
            return false;
        }
        self.sql.push('(');
        self.sql.push_str(&sub.subquery_sql());
        self.sql.push(')');
        true
    }

    /// Record `err` unless an earlier error is already recorded.
    pub(crate) fn fail(&mut self, err: SqlError) {
        logging::error_recorded(&err, &self.config);
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    pub(crate) fn check(&self) -> SqlResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Accumulated text, then `pending` closers, then the terminator.
    pub(crate) fn finish(&self, pending: &str) -> String {
        let mut out = String::with_capacity(self.sql.len() + pending.len() + 1);
        out.push_str(&self.sql);
        out.push_str(pending);
        out.push(TERMINATOR);
        out
    }
}

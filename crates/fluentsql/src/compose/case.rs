//! `CASE ... END` expression composer.

use super::Compose;
use crate::accumulator::Accumulator;
use crate::error::SqlError;
use crate::operator::Operator;
use crate::schema::{ColumnOf, ColumnRef};
use crate::value::Literal;

/// `CASE WHEN <cond> THEN <result> ... [ELSE <result>] END`
///
/// Conditions render qualified columns. Results are quoted only when they
/// classify as non-numeric.
#[must_use = "call `end_case()` to get the statement back"]
pub struct CaseClause<P: Compose> {
    parent: P,
    /// false when the statement refused the CASE; every call is then a no-op
    live: bool,
    whens: usize,
    has_else: bool,
}

impl<P: Compose> CaseClause<P> {
    /// Appends `CASE` to the parent's text.
    pub(crate) fn new(mut parent: P) -> Self {
        parent.accumulator_mut().push_str("CASE");
        Self {
            parent,
            live: true,
            whens: 0,
            has_else: false,
        }
    }

    /// A composer that appends nothing; the parent already recorded why.
    pub(crate) fn refused(parent: P) -> Self {
        Self {
            parent,
            live: false,
            whens: 0,
            has_else: false,
        }
    }

    /// ` WHEN Table.Column<op><value> THEN <result>`
    pub fn when<C, M>(
        mut self,
        column: C,
        op: Operator,
        value: impl Into<Literal>,
        result: impl Into<Literal>,
    ) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        if self.open_when() {
            let value = value.into();
            let acc = self.acc();
            acc.push_column(column.resolve(), true);
            acc.push_str(op.symbol());
            acc.push_literal(&value);
            self.then(result.into());
        }
        self
    }

    /// ` WHEN Table.Column IS NULL THEN <result>`
    pub fn when_null<C, M>(self, column: C, result: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.when_null_check(column.resolve(), " IS NULL", result.into())
    }

    /// ` WHEN Table.Column IS NOT NULL THEN <result>`
    pub fn when_not_null<C, M>(self, column: C, result: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.when_null_check(column.resolve(), " IS NOT NULL", result.into())
    }

    /// ` ELSE <result>`
    pub fn otherwise(mut self, result: impl Into<Literal>) -> Self {
        if !self.live {
            return self;
        }
        if self.has_else {
            self.fail(SqlError::clause_order("ELSE", "CASE already has an ELSE branch"));
            return self;
        }
        if self.whens == 0 {
            self.fail(SqlError::clause_order("ELSE", "CASE needs a WHEN branch first"));
            return self;
        }
        let result = result.into();
        let acc = self.acc();
        acc.push_str(" ELSE ");
        acc.push_literal(&result);
        self.has_else = true;
        self
    }

    /// ` END`, returning the statement.
    pub fn end_case(mut self) -> P {
        self.close();
        self.parent
    }

    /// ` END AS '<alias>'`, returning the statement.
    pub fn end_case_as(mut self, alias: &str) -> P {
        if !self.live {
            return self.parent;
        }
        if alias.trim().is_empty() {
            self.fail(SqlError::invalid_argument("CASE alias must not be empty"));
            return self.parent;
        }
        if self.close() {
            self.acc().push_alias(alias);
        }
        self.parent
    }

    fn acc(&mut self) -> &mut Accumulator {
        self.parent.accumulator_mut()
    }

    fn fail(&mut self, err: SqlError) {
        self.acc().fail(err);
    }

    fn open_when(&mut self) -> bool {
        if !self.live {
            return false;
        }
        if self.has_else {
            self.fail(SqlError::clause_order("WHEN", "WHEN after ELSE"));
            return false;
        }
        self.acc().push_str(" WHEN ");
        self.whens += 1;
        true
    }

    fn then(&mut self, result: Literal) {
        let acc = self.acc();
        acc.push_str(" THEN ");
        acc.push_literal(&result);
    }

    fn when_null_check(mut self, column: ColumnRef, test: &str, result: Literal) -> Self {
        if self.open_when() {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(test);
            self.then(result);
        }
        self
    }

    fn close(&mut self) -> bool {
        if !self.live {
            return false;
        }
        if self.whens == 0 {
            self.fail(SqlError::clause_order("END", "CASE has no WHEN branch"));
            return false;
        }
        self.acc().push_str(" END");
        true
    }
}

//! WHERE clause composer.
//!
//! Every operand comes in up to four spellings: `where_*` opens the clause,
//! `and_*` / `or_*` extend it, and the bare form fills the position right
//! after a group opens:
//!
//! ```ignore
//! select::<Users>()
//!     .select_all()
//!     .from()
//!     .start_where()
//!     .where_(Users::Active, Operator::Equal, true)
//!     .and_group()
//!     .condition(Users::Age, Operator::LessThan, 18)
//!     .or_null(Users::Age)
//!     .end_group()
//!     .end_where();
//! // SELECT * FROM Users WHERE Users.Active=TRUE AND (Users.Age<18 OR Users.Age IS NULL);
//! ```
//!
//! Columns in predicates always render qualified (`Table.Column`).

use super::Compose;
use crate::accumulator::Accumulator;
use crate::error::SqlError;
use crate::operator::Operator;
use crate::builder::Select;
use crate::schema::{ColumnOf, ColumnRef, TableSet};
use crate::statement::Statement;
use crate::value::Literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Where,
    And,
    Or,
    Operand,
}

impl Link {
    fn clause(self) -> &'static str {
        match self {
            Link::Where => "WHERE",
            Link::And => "AND",
            Link::Or => "OR",
            Link::Operand => "predicate operand",
        }
    }
}

/// Predicate composer bound to a statement.
///
/// Owns the statement until [`end_where`](Self::end_where) returns it.
#[must_use = "call `end_where()` to get the statement back"]
pub struct WhereClause<P: Compose> {
    parent: P,
    /// `WHERE` already present in the statement text
    opened: bool,
    /// open parentheses
    depth: usize,
    /// a group just opened and needs its first operand
    expect_operand: bool,
}

impl<P: Compose> WhereClause<P> {
    pub(crate) fn new(parent: P) -> Self {
        let opened = parent.where_emitted();
        Self {
            parent,
            opened,
            depth: 0,
            expect_operand: false,
        }
    }

    /// Open parentheses not yet closed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Close the predicate section and return the statement.
    ///
    /// Groups still open are recorded as [`SqlError::UnbalancedGroup`].
    pub fn end_where(mut self) -> P {
        if self.depth > 0 {
            let depth = self.depth;
            self.fail(SqlError::UnbalancedGroup(depth));
        }
        self.parent
    }

    // ==================== Comparisons ====================

    /// ` WHERE Table.Column<op><value>`
    pub fn where_<C, M>(self, column: C, op: Operator, value: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.comparison(Link::Where, column.resolve(), op, value.into())
    }

    pub fn and<C, M>(self, column: C, op: Operator, value: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.comparison(Link::And, column.resolve(), op, value.into())
    }

    pub fn or<C, M>(self, column: C, op: Operator, value: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.comparison(Link::Or, column.resolve(), op, value.into())
    }

    /// Comparison as the first operand of a group.
    pub fn condition<C, M>(self, column: C, op: Operator, value: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.comparison(Link::Operand, column.resolve(), op, value.into())
    }

    // ==================== Raw conditions ====================

    /// Add a raw condition.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn where_raw(self, condition: &str) -> Self {
        self.raw_condition(Link::Where, condition)
    }

    pub fn and_raw(self, condition: &str) -> Self {
        self.raw_condition(Link::And, condition)
    }

    pub fn or_raw(self, condition: &str) -> Self {
        self.raw_condition(Link::Or, condition)
    }

    pub fn raw(self, condition: &str) -> Self {
        self.raw_condition(Link::Operand, condition)
    }

    // ==================== Grouping ====================

    /// ` WHERE (`
    pub fn where_group(self) -> Self {
        self.open_group(Link::Where)
    }

    /// ` AND (`
    pub fn and_group(self) -> Self {
        self.open_group(Link::And)
    }

    /// ` OR (`
    pub fn or_group(self) -> Self {
        self.open_group(Link::Or)
    }

    /// `(` nested directly inside an open group.
    pub fn start_group(self) -> Self {
        self.open_group(Link::Operand)
    }

    /// `)`
    pub fn end_group(mut self) -> Self {
        if self.depth == 0 {
            self.fail(SqlError::clause_order("end_group", "no open group"));
        } else if self.expect_operand {
            self.fail(SqlError::incomplete_predicate("group closed without an operand"));
        } else {
            self.acc().push(')');
            self.depth -= 1;
        }
        self
    }

    // ==================== BETWEEN ====================

    /// ` WHERE Table.Column BETWEEN low AND high`
    pub fn where_between<C, M>(
        self,
        column: C,
        low: impl Into<Literal>,
        high: impl Into<Literal>,
    ) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.between_range(Link::Where, column.resolve(), low.into(), high.into())
    }

    pub fn and_between<C, M>(
        self,
        column: C,
        low: impl Into<Literal>,
        high: impl Into<Literal>,
    ) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.between_range(Link::And, column.resolve(), low.into(), high.into())
    }

    pub fn or_between<C, M>(
        self,
        column: C,
        low: impl Into<Literal>,
        high: impl Into<Literal>,
    ) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.between_range(Link::Or, column.resolve(), low.into(), high.into())
    }

    pub fn between<C, M>(self, column: C, low: impl Into<Literal>, high: impl Into<Literal>) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.between_range(Link::Operand, column.resolve(), low.into(), high.into())
    }

    // ==================== NULL checks ====================

    pub fn where_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Where, column.resolve(), true)
    }

    pub fn where_not_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Where, column.resolve(), false)
    }

    pub fn and_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::And, column.resolve(), true)
    }

    pub fn and_not_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::And, column.resolve(), false)
    }

    pub fn or_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Or, column.resolve(), true)
    }

    pub fn or_not_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Or, column.resolve(), false)
    }

    pub fn is_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Operand, column.resolve(), true)
    }

    pub fn is_not_null<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<P::Tables, M>,
    {
        self.null_check(Link::Operand, column.resolve(), false)
    }

    // ==================== IN lists ====================

    /// ` WHERE Table.Column IN (v1, v2, ...)`
    ///
    /// An empty list is recorded as [`SqlError::InvalidArgument`].
    pub fn where_in<C, M, I>(self, column: C, values: I) -> Self
    where
        C: ColumnOf<P::Tables, M>,
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.in_list(Link::Where, column.resolve(), values)
    }

    pub fn and_in<C, M, I>(self, column: C, values: I) -> Self
    where
        C: ColumnOf<P::Tables, M>,
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.in_list(Link::And, column.resolve(), values)
    }

    pub fn or_in<C, M, I>(self, column: C, values: I) -> Self
    where
        C: ColumnOf<P::Tables, M>,
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.in_list(Link::Or, column.resolve(), values)
    }

    // ==================== Subqueries ====================

    /// ` WHERE EXISTS (<select>)`
    ///
    /// Only a SELECT embeds; an invalid one records its error and appends
    /// nothing. Other statements do not type-check:
    ///
    /// ```compile_fail
    /// use fluentsql::prelude::*;
    ///
    /// #[derive(Debug, Clone, Copy, Table)]
    /// enum Users {
    ///     Id,
    /// }
    ///
    /// let purge = delete_from::<Users>().allow_delete_all();
    /// let _ = select::<Users>()
    ///     .select_all()
    ///     .from()
    ///     .start_where()
    ///     .where_exists(&purge)
    ///     .end_where();
    /// ```
    pub fn where_exists<O: TableSet>(self, subquery: &Select<O>) -> Self {
        self.exists_subquery(Link::Where, subquery)
    }

    pub fn and_exists<O: TableSet>(self, subquery: &Select<O>) -> Self {
        self.exists_subquery(Link::And, subquery)
    }

    pub fn or_exists<O: TableSet>(self, subquery: &Select<O>) -> Self {
        self.exists_subquery(Link::Or, subquery)
    }

    pub fn exists<O: TableSet>(self, subquery: &Select<O>) -> Self {
        self.exists_subquery(Link::Operand, subquery)
    }

    /// ` WHERE Table.Column<op>ANY (<select>)`
    pub fn where_any<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Where, column.resolve(), op, "ANY", subquery)
    }

    pub fn and_any<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::And, column.resolve(), op, "ANY", subquery)
    }

    pub fn or_any<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Or, column.resolve(), op, "ANY", subquery)
    }

    pub fn any<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Operand, column.resolve(), op, "ANY", subquery)
    }

    /// ` WHERE Table.Column<op>ALL (<select>)`
    pub fn where_all<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Where, column.resolve(), op, "ALL", subquery)
    }

    pub fn and_all<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::And, column.resolve(), op, "ALL", subquery)
    }

    pub fn or_all<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Or, column.resolve(), op, "ALL", subquery)
    }

    pub fn all<C, M, O>(self, column: C, op: Operator, subquery: &Select<O>) -> Self
    where
        O: TableSet,
        C: ColumnOf<P::Tables, M>,
    {
        self.quantified(Link::Operand, column.resolve(), op, "ALL", subquery)
    }

    // ==================== Internals ====================

    fn acc(&mut self) -> &mut Accumulator {
        self.parent.accumulator_mut()
    }

    fn fail(&mut self, err: SqlError) {
        self.acc().fail(err);
    }

    /// Emit the connective for `link`. Returns false, emitting nothing, when
    /// the connective is not legal at this point.
    fn link(&mut self, link: Link) -> bool {
        match link {
            Link::Where => {
                if self.opened {
                    self.fail(SqlError::clause_order(
                        link.clause(),
                        "statement already has a WHERE clause; extend it with and/or",
                    ));
                    return false;
                }
                if let Err(err) = self.parent.open_where() {
                    self.fail(err);
                    return false;
                }
                self.acc().push_str(" WHERE ");
                self.opened = true;
            }
            Link::And | Link::Or => {
                if !self.opened {
                    self.fail(SqlError::clause_order(link.clause(), "no WHERE clause to extend"));
                    return false;
                }
                if self.expect_operand {
                    self.fail(SqlError::incomplete_predicate(format!(
                        "{} directly after an opening parenthesis",
                        link.clause()
                    )));
                    return false;
                }
                self.acc()
                    .push_str(if link == Link::And { " AND " } else { " OR " });
            }
            Link::Operand => {
                if !self.expect_operand {
                    self.fail(SqlError::clause_order(
                        link.clause(),
                        "bare operands only follow an opening parenthesis",
                    ));
                    return false;
                }
            }
        }
        self.expect_operand = false;
        true
    }

    fn comparison(mut self, link: Link, column: ColumnRef, op: Operator, value: Literal) -> Self {
        if self.link(link) {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(op.symbol());
            acc.push_literal(&value);
        }
        self
    }

    fn raw_condition(mut self, link: Link, condition: &str) -> Self {
        if condition.trim().is_empty() {
            self.fail(SqlError::invalid_argument("raw condition must not be empty"));
            return self;
        }
        if self.link(link) {
            self.acc().push_str(condition);
        }
        self
    }

    fn open_group(mut self, link: Link) -> Self {
        if self.link(link) {
            self.acc().push('(');
            self.depth += 1;
            self.expect_operand = true;
        }
        self
    }

    fn between_range(mut self, link: Link, column: ColumnRef, low: Literal, high: Literal) -> Self {
        if self.link(link) {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(" BETWEEN ");
            acc.push_literal(&low);
            acc.push_str(" AND ");
            acc.push_literal(&high);
        }
        self
    }

    fn null_check(mut self, link: Link, column: ColumnRef, is_null: bool) -> Self {
        if self.link(link) {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(if is_null { " IS NULL" } else { " IS NOT NULL" });
        }
        self
    }

    fn in_list(mut self, link: Link, column: ColumnRef, values: Vec<Literal>) -> Self {
        if values.is_empty() {
            self.fail(SqlError::invalid_argument(format!(
                "IN list for '{}' requires at least one value",
                column.qualified()
            )));
            return self;
        }
        if self.link(link) {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(" IN (");
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    acc.push_str(", ");
                }
                acc.push_literal(value);
            }
            acc.push(')');
        }
        self
    }

    fn exists_subquery<O: TableSet>(mut self, link: Link, subquery: &Select<O>) -> Self {
        if let Err(err) = subquery.validate() {
            self.fail(err);
            return self;
        }
        if self.link(link) {
            let acc = self.acc();
            acc.push_str("EXISTS ");
            acc.push_subquery(subquery);
        }
        self
    }

    fn quantified<O: TableSet>(
        mut self,
        link: Link,
        column: ColumnRef,
        op: Operator,
        quantifier: &'static str,
        subquery: &Select<O>,
    ) -> Self {
        if let Err(err) = subquery.validate() {
            self.fail(err);
            return self;
        }
        if self.link(link) {
            let acc = self.acc();
            acc.push_column(column, true);
            acc.push_str(op.symbol());
            acc.push_str(quantifier);
            acc.push(' ');
            acc.push_subquery(subquery);
        }
        self
    }
}

use crate::accumulator::Accumulator;
use crate::compose::{CaseClause, Compose, WhereClause, sealed};
use crate::config::SqlConfig;
use crate::error::{SqlError, SqlResult};
use crate::meta::{Aggregate, Aliased, JoinKind, JoinOn};
use crate::operator::{Direction, Operator};
use crate::schema::{ColumnOf, Table, TableSet};
use crate::statement::{Statement, StatementKind};
use crate::value::Literal;
use std::fmt;
use std::marker::PhantomData;

/// Clause categories of a SELECT, in the order they must appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Start,
    Projection,
    From,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Union,
}

/// SELECT statement builder over the table set `S`.
///
/// `S` is `(T,)` for a single table (see [`select`](crate::select)) or a
/// tuple of up to three tables whose first entry is the FROM table. With more
/// than one table every column renders as `Table.Column`.
///
/// ```ignore
/// let sql = Select::<(Users, Orders)>::new()
///     .column(Users::Name)
///     .sum(Orders::Amount)
///     .from()
///     .join(JoinKind::Inner, Users::Id, Orders::UserId)
///     .group_by(Users::Name)
///     .to_sql();
/// assert_eq!(
///     sql,
///     "SELECT Users.Name, SUM(Orders.Amount) FROM Users \
///      INNER JOIN Orders ON Users.Id=Orders.UserId GROUP BY Users.Name;"
/// );
/// ```
#[derive(Clone)]
#[must_use]
pub struct Select<S: TableSet> {
    acc: Accumulator,
    phase: Phase,
    distinct: bool,
    /// `having_raw` was the last HAVING call, so a comparison may follow
    having_open: bool,
    _tables: PhantomData<fn() -> S>,
}

impl<S: TableSet> Select<S> {
    pub fn new() -> Self {
        Self::with_config(SqlConfig::default())
    }

    pub fn with_config(config: SqlConfig) -> Self {
        Self {
            acc: Accumulator::new("SELECT", config),
            phase: Phase::Start,
            distinct: false,
            having_open: false,
            _tables: PhantomData,
        }
    }

    /// ` DISTINCT`, only before the first projection item.
    pub fn distinct(mut self) -> Self {
        if self.phase != Phase::Start || self.distinct {
            self.reject("DISTINCT", "must directly follow SELECT");
        } else {
            self.acc.push_str(" DISTINCT");
            self.distinct = true;
        }
        self
    }

    // ==================== Projection ====================

    /// `*`
    pub fn select_all(mut self) -> Self {
        if self.projection_item("*") {
            self.acc.push('*');
        }
        self
    }

    pub fn column<C, M>(mut self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        if self.projection_item("column") {
            self.acc.push_column(column.resolve(), S::QUALIFIED);
        }
        self
    }

    /// Project several columns; an empty sequence is an invalid argument.
    pub fn columns<C, M, I>(mut self, columns: I) -> Self
    where
        C: ColumnOf<S, M>,
        I: IntoIterator<Item = C>,
    {
        let columns: Vec<C> = columns.into_iter().collect();
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

    /// `Column AS 'Alias'`
    pub fn select_as<C, M>(mut self, aliased: Aliased<C>) -> Self
    where
        C: Table + ColumnOf<S, M>,
    {
        if self.projection_item("select_as") {
            self.acc
                .push_column(aliased.column().resolve(), S::QUALIFIED);
            self.acc.push_alias(aliased.alias());
        }
        self
    }

    pub fn select_as_all<C, M, I>(mut self, aliases: I) -> Self
    where
        C: Table + ColumnOf<S, M>,
        I: IntoIterator<Item = Aliased<C>>,
    {
        let aliases: Vec<Aliased<C>> = aliases.into_iter().collect();
        if aliases.is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("select_as_all requires at least one alias"));
            return self;
        }
        for aliased in aliases {
            self = self.select_as(aliased);
        }
        self
    }

    /// `COUNT(Column)`
    pub fn count<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        self.aggregate(Aggregate::Count(column.resolve()))
    }

    /// `COUNT(*)`
    pub fn count_all(self) -> Self {
        self.aggregate(Aggregate::CountAll)
    }

    pub fn min<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        self.aggregate(Aggregate::Min(column.resolve()))
    }

    pub fn max<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        self.aggregate(Aggregate::Max(column.resolve()))
    }

    pub fn sum<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        self.aggregate(Aggregate::Sum(column.resolve()))
    }

    pub fn avg<C, M>(self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        self.aggregate(Aggregate::Avg(column.resolve()))
    }

    /// Project an aggregate built elsewhere. Its column must belong to `S`.
    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        if self.check_aggregate(&aggregate) && self.projection_item(aggregate.function()) {
            self.acc.push_aggregate(&aggregate, S::QUALIFIED);
        }
        self
    }

    /// `SUM(Column) AS 'Alias'`
    pub fn aggregate_as(mut self, aggregate: Aggregate, alias: &str) -> Self {
        if alias.trim().is_empty() {
            self.acc.fail(SqlError::invalid_argument(format!(
                "alias for {} must not be empty",
                aggregate.function()
            )));
            return self;
        }
        if self.check_aggregate(&aggregate) && self.projection_item(aggregate.function()) {
            self.acc.push_aggregate(&aggregate, S::QUALIFIED);
            self.acc.push_alias(alias);
        }
        self
    }

    /// Open a `CASE` expression as the next projection item.
    pub fn start_case(mut self) -> CaseClause<Self> {
        if self.projection_item("CASE") {
            CaseClause::new(self)
        } else {
            CaseClause::refused(self)
        }
    }

    // ==================== Source ====================

    /// ` FROM <primary table>`
    pub fn from(mut self) -> Self {
        match self.phase {
            Phase::Projection => {
                self.acc.push_str(" FROM ");
                self.acc.push_table(S::primary());
                self.phase = Phase::From;
            }
            Phase::Start => self.reject("FROM", "projection is empty"),
            _ => self.reject("FROM", "FROM already present"),
        }
        self
    }

    /// ` <KIND> JOIN <right table> ON Left.Col=Right.Col`
    ///
    /// The right column's table is the one joined; it must not be the FROM
    /// table.
    pub fn join<L, ML, R, MR>(mut self, kind: JoinKind, left: L, right: R) -> Self
    where
        L: ColumnOf<S, ML>,
        R: ColumnOf<S, MR>,
    {
        if !matches!(self.phase, Phase::From | Phase::Join) {
            self.reject(kind.keyword(), "joins must directly follow FROM");
            return self;
        }
        let (left, right) = (left.resolve(), right.resolve());
        if right.table() == S::primary() {
            self.acc.fail(SqlError::invalid_argument(format!(
                "join target '{}' is the FROM table",
                right.table()
            )));
            return self;
        }
        self.acc.push(' ');
        self.acc.push_str(kind.keyword());
        self.acc.push(' ');
        self.acc.push_table(right.table());
        self.acc.push_str(" ON ");
        self.acc.push_column(left, true);
        self.acc.push('=');
        self.acc.push_column(right, true);
        self.phase = Phase::Join;
        self
    }

    pub fn join_on<L, ML, R, MR>(self, join: JoinOn<L, R>) -> Self
    where
        L: Table + ColumnOf<S, ML>,
        R: Table + ColumnOf<S, MR>,
    {
        self.join(join.kind, join.left, join.right)
    }

    // ==================== Predicate ====================

    /// Hand the statement to a predicate composer; `end_where()` returns it.
    pub fn start_where(self) -> WhereClause<Self> {
        WhereClause::new(self)
    }

    // ==================== Grouping ====================

    pub fn group_by<C, M>(mut self, column: C) -> Self
    where
        C: ColumnOf<S, M>,
    {
        match self.phase {
            Phase::From | Phase::Join | Phase::Where => {
                self.acc.push_str(" GROUP BY ");
                self.phase = Phase::GroupBy;
            }
            Phase::GroupBy => self.acc.push_str(", "),
            _ => {
                self.reject("GROUP BY", "must follow FROM, joins or WHERE");
                return self;
            }
        }
        self.acc.push_column(column.resolve(), S::QUALIFIED);
        self
    }

    pub fn group_by_all<C, M, I>(mut self, columns: I) -> Self
    where
        C: ColumnOf<S, M>,
        I: IntoIterator<Item = C>,
    {
        let columns: Vec<C> = columns.into_iter().collect();
        if columns.is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("group_by_all requires at least one column"));
            return self;
        }
        for column in columns {
            self = self.group_by(column);
        }
        self
    }

    /// ` HAVING <condition>`, or ` AND <condition>` when HAVING is already open.
    ///
    /// # Safety
    ///
    /// This directly concatenates SQL. The caller must ensure safety.
    pub fn having_raw(mut self, condition: &str) -> Self {
        if condition.trim().is_empty() {
            self.acc
                .fail(SqlError::invalid_argument("HAVING condition must not be empty"));
            return self;
        }
        if self.open_having() {
            self.acc.push_str(condition);
            self.having_open = true;
        }
        self
    }

    /// `<op><value>` completing the expression given to [`having_raw`](Self::having_raw).
    pub fn having_condition(mut self, op: Operator, value: impl Into<Literal>) -> Self {
        if !self.having_open {
            self.reject("HAVING", "having_condition must directly follow having_raw");
            return self;
        }
        self.acc.push_str(op.symbol());
        self.acc.push_literal(&value.into());
        self.having_open = false;
        self
    }

    /// ` HAVING SUM(Column)<op><value>`
    ///
    /// The aggregate's column is qualified exactly as in the projection.
    pub fn having(mut self, aggregate: Aggregate, op: Operator, value: impl Into<Literal>) -> Self {
        if self.check_aggregate(&aggregate) && self.open_having() {
            self.acc.push_aggregate(&aggregate, S::QUALIFIED);
            self.acc.push_str(op.symbol());
            self.acc.push_literal(&value.into());
        }
        self
    }

    // ==================== Ordering / paging ====================

    /// ` ORDER BY Column ASC|DESC`, comma-separated on repeat.
    pub fn order_by<C, M>(mut self, column: C, direction: Direction) -> Self
    where
        C: ColumnOf<S, M>,
    {
        match self.phase {
            Phase::From | Phase::Join | Phase::Where | Phase::GroupBy | Phase::Having => {
                self.acc.push_str(" ORDER BY ");
                self.phase = Phase::OrderBy;
            }
            Phase::OrderBy => self.acc.push_str(", "),
            _ => {
                self.reject("ORDER BY", "must follow FROM and precede LIMIT");
                return self;
            }
        }
        self.having_open = false;
        self.acc.push_column(column.resolve(), S::QUALIFIED);
        self.acc.push(' ');
        self.acc.push_str(direction.keyword());
        self
    }

    /// ` LIMIT n`
    pub fn limit(mut self, n: u64) -> Self {
        if self.enter_limit() {
            self.acc.push_str(&format!(" LIMIT {n}"));
        }
        self
    }

    /// ` LIMIT n OFFSET m`
    pub fn limit_offset(mut self, n: u64, offset: u64) -> Self {
        if self.enter_limit() {
            self.acc.push_str(&format!(" LIMIT {n} OFFSET {offset}"));
        }
        self
    }

    // ==================== Set operations ====================

    /// ` UNION <other>` with the other statement's terminator stripped.
    pub fn union<O: TableSet>(self, other: &Select<O>) -> Self {
        self.set_operation(" UNION ", other)
    }

    /// ` UNION ALL <other>`
    pub fn union_all<O: TableSet>(self, other: &Select<O>) -> Self {
        self.set_operation(" UNION ALL ", other)
    }

    // ==================== Internals ====================

    fn reject(&mut self, clause: &'static str, reason: &str) {
        self.acc.fail(SqlError::clause_order(clause, reason));
    }

    /// Place the separator before a projection item.
    fn projection_item(&mut self, clause: &'static str) -> bool {
        match self.phase {
            Phase::Start => {
                self.acc.push(' ');
                self.phase = Phase::Projection;
                true
            }
            Phase::Projection => {
                self.acc.push_str(", ");
                true
            }
            _ => {
                self.reject(clause, "projection items must precede FROM");
                false
            }
        }
    }

    fn check_aggregate(&mut self, aggregate: &Aggregate) -> bool {
        match aggregate.column() {
            Some(column) if !S::contains(column.table()) => {
                self.acc.fail(SqlError::invalid_argument(format!(
                    "{}({}) references a table outside this statement",
                    aggregate.function(),
                    column.qualified()
                )));
                false
            }
            _ => true,
        }
    }

    fn open_having(&mut self) -> bool {
        match self.phase {
            Phase::From | Phase::Join | Phase::Where | Phase::GroupBy => {
                self.acc.push_str(" HAVING ");
                self.phase = Phase::Having;
            }
            Phase::Having => self.acc.push_str(" AND "),
            _ => {
                self.reject("HAVING", "must follow FROM and precede ORDER BY");
                return false;
            }
        }
        self.having_open = false;
        true
    }

    fn enter_limit(&mut self) -> bool {
        if self.phase < Phase::From || self.phase >= Phase::Limit {
            self.reject("LIMIT", "must follow FROM and appear once");
            return false;
        }
        self.phase = Phase::Limit;
        self.having_open = false;
        true
    }

    fn set_operation<O: TableSet>(mut self, keyword: &str, other: &Select<O>) -> Self {
        if self.phase < Phase::From {
            self.reject("UNION", "left side has no FROM clause");
            return self;
        }
        if let Err(err) = other.validate() {
            self.acc.fail(err);
            return self;
        }
        self.acc.push_str(keyword);
        self.acc.push_str(&other.subquery_sql());
        self.phase = Phase::Union;
        self.having_open = false;
        self
    }
}

impl<S: TableSet> Default for Select<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TableSet> Statement for Select<S> {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn accumulator(&self) -> &Accumulator {
        &self.acc
    }

    fn validate(&self) -> SqlResult<()> {
        self.acc.check()?;
        if self.phase < Phase::From {
            return Err(SqlError::clause_order("FROM", "SELECT has no FROM clause"));
        }
        Ok(())
    }
}

impl<S: TableSet> sealed::Sealed for Select<S> {}

impl<S: TableSet> Compose for Select<S> {
    type Tables = S;

    fn accumulator_mut(&mut self) -> &mut Accumulator {
        &mut self.acc
    }

    fn where_emitted(&self) -> bool {
        self.phase == Phase::Where
    }

    fn open_where(&mut self) -> SqlResult<()> {
        match self.phase {
            Phase::From | Phase::Join => {
                self.phase = Phase::Where;
                Ok(())
            }
            Phase::Start | Phase::Projection => {
                Err(SqlError::clause_order("WHERE", "WHERE before FROM"))
            }
            Phase::Where => Err(SqlError::clause_order(
                "WHERE",
                "statement already has a WHERE clause",
            )),
            _ => Err(SqlError::clause_order(
                "WHERE",
                "WHERE must precede GROUP BY, HAVING, ORDER BY and LIMIT",
            )),
        }
    }
}

impl<S: TableSet> fmt::Display for Select<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl<S: TableSet> fmt::Debug for Select<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("tables", &S::names())
            .field("sql", &self.acc.as_str())
            .field("phase", &self.phase)
            .field("error", &self.acc.error())
            .finish()
    }
}

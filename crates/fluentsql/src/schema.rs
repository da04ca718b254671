//! Schema descriptors.
//!
//! A table is described by a fieldless enum: the enum stands for the table and
//! each variant for one of its columns. The binding is an explicit
//! [`TableSchema`] constant rather than runtime reflection, usually generated
//! with `#[derive(Table)]`:
//!
//! ```ignore
//! use fluentsql::Table;
//!
//! #[derive(Debug, Clone, Copy, Table)]
//! enum Users {
//!     Id,
//!     Name,
//! }
//!
//! assert_eq!(Users::SCHEMA.name, "Users");
//! assert_eq!(Users::Name.column_name(), "Name");
//! ```
//!
//! Builders are parameterized over a [`TableSet`]: one table, or an ordered
//! tuple of up to three tables whose first entry is the primary (FROM) table.
//! [`ColumnOf`] proves at compile time that a column belongs to the set.

use crate::config::IdentifierQuoting;

/// Table name plus its ordered column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    pub const fn new(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns }
    }

    /// Column name at `index`.
    pub fn column(&self, index: usize) -> Option<&'static str> {
        self.columns.get(index).copied()
    }

    /// Position of `column`, if present.
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A schema descriptor: `Self` is the table, its values are columns.
///
/// `column_index` must return a valid index into `SCHEMA.columns`.
pub trait Table: Copy + 'static {
    const SCHEMA: TableSchema;

    fn column_index(self) -> usize;

    fn table_name() -> &'static str {
        Self::SCHEMA.name
    }

    fn column_name(self) -> &'static str {
        Self::SCHEMA.columns[self.column_index()]
    }

    fn column_ref(self) -> ColumnRef {
        ColumnRef::new(Self::SCHEMA.name, self.column_name())
    }
}

/// A resolved column: its table and its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: &'static str,
    column: &'static str,
}

impl ColumnRef {
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// `Column`
    pub fn bare(&self) -> String {
        self.render(false, IdentifierQuoting::Plain)
    }

    /// `Table.Column`
    pub fn qualified(&self) -> String {
        self.render(true, IdentifierQuoting::Plain)
    }

    pub fn render(&self, qualified: bool, quoting: IdentifierQuoting) -> String {
        let mut out = String::with_capacity(self.table.len() + self.column.len() + 5);
        self.write_sql(&mut out, qualified, quoting);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, qualified: bool, quoting: IdentifierQuoting) {
        if qualified {
            write_ident(out, self.table, quoting);
            out.push('.');
        }
        write_ident(out, self.column, quoting);
    }
}

pub(crate) fn write_ident(out: &mut String, name: &str, quoting: IdentifierQuoting) {
    match quoting {
        IdentifierQuoting::Plain => out.push_str(name),
        IdentifierQuoting::Backtick => {
            out.push('`');
            for ch in name.chars() {
                if ch == '`' {
                    out.push_str("``");
                } else {
                    out.push(ch);
                }
            }
            out.push('`');
        }
    }
}

/// An ordered set of tables a statement may reference.
pub trait TableSet: 'static {
    /// Whether columns render as `Table.Column` everywhere.
    const QUALIFIED: bool;

    /// The FROM / target table.
    fn primary() -> &'static str;

    /// All table names, primary first.
    fn names() -> Vec<&'static str>;

    fn contains(table: &str) -> bool {
        Self::names().contains(&table)
    }
}

impl<A: Table> TableSet for (A,) {
    const QUALIFIED: bool = false;

    fn primary() -> &'static str {
        A::SCHEMA.name
    }

    fn names() -> Vec<&'static str> {
        vec![A::SCHEMA.name]
    }
}

impl<A: Table, B: Table> TableSet for (A, B) {
    const QUALIFIED: bool = true;

    fn primary() -> &'static str {
        A::SCHEMA.name
    }

    fn names() -> Vec<&'static str> {
        vec![A::SCHEMA.name, B::SCHEMA.name]
    }
}

impl<A: Table, B: Table, C: Table> TableSet for (A, B, C) {
    const QUALIFIED: bool = true;

    fn primary() -> &'static str {
        A::SCHEMA.name
    }

    fn names() -> Vec<&'static str> {
        vec![A::SCHEMA.name, B::SCHEMA.name, C::SCHEMA.name]
    }
}

/// Position markers for [`ColumnOf`]; always inferred.
pub mod position {
    pub struct First;
    pub struct Second;
    pub struct Third;
}

/// Proof that a column belongs to table set `S`.
///
/// `M` is one of the [`position`] markers and is inferred at the call site.
/// Sets containing the same table twice make the position ambiguous.
pub trait ColumnOf<S: TableSet, M>: Copy {
    fn resolve(self) -> ColumnRef;
}

impl<A: Table> ColumnOf<(A,), position::First> for A {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

impl<A: Table, B: Table> ColumnOf<(A, B), position::First> for A {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

impl<A: Table, B: Table> ColumnOf<(A, B), position::Second> for B {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

impl<A: Table, B: Table, C: Table> ColumnOf<(A, B, C), position::First> for A {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

impl<A: Table, B: Table, C: Table> ColumnOf<(A, B, C), position::Second> for B {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

impl<A: Table, B: Table, C: Table> ColumnOf<(A, B, C), position::Third> for C {
    fn resolve(self) -> ColumnRef {
        Table::column_ref(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Users {
        Id,
        Name,
    }

    impl Table for Users {
        const SCHEMA: TableSchema = TableSchema::new("Users", &["Id", "Name"]);

        fn column_index(self) -> usize {
            self as usize
        }
    }

    #[derive(Debug, Clone, Copy)]
    enum Orders {
        UserId,
    }

    impl Table for Orders {
        const SCHEMA: TableSchema = TableSchema::new("Orders", &["UserId"]);

        fn column_index(self) -> usize {
            self as usize
        }
    }

    fn resolve_in<S: TableSet, M, C: ColumnOf<S, M>>(col: C) -> ColumnRef {
        col.resolve()
    }

    #[test]
    fn schema_lookup() {
        assert_eq!(Users::SCHEMA.len(), 2);
        assert_eq!(Users::SCHEMA.column(1), Some("Name"));
        assert_eq!(Users::SCHEMA.column(2), None);
        assert_eq!(Users::SCHEMA.position("Id"), Some(0));
        assert_eq!(Users::table_name(), "Users");
        assert_eq!(Users::Name.column_name(), "Name");
    }

    #[test]
    fn column_ref_rendering() {
        let col = Users::Id.column_ref();
        assert_eq!(col.bare(), "Id");
        assert_eq!(col.qualified(), "Users.Id");
        assert_eq!(col.render(true, IdentifierQuoting::Backtick), "`Users`.`Id`");
    }

    #[test]
    fn backtick_quoting_doubles_backticks() {
        let mut out = String::new();
        write_ident(&mut out, "we`ird", IdentifierQuoting::Backtick);
        assert_eq!(out, "`we``ird`");
    }

    #[test]
    fn table_sets() {
        assert!(!<(Users,)>::QUALIFIED);
        assert!(<(Users, Orders)>::QUALIFIED);
        assert_eq!(<(Users, Orders)>::primary(), "Users");
        assert_eq!(<(Users, Orders)>::names(), vec!["Users", "Orders"]);
        assert!(<(Users, Orders)>::contains("Orders"));
        assert!(!<(Users,)>::contains("Orders"));
    }

    #[test]
    fn column_of_resolves_by_position() {
        assert_eq!(resolve_in::<(Users, Orders), _, _>(Orders::UserId).qualified(), "Orders.UserId");
        assert_eq!(resolve_in::<(Users, Orders), _, _>(Users::Name).qualified(), "Users.Name");
        assert_eq!(resolve_in::<(Users,), _, _>(Users::Id).bare(), "Id");
    }
}

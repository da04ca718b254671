//! # fluentsql
//!
//! A fluent, schema-typed builder for MySQL-family SQL command text.
//!
//! ## Features
//!
//! - **Schema descriptors**: a fieldless enum stands for a table, its variants
//!   for columns (`#[derive(Table)]`)
//! - **Ordered clauses**: each builder tracks which clause it is in and rejects
//!   calls made out of order
//! - **Scoped composers**: `WHERE` and `CASE` sections take the statement by
//!   value and hand it back when closed
//! - **Escaped literals**: text values are quoted with embedded quotes doubled
//! - **Safe defaults**: DELETE requires WHERE, UPDATE requires SET
//! - **Text only**: the finished [`CommandText`] is handed to whatever
//!   transport executes it
//!
//! ## Example
//!
//! ```ignore
//! use fluentsql::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, Table)]
//! enum Users {
//!     Id,
//!     Name,
//!     Age,
//! }
//!
//! // SELECT
//! let sql = select::<Users>()
//!     .columns([Users::Id, Users::Name])
//!     .from()
//!     .start_where()
//!     .where_(Users::Age, Operator::GreaterThanEqualTo, 18)
//!     .end_where()
//!     .order_by(Users::Name, Direction::Asc)
//!     .build()?;
//! assert_eq!(
//!     sql,
//!     "SELECT Id, Name FROM Users WHERE Users.Age>=18 ORDER BY Name ASC;"
//! );
//!
//! // UPDATE
//! let sql = update::<Users>()
//!     .set_value(Users::Name, "Bob")
//!     .start_where()
//!     .where_(Users::Id, Operator::Equal, 1)
//!     .end_where()
//!     .build()?;
//! assert_eq!(sql, "UPDATE Users SET Name='Bob' WHERE Users.Id=1;");
//! ```
//!
//! Errors are recorded at the call that caused them and returned by
//! [`Statement::build`]; [`Statement::to_sql`] renders whatever was composed.

pub mod accumulator;
pub mod builder;
pub mod compose;
pub mod config;
pub mod error;
mod logging;
pub mod meta;
pub mod operator;
pub mod prelude;
pub mod schema;
pub mod statement;
pub mod value;

pub use accumulator::Accumulator;
pub use builder::{
    Delete, InsertInto, Select, Truncate, Update, delete_from, insert_into, select, truncate,
    update,
};
pub use compose::{CaseClause, Compose, WhereClause};
pub use config::{IdentifierQuoting, LiteralQuoting, SqlConfig};
pub use error::{SqlError, SqlResult};
pub use meta::{Aggregate, Aliased, Assignment, JoinKind, JoinOn};
pub use operator::{Direction, Operator};
pub use schema::{ColumnOf, ColumnRef, Table, TableSchema, TableSet};
pub use statement::{CommandText, Statement, StatementKind, strip_terminator};
pub use value::{Literal, ValueKind, quote_literal, safe_literal};

#[cfg(feature = "derive")]
pub use fluentsql_derive::Table;

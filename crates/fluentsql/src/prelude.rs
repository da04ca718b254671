//! Convenient imports for typical `fluentsql` usage.
//!
//! ```ignore
//! use fluentsql::prelude::*;
//! ```

pub use crate::{
    Aggregate, Aliased, Assignment, CommandText, Direction, JoinKind, JoinOn, Literal, Operator,
    Select, SqlConfig, SqlError, SqlResult, Statement, Table, ValueKind, delete_from, insert_into,
    select, truncate, update,
};

//! Statement builders.
//!
//! One builder per statement kind, each owning its [`Accumulator`] and an
//! ordered phase that only moves forward:
//!
//! - Commas are placed once a list already has an item.
//! - A call made in a phase it does not belong to appends nothing and
//!   records [`SqlError::ClauseOrder`].
//! - DELETE requires WHERE (unless explicitly allowed); UPDATE requires SET.
//!
//! ```ignore
//! use fluentsql::prelude::*;
//!
//! let sql = select::<Users>().select_all().from().to_sql();
//! assert_eq!(sql, "SELECT * FROM Users;");
//! ```

pub mod delete;
pub mod insert;
pub mod select;
pub mod truncate;
pub mod update;

pub use delete::Delete;
pub use insert::InsertInto;
pub use select::Select;
pub use truncate::Truncate;
pub use update::Update;

use crate::accumulator::Accumulator;
use crate::config::SqlConfig;
use crate::schema::Table;

/// `SELECT ... FROM T`
pub fn select<T: Table>() -> Select<(T,)> {
    Select::new()
}

/// `INSERT INTO T ...`
pub fn insert_into<T: Table>() -> InsertInto<T> {
    InsertInto::new()
}

/// `UPDATE T SET ...`
pub fn update<T: Table>() -> Update<T> {
    Update::new()
}

/// `DELETE FROM T ...`
pub fn delete_from<T: Table>() -> Delete<T> {
    Delete::new()
}

/// `TRUNCATE TABLE T`
pub fn truncate<T: Table>() -> Truncate<T> {
    Truncate::new()
}

/// Seed an accumulator with `keyword` followed by a table name.
pub(crate) fn seeded(keyword: &str, table: &str, config: SqlConfig) -> Accumulator {
    let mut acc = Accumulator::new(keyword, config);
    acc.push_table(table);
    acc
}

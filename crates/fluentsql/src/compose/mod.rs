//! Scoped composers that take a statement by value, append a structured
//! section to its text, and hand it back when closed.
//!
//! ```ignore
//! let sql = update::<Users>()
//!     .set_value(Users::Name, "Bob")
//!     .start_where()
//!     .where_(Users::Id, Operator::Equal, 1)
//!     .end_where()
//!     .to_sql();
//! assert_eq!(sql, "UPDATE Users SET Name='Bob' WHERE Users.Id=1;");
//! ```

mod case;
mod predicate;

pub use case::CaseClause;
pub use predicate::WhereClause;

use crate::accumulator::Accumulator;
use crate::error::{SqlError, SqlResult};
use crate::schema::TableSet;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// A statement a composer can be attached to.
///
/// Implemented by the statement builders only.
pub trait Compose: sealed::Sealed + Sized {
    /// Tables whose columns the composer accepts.
    type Tables: TableSet;

    #[doc(hidden)]
    fn accumulator_mut(&mut self) -> &mut Accumulator;

    /// Whether the statement already carries a `WHERE` keyword.
    #[doc(hidden)]
    fn where_emitted(&self) -> bool {
        false
    }

    /// Enter the statement's WHERE phase, or report why it cannot be entered.
    #[doc(hidden)]
    fn open_where(&mut self) -> SqlResult<()> {
        Err(SqlError::clause_order("WHERE", "statement has no WHERE clause"))
    }
}

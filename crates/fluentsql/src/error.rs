//! Error types for fluentsql

use thiserror::Error;

/// Result type alias for fluentsql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors detected while composing a statement.
///
/// Builders record the first error at the call that caused it and surface it
/// from [`Statement::validate`](crate::Statement::validate) and
/// [`Statement::build`](crate::Statement::build).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// An argument was structurally invalid (empty column list, empty alias, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operator outside the supported comparison set
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// A clause was added in a position the statement grammar does not allow
    #[error("Clause order error in {clause}: {reason}")]
    ClauseOrder { clause: &'static str, reason: String },

    /// Predicate groups left open when the WHERE section was closed
    #[error("Unbalanced group: {0} group(s) left open")]
    UnbalancedGroup(usize),

    /// Predicate ended where an operand was still expected
    #[error("Incomplete predicate: {0}")]
    IncompletePredicate(String),

    /// INSERT row whose value count differs from its column count
    #[error("Value count mismatch: {columns} column(s) but {values} value(s)")]
    ValueCountMismatch { columns: usize, values: usize },

    /// DELETE without WHERE that was not explicitly allowed
    #[error("Missing WHERE: {0}")]
    MissingWhere(String),

    /// Configuration could not be loaded
    #[cfg(feature = "config")]
    #[error("Config error: {0}")]
    Config(String),
}

impl SqlError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a clause-order error for `clause`
    pub fn clause_order(clause: &'static str, reason: impl Into<String>) -> Self {
        Self::ClauseOrder {
            clause,
            reason: reason.into(),
        }
    }

    /// Create an incomplete-predicate error
    pub fn incomplete_predicate(message: impl Into<String>) -> Self {
        Self::IncompletePredicate(message.into())
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is an unsupported-operator error
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self, Self::UnsupportedOperator(_))
    }

    /// Check if this is a clause-order error
    pub fn is_clause_order(&self) -> bool {
        matches!(self, Self::ClauseOrder { .. })
    }
}

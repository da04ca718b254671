//! Finalization shared by all statement builders.

use crate::accumulator::Accumulator;
use crate::error::SqlResult;
use crate::logging;
use std::fmt;

/// Statement terminator appended by [`Statement::to_sql`].
pub const TERMINATOR: char = ';';

/// Kind of SQL statement a builder produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Truncate => "TRUNCATE",
        })
    }
}

/// Base trait for all statement builders.
pub trait Statement {
    fn kind(&self) -> StatementKind;

    /// The builder's text buffer.
    fn accumulator(&self) -> &Accumulator;

    /// Closers owed by a clause that is still open (e.g. an INSERT value list).
    fn pending(&self) -> &'static str {
        ""
    }

    /// Accumulated text plus terminator.
    ///
    /// Callable at any point; an incomplete statement renders as far as it got.
    fn to_sql(&self) -> String {
        self.accumulator().finish(self.pending())
    }

    /// Validate builder state before handing the text off.
    fn validate(&self) -> SqlResult<()> {
        self.accumulator().check()
    }

    /// Validate, then produce the command text.
    fn build(&self) -> SqlResult<CommandText> {
        self.validate()?;
        let sql = self.to_sql();
        logging::statement_built(self.kind(), &sql, &self.accumulator().config());
        Ok(CommandText(sql))
    }

    /// Finalized text with exactly one trailing terminator removed, for
    /// embedding as a subquery.
    fn subquery_sql(&self) -> String {
        strip_terminator(&self.to_sql()).to_string()
    }
}

/// Remove exactly one trailing terminator, if present.
pub fn strip_terminator(sql: &str) -> &str {
    sql.strip_suffix(TERMINATOR).unwrap_or(sql)
}

/// Finished command text: the only thing handed to a database transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandText(String);

impl CommandText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CommandText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CommandText> for String {
    fn from(text: CommandText) -> Self {
        text.0
    }
}

impl PartialEq<&str> for CommandText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_exactly_one_terminator() {
        assert_eq!(strip_terminator("SELECT 1;"), "SELECT 1");
        assert_eq!(strip_terminator("SELECT ';';;"), "SELECT ';';");
        assert_eq!(strip_terminator("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn kind_display() {
        assert_eq!(StatementKind::Truncate.to_string(), "TRUNCATE");
    }
}

//! Rendering configuration shared by every builder.

use serde::Deserialize;

/// How NonNumeric literals are embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralQuoting {
    /// Wrap in single quotes and escape quotes, backslashes and control characters.
    ///
    /// Assumes the server's default `sql_mode`. Under `NO_BACKSLASH_ESCAPES`
    /// a backslash is stored twice; use [`Verbatim`](Self::Verbatim) with
    /// pre-escaped text there.
    #[default]
    Escaped,
    /// Wrap in single quotes only. Embedded quotes break the statement.
    Verbatim,
}

/// How table and column identifiers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierQuoting {
    /// `Table.Column`
    #[default]
    Plain,
    /// `` `Table`.`Column` ``
    Backtick,
}

/// Configuration for statement rendering and SQL logging.
///
/// Every builder carries one; composers inherit it from their parent.
///
/// # Example
///
/// ```
/// use fluentsql::{LiteralQuoting, SqlConfig};
///
/// let config = SqlConfig::new()
///     .with_literal_quoting(LiteralQuoting::Verbatim)
///     .with_max_log_sql_length(80);
/// assert_eq!(config.max_log_sql_length, Some(80));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Quoting applied to NonNumeric literals.
    pub literal_quoting: LiteralQuoting,
    /// Quoting applied to identifiers.
    pub identifier_quoting: IdentifierQuoting,
    /// Whether built statements are logged (requires the `tracing` feature).
    pub log_sql: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_log_sql_length: Option<usize>,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            literal_quoting: LiteralQuoting::default(),
            identifier_quoting: IdentifierQuoting::default(),
            log_sql: true,
            max_log_sql_length: Some(200),
        }
    }
}

impl SqlConfig {
    /// Create a configuration with defaults (escaped literals, plain identifiers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set literal quoting.
    pub fn with_literal_quoting(mut self, quoting: LiteralQuoting) -> Self {
        self.literal_quoting = quoting;
        self
    }

    /// Set identifier quoting.
    pub fn with_identifier_quoting(mut self, quoting: IdentifierQuoting) -> Self {
        self.identifier_quoting = quoting;
        self
    }

    /// Enable or disable SQL logging.
    pub fn with_log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_log_sql_length(mut self, len: usize) -> Self {
        self.max_log_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_log_sql_length = None;
        self
    }

    /// Parse a configuration from a TOML document.
    ///
    /// Missing keys keep their defaults.
    ///
    /// ```toml
    /// literal_quoting = "escaped"
    /// identifier_quoting = "backtick"
    /// max_log_sql_length = 120
    /// ```
    #[cfg(feature = "config")]
    pub fn from_toml_str(raw: &str) -> crate::SqlResult<Self> {
        toml::from_str(raw).map_err(|e| crate::SqlError::Config(e.to_string()))
    }
}

//! Literal classification and quoting.
//!
//! Values are embedded into command text as literals. A [`ValueKind`] decides
//! whether the raw text is wrapped in single quotes (NonNumeric) or left bare
//! (Numeric).

use crate::config::LiteralQuoting;
use crate::error::{SqlError, SqlResult};
use std::borrow::Cow;
use std::fmt;

/// Classification of a literal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Embedded as-is: `42`, `9.99`, `NULL`.
    Numeric,
    /// Wrapped in single quotes: `'Bob'`.
    NonNumeric,
}

/// Render `raw` as a SQL literal according to `kind` and `quoting`.
///
/// Numeric values are returned unchanged. NonNumeric values are wrapped in
/// single quotes; with [`LiteralQuoting::Escaped`] embedded quotes are doubled
/// and backslashes and control characters are escaped MySQL-style.
pub fn quote_literal(raw: &str, kind: ValueKind, quoting: LiteralQuoting) -> Cow<'_, str> {
    match (kind, quoting) {
        (ValueKind::Numeric, _) => Cow::Borrowed(raw),
        (ValueKind::NonNumeric, LiteralQuoting::Verbatim) => Cow::Owned(format!("'{raw}'")),
        (ValueKind::NonNumeric, LiteralQuoting::Escaped) => {
            let mut out = String::with_capacity(raw.len() + 2);
            out.push('\'');
            for ch in raw.chars() {
                match ch {
                    '\'' => out.push_str("''"),
                    '\\' => out.push_str("\\\\"),
                    '\0' => out.push_str("\\0"),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\u{1a}' => out.push_str("\\Z"),
                    c => out.push(c),
                }
            }
            out.push('\'');
            Cow::Owned(out)
        }
    }
}

/// Render `raw` with the default (escaped) quoting.
pub fn safe_literal(raw: &str, kind: ValueKind) -> String {
    quote_literal(raw, kind, LiteralQuoting::Escaped).into_owned()
}

/// A raw literal paired with its classification.
///
/// Only the quoted rendering is exposed to statements.
///
/// # Example
///
/// ```
/// use fluentsql::{Literal, ValueKind};
///
/// assert_eq!(Literal::new("Bob", ValueKind::NonNumeric).to_sql(), "'Bob'");
/// assert_eq!(Literal::from(42).to_sql(), "42");
/// assert_eq!(Literal::from("O'Hara").to_sql(), "'O''Hara'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    raw: String,
    kind: ValueKind,
}

impl Literal {
    pub fn new(raw: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            raw: raw.into(),
            kind,
        }
    }

    /// A literal embedded without quotes.
    pub fn numeric(raw: impl Into<String>) -> Self {
        Self::new(raw, ValueKind::Numeric)
    }

    /// A literal wrapped in single quotes.
    pub fn text(raw: impl Into<String>) -> Self {
        Self::new(raw, ValueKind::NonNumeric)
    }

    /// SQL `NULL`.
    pub fn null() -> Self {
        Self::numeric("NULL")
    }

    /// A float literal, rejecting `NaN` and the infinities, which SQL cannot
    /// express.
    ///
    /// `From<f64>` maps those values to `NULL` instead.
    pub fn try_float(value: f64) -> SqlResult<Self> {
        if value.is_finite() {
            Ok(Self::numeric(value.to_string()))
        } else {
            Err(SqlError::invalid_argument(format!(
                "{value} has no SQL literal form"
            )))
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Render with the given quoting.
    pub fn render(&self, quoting: LiteralQuoting) -> Cow<'_, str> {
        quote_literal(&self.raw, self.kind, quoting)
    }

    /// Render with the default (escaped) quoting.
    pub fn to_sql(&self) -> String {
        self.render(LiteralQuoting::Escaped).into_owned()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(LiteralQuoting::Escaped))
    }
}

macro_rules! numeric_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::numeric(value.to_string())
                }
            }
        )*
    };
}

numeric_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// NaN and the infinities have no SQL literal; they become NULL.
macro_rules! float_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    if value.is_finite() {
                        Literal::numeric(value.to_string())
                    } else {
                        Literal::null()
                    }
                }
            }
        )*
    };
}

float_literal!(f32, f64);

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::numeric(if value { "TRUE" } else { "FALSE" })
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::text(value)
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::text(value)
    }
}

impl From<&String> for Literal {
    fn from(value: &String) -> Self {
        Literal::text(value.as_str())
    }
}

impl From<char> for Literal {
    fn from(value: char) -> Self {
        Literal::text(value.to_string())
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Literal::null, Into::into)
    }
}

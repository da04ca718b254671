//! SQL debug events via `tracing`.
//!
//! Enable with the crate feature: `fluentsql = { features = ["tracing"] }`.
//! Built statements are emitted at `DEBUG` and recorded errors at `WARN`,
//! both under the `fluentsql.sql` target. Without the feature these hooks
//! compile to nothing.

use crate::config::SqlConfig;
use crate::error::SqlError;
use crate::statement::StatementKind;
use std::borrow::Cow;

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn display_sql<'a>(sql: &'a str, config: &SqlConfig) -> Cow<'a, str> {
    match config.max_log_sql_length {
        Some(max) if sql.len() > max => Cow::Owned(format!("{}...", truncate_sql_bytes(sql, max))),
        _ => Cow::Borrowed(sql),
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn statement_built(kind: StatementKind, sql: &str, config: &SqlConfig) {
    if !config.log_sql {
        return;
    }
    let sql = display_sql(sql, config);
    tracing::debug!(target: "fluentsql.sql", kind = %kind, sql = %sql, "statement built");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn statement_built(_kind: StatementKind, _sql: &str, _config: &SqlConfig) {}

#[cfg(feature = "tracing")]
pub(crate) fn error_recorded(err: &SqlError, config: &SqlConfig) {
    if !config.log_sql {
        return;
    }
    tracing::warn!(target: "fluentsql.sql", error = %err, "statement composition error");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn error_recorded(_err: &SqlError, _config: &SqlConfig) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundary() {
        assert_eq!(truncate_sql_bytes("SELECT 1", 100), "SELECT 1");
        assert_eq!(truncate_sql_bytes("SELECT 1", 6), "SELECT");
        // 'é' is two bytes; cutting inside it backs off to the boundary.
        assert_eq!(truncate_sql_bytes("é", 1), "");
    }

    #[test]
    fn display_respects_config() {
        let long = "SELECT * FROM Users;";
        let config = SqlConfig::new().with_max_log_sql_length(6);
        assert_eq!(display_sql(long, &config), "SELECT...");
        assert_eq!(display_sql(long, &config.no_truncate()), long);
    }
}

#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn built_statement_is_logged_at_debug() {
        let logged = capture(|| {
            statement_built(StatementKind::Select, "SELECT * FROM Users;", &SqlConfig::default());
        });
        assert!(logged.contains("DEBUG"), "{logged}");
        assert!(logged.contains("fluentsql.sql"), "{logged}");
        assert!(logged.contains("kind=SELECT"), "{logged}");
        assert!(logged.contains("SELECT * FROM Users;"), "{logged}");
    }

    #[test]
    fn recorded_error_is_logged_at_warn() {
        let logged = capture(|| {
            error_recorded(&SqlError::invalid_argument("empty IN list"), &SqlConfig::default());
        });
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("statement composition error"), "{logged}");
        assert!(logged.contains("empty IN list"), "{logged}");
    }

    #[test]
    fn long_sql_is_truncated_in_the_event() {
        let config = SqlConfig::new().with_max_log_sql_length(6);
        let logged = capture(|| {
            statement_built(StatementKind::Delete, "DELETE FROM Logs;", &config);
        });
        assert!(logged.contains("DELETE..."), "{logged}");
        assert!(!logged.contains("FROM Logs"), "{logged}");
    }

    #[test]
    fn log_sql_off_suppresses_events() {
        let config = SqlConfig::new().with_log_sql(false);
        let logged = capture(|| {
            statement_built(StatementKind::Select, "SELECT 1;", &config);
            error_recorded(&SqlError::invalid_argument("ignored"), &config);
        });
        assert!(logged.is_empty(), "{logged}");
    }
}

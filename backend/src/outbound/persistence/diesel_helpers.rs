//! Shared helpers for the Diesel repository implementations.
//!
//! - error mapping from pool and Diesel failures to [`RepositoryError`];
//! - `LIKE` pattern escaping for keyword predicates;
//! - page window conversion between `pagination` and SQL `LIMIT`/`OFFSET`;
//! - the `order_by_direction!` macro used by the dynamic sort builders.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Map a pool failure to a connection error.
pub(crate) fn map_pool_error(error: PoolError) -> RepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RepositoryError::connection(message)
        }
    }
}

/// Map a Diesel failure for `operation` into a repository error.
///
/// Unique and foreign key violations keep their constraint name so services
/// can log it; other database messages are summarised.
pub(crate) fn map_diesel_error(error: DieselError, operation: &'static str) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(%error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::duplicate(constraint_label(info.constraint_name(), info.message()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::missing_reference(constraint_label(
                info.constraint_name(),
                info.message(),
            ))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query(format!("{operation}: record not found")),
        DieselError::QueryBuilderError(_) => {
            RepositoryError::query(format!("{operation}: database query error"))
        }
        _ => RepositoryError::query(format!("{operation}: database error")),
    }
}

fn constraint_label(constraint: Option<&str>, message: &str) -> String {
    constraint.map_or_else(|| message.to_owned(), str::to_owned)
}

/// Build an `ILIKE` pattern that matches `keyword` as a literal substring.
///
/// PostgreSQL treats backslash as the default `LIKE` escape character.
pub(crate) fn contains_pattern(keyword: &str) -> String {
    format!("%{}%", escape_like(keyword))
}

/// Escape `LIKE` metacharacters so `value` only matches itself.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// SQL `LIMIT` and `OFFSET` for a page request.
pub(crate) fn page_window(request: PageRequest) -> Result<(i64, i64), RepositoryError> {
    let offset = i64::try_from(request.offset())
        .map_err(|_| RepositoryError::query("page offset exceeds i64 range"))?;
    Ok((i64::from(request.size()), offset))
}

/// Convert a SQL `COUNT(*)` into an element total.
pub(crate) fn element_total(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// Apply `ORDER BY column ASC|DESC` to a boxed query.
macro_rules! order_by_direction {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            $crate::domain::SortDirection::Asc => $query.order($column.asc()),
            $crate::domain::SortDirection::Desc => $query.order($column.desc()),
        }
    };
}

pub(crate) use order_by_direction;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pie", "%pie%")]
    #[case("100%", "%100\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("c:\\tmp", "%c:\\\\tmp%")]
    fn patterns_escape_metacharacters(#[case] keyword: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(keyword), expected);
    }

    #[rstest]
    fn page_window_uses_offset_and_size() {
        let request = PageRequest::new(3, 20).expect("valid request");
        assert_eq!(page_window(request).expect("fits"), (20, 60));
    }

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, RepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_reported_as_query_failure() {
        let mapped = map_diesel_error(DieselError::NotFound, "load recipe");
        assert!(matches!(mapped, RepositoryError::Query { .. }));
    }
}

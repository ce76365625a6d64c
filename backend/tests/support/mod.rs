//! Helpers shared by the integration suites, pulled in with `mod support;`.

pub mod pg_embed;

/// Environment switch that turns cluster bootstrap failures into skips.
const SKIP_VAR: &str = "SKIP_TEST_CLUSTER";

fn skip_requested() -> bool {
    std::env::var(SKIP_VAR).is_ok_and(|value| {
        ["1", "true", "yes"]
            .iter()
            .any(|truthy| value.eq_ignore_ascii_case(truthy))
    })
}

/// Returns `None` so the caller can skip when `SKIP_TEST_CLUSTER` is set;
/// otherwise fails the test loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    assert!(
        skip_requested(),
        "embedded postgres unavailable: {reason} (set {SKIP_VAR}=1 to skip)"
    );
    eprintln!("skipping: embedded postgres unavailable: {reason}");
    None
}

/// `postgres::Error`'s `Display` often reads just `db error`; surface the
/// SQLSTATE and server message instead.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    error.as_db_error().map_or_else(
        || error.to_string(),
        |db| format!("{:?}: {}", db.code(), db.message()),
    )
}

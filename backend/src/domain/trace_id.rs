//! Correlation identifier attached to each HTTP request.
//!
//! The trace middleware generates one identifier per request and runs the
//! handler inside [`TraceId::scope`]. Anything on that task, including
//! [`crate::domain::Error::new`], can then read it back with
//! [`TraceId::current`]. Spawned tasks do not inherit the value; wrap them in
//! `scope` again if they need it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header name echoed on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static ACTIVE: TraceId;
}

/// Random UUID identifying one request.
///
/// ```
/// use recipe_api::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c2b1e-4a42-4a5e-9a39-2f0b6a8c9d10".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier of the enclosing scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Drive `fut` to completion with `id` as the current identifier.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        ACTIVE.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse().map(Self)
    }
}

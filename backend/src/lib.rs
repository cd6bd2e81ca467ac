//! Taskhub: collaborative projects, tasks and notifications over HTTP.
//!
//! - [`domain`]: records, access rules, analytics and services behind ports.
//! - [`inbound`]: the actix-web adapter.
//! - [`outbound`]: PostgreSQL, in-memory and credential adapters.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

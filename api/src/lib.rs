// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres, S3 and Cognito adapters
// - presentation: HTTP handlers and routing
// - application: ports, use cases and response views
// - domain: core models and validation

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

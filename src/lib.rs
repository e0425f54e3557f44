// Module layout (Clean Architecture style)
// - bootstrap: configuration and shared application context
// - infrastructure: Postgres pool, migrations and sqlx repositories
// - presentation: HTTP handlers, extractors and routing
// - application: ports, use cases and access policy
// - domain: users, jobs and applications

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

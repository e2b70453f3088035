/// Post Service Library
///
/// Serves the posts resource: a JSON REST API over a post store plus an
/// HTML index page.
///
/// # Modules
///
/// - `handlers`: Resource controller contract, posts controller, health probes
/// - `models`: Post entity and request payloads
/// - `db`: Post store trait with PostgreSQL and in-memory implementations
/// - `views`: Template rendering
/// - `middleware`: HTTP request metrics
/// - `metrics`: Prometheus collectors and `/metrics` handler
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};

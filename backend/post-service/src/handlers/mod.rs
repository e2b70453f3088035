/// HTTP handlers for post-service
///
/// - `resource`: the seven-operation REST controller contract and its routing
/// - `posts`: the posts controller
/// - `decode`: JSON request body decoding and validation
/// - `health`: liveness and readiness probes
pub mod decode;
pub mod health;
pub mod posts;
pub mod resource;

pub use decode::decode_body;
pub use posts::PostsController;
pub use resource::ResourceController;

use crate::metrics;
use actix_web::web;

/// Register every route the service exposes.
///
/// Shared by `main` and the integration tests so both build the same app.
pub fn configure_service(cfg: &mut web::ServiceConfig, controller: web::Data<PostsController>) {
    cfg.app_data(web::Data::from(controller.store()))
        .app_data(controller)
        .route("/health", web::get().to(health::health_summary))
        .route("/health/live", web::get().to(health::liveness_check))
        .route("/health/ready", web::get().to(health::readiness_check))
        .route("/metrics", web::get().to(metrics::serve_metrics));

    resource::configure::<PostsController>(cfg, "/posts");
}

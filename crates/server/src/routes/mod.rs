use actix_web::web;

pub mod summarize;
pub mod system;

/// Register all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system::index)
        .service(system::health)
        .service(summarize::summarize);
}

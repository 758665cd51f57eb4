pub mod store;
pub mod handlers;
pub mod service;
pub mod models;
pub mod dto;
pub mod errors;

use actix_web::web;

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::scope("/events").configure(handlers::event::init_routes))
            .service(web::scope("/event").configure(handlers::event::init_patch_routes))
            .service(web::scope("/rsvps").configure(handlers::rsvp::init_routes)),
    );
}

use actix_web::{HttpServer, App, web};
use dotenv::dotenv;
use std::env;

use rsvp_service::{configure_api, service, store::EventStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    service::log::init_logger();
    let bind_addr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let store = web::Data::new(EventStore::new());
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .wrap(service::log::RequestLogger)
            .configure(configure_api)
    })
    .bind(bind_addr)?
    .run()
    .await
}

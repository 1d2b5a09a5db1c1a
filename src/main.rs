mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::Config, database::Store, state::AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Attendance Service...");
    log::info!("🗄️  Storage backend: {}", config.storage);

    let state = AppState::from_config(&config).await.map_err(|e| {
        log::error!("❌ Failed to open storage: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;
    let store = state.store.clone();
    let state_data = web::Data::new(state);

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state_data.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    log::info!("🛑 Server stopped");
    store.shutdown().await;

    Ok(())
}

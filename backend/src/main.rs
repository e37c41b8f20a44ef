mod analysis;
mod bootstrap;
mod config;
mod gemini;
mod routes;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use analysis::handler::ScreenshotHandler;
use gemini::InferenceCapability;
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let (config, client) = match bootstrap::initialize() {
        Ok(initialized) => initialized,
        Err(e) => {
            log::error!("Failed to create app: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Startup failed: {}", e),
            ));
        }
    };

    log::info!(
        "Gemini client ready for model {} at {}",
        client.model(),
        client.endpoint()
    );

    let client: Arc<dyn InferenceCapability> = Arc::new(client);
    let handler = web::Data::new(ScreenshotHandler::new(
        Some(client),
        config.analysis_prompt.clone(),
    ));

    let bind_address = config.bind_address();
    let plugin_id = config.plugin_id.clone();
    let max_body_bytes = config.max_body_bytes;

    log::info!(
        "Serving resources under /api/plugins/{}/resources",
        plugin_id
    );
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .app_data(handler.clone())
            .configure(|cfg| configure_routes(cfg, &plugin_id))
    })
    .bind(&bind_address)?
    .run()
    .await
}

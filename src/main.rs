mod config;
mod error;
mod model;
mod tutor;
mod web;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web::Data, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use config::Config;
use model::TutorModel;
use web::routes;

// Immutable after startup; shared by every worker
struct AppState {
    config: Config,
    model: TutorModel,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Syrian Math Tutor API");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let model = match TutorModel::new(&config) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to initialize completion client: {}", e);
            std::process::exit(1);
        }
    };

    let bind_addr = (config.host.clone(), config.port);
    let max_upload_bytes = config.max_upload_bytes;
    let app_state = Data::new(AppState { config, model });

    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(|cfg| routes::configure(cfg, max_upload_bytes))
    })
    .bind(bind_addr)?
    .run()
    .await
}

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::error::TutorError;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig, max_upload_bytes: usize) {
    // Extractor failures come back in the same JSON shape as handler errors.
    // Conversation history rides in form fields, so forms get the upload bound too.
    let form_config = web::FormConfig::default()
        .limit(max_upload_bytes)
        .error_handler(|err, _req| {
            TutorError::invalid_input(format!("Invalid form data: {}", err)).into()
        });
    // `Either` buffers /chat bodies through this before trying either form
    let payload_config = web::PayloadConfig::new(max_upload_bytes);
    let multipart_config = MultipartFormConfig::default()
        .total_limit(max_upload_bytes)
        .memory_limit(max_upload_bytes)
        .error_handler(|err, _req| {
            TutorError::invalid_input(format!("Invalid multipart data: {}", err)).into()
        });

    cfg.app_data(form_config)
        .app_data(payload_config)
        .app_data(multipart_config)
        .route("/", web::get().to(handlers::index))
        .route("/health", web::get().to(handlers::health_check))
        .route("/solve", web::post().to(handlers::solve))
        .route("/chat", web::post().to(handlers::chat));
}

mod error;
mod inference;
mod llm;
mod routes;

use std::env;
use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};

use inference::classifier::Classifier;
use llm::client::{CompletionClient, DEFAULT_BASE_URL, DEFAULT_MODEL, LlmClient};
use routes::configure_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    let model_path =
        env::var("PEST_MODEL_PATH").unwrap_or_else(|_| "model/pest_model.pt".to_string());
    let classifier = match Classifier::load(Path::new(&model_path)) {
        Ok(classifier) => classifier,
        Err(e) => {
            log::error!("Failed to preload pest model from {}: {}", model_path, e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Model loading failed: {}", e),
            ));
        }
    };
    log::info!("Loaded pest model from {}", model_path);

    let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::Other, "OPENAI_API_KEY is not set")
    })?;
    let base_url = env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let llm: Arc<dyn CompletionClient> = Arc::new(
        LlmClient::new(api_key, base_url, llm_model).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("LLM client initialization failed: {}", e),
            )
        })?,
    );
    let llm_data = web::Data::from(llm);

    // A configured origin restricts CORS to the front-end; otherwise any
    // origin is accepted.
    let allowed_origin = env::var("ALLOWED_ORIGIN").ok();

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let cors = match allowed_origin.as_deref() {
            Some(origin) => Cors::default().allowed_origin(origin),
            None => Cors::default().allow_any_origin(),
        }
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::ACCEPT,
            actix_web::http::header::CONTENT_TYPE,
        ])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(classifier.clone()))
            .app_data(llm_data.clone())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}

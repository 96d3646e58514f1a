use std::fs;
use std::io::Write;
use std::path::PathBuf;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde::Deserialize;
use uuid::Uuid;

use shared::{ApiStatus, ChatResponse, PredictAllResponse, PredictImageResponse};

use crate::error::ApiError;
use crate::inference::classifier::Classifier;
use crate::inference::preprocess::preprocess;
use crate::llm::client::CompletionClient;
use crate::llm::guard;
use crate::llm::prompt;

const TEMP_IMAGE_DIR: &str = "temp_images";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/predict-all/").route(web::post().to(predict_all)))
        .service(web::resource("/predict-image/").route(web::post().to(predict_image)))
        .service(web::resource("/chat/").route(web::post().to(chat)));
}

struct ImageUpload {
    filename: String,
    data: Vec<u8>,
}

/// Drains a multipart payload into the uploaded image and the optional `query`
/// text field. Unknown fields are ignored.
async fn read_upload(
    payload: &mut Multipart,
) -> Result<(Option<ImageUpload>, Option<String>), ApiError> {
    let mut image = None;
    let mut query = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let name = field.name().unwrap_or_default().to_string();
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::Validation(e.to_string()))?;
            data.write_all(&chunk)?;
        }

        match name.as_str() {
            "image" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .unwrap_or("upload")
                    .to_string();
                image = Some(ImageUpload { filename, data });
            }
            "query" => {
                let text = String::from_utf8_lossy(&data).trim().to_string();
                if !text.is_empty() {
                    query = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok((image, query))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(ApiStatus {
        message: "Paddy Pest Prediction API is running.".into(),
    })
}

/// Combined flow: classify the upload, then ask the LLM for an explanation
/// contextualized by the optional `query` field.
async fn predict_all(
    classifier: web::Data<Classifier>,
    llm: web::Data<dyn CompletionClient>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (image, query) = read_upload(&mut payload).await?;
    let image =
        image.ok_or_else(|| ApiError::Validation("missing required `image` field".into()))?;

    let tensor = preprocess(&image.data)?;
    let prediction = classifier.classify(&tensor)?;
    info!("predicted '{}' for upload '{}'", prediction, image.filename);

    let prompt = prompt::explanation_prompt(prediction, query.as_deref());
    let explanation = llm.complete(&prompt).await?;

    Ok(HttpResponse::Ok().json(PredictAllResponse {
        prediction: prediction.to_string(),
        explanation,
    }))
}

/// Image-only flow. The upload is staged on disk and decoded from that path,
/// matching the file-backed decode side channel this route has always had.
async fn predict_image(
    classifier: web::Data<Classifier>,
    llm: web::Data<dyn CompletionClient>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let (image, _) = read_upload(&mut payload).await?;
    let image =
        image.ok_or_else(|| ApiError::Validation("missing required `image` field".into()))?;

    fs::create_dir_all(TEMP_IMAGE_DIR)?;
    let path = PathBuf::from(TEMP_IMAGE_DIR).join(format!("{}_{}", Uuid::new_v4(), image.filename));
    fs::write(&path, &image.data)?;
    let staged = fs::read(&path)?;

    let tensor = preprocess(&staged)?;
    let prediction = classifier.classify(&tensor)?;
    info!("predicted '{}' for staged upload {:?}", prediction, path);

    let prompt = prompt::explanation_prompt(prediction, None);
    let response = llm.complete(&prompt).await?;

    Ok(HttpResponse::Ok().json(PredictImageResponse {
        prediction: prediction.to_string(),
        response,
    }))
}

#[derive(Deserialize)]
struct ChatForm {
    text: String,
}

/// Agriculture-only chat. Off-topic input short-circuits with the canned
/// redirect before any provider call; provider failures degrade to the canned
/// apology with a 500 instead of propagating.
async fn chat(llm: web::Data<dyn CompletionClient>, form: web::Form<ChatForm>) -> HttpResponse {
    if !guard::is_on_topic(&form.text) {
        return HttpResponse::Ok().json(ChatResponse {
            response: guard::REDIRECT_MESSAGE.to_string(),
        });
    }

    let prompt = prompt::chat_prompt(&form.text);
    match llm.complete(&prompt).await {
        Ok(response) => HttpResponse::Ok().json(ChatResponse { response }),
        Err(e) => {
            error!("Chat endpoint error: {}", e);
            HttpResponse::InternalServerError().json(ChatResponse {
                response: guard::APOLOGY_MESSAGE.to_string(),
            })
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
pub struct ApiStatus {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct PredictAllResponse {
    pub prediction: String,
    pub explanation: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct PredictImageResponse {
    pub prediction: String,
    pub response: String,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct ChatResponse {
    pub response: String,
}

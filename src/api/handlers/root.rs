use axum::{http::StatusCode, Json, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
}

pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Megaphone Announcements",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Announcement widget for the Megaphone messaging system",
        "status": "operational",
        "endpoints": {
            "health": "/health",
            "api": "/api",
            "widget": "/announcements/{audience}",
            "page": "/announcements/{audience}/page"
        }
    }))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Megaphone Announcements API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Announcement widget for the Megaphone messaging system".to_string(),
        status: "operational".to_string(),
    })
}

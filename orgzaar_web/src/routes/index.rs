use axum::{response::Html, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// GET /
pub async fn landing() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /api
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "message": "Mini Orgzaar API'ye hoş geldiniz!",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "endpoints": {
            "services": {
                "GET /api/v1/services": "Hizmetleri listeler"
            },
            "bookings": {
                "POST /api/v1/bookings": "Rezervasyon talebi oluşturur"
            }
        }
    }))
}

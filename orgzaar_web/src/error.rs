use std::{any::Any, collections::BTreeMap};

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use derive_more::{Display, Error, From};
use orgzaar::domain::booking::{BookingError, BookingField};
use serde::Serialize;
use tracing::{debug, error};

/// APIエラー
#[derive(Error, Display, Debug, From)]
pub enum ApiError {
    /// 予約リクエストが不正
    #[display(fmt = "Invalid booking request: {}", _0)]
    Validation(#[error(source)] BookingError),
    /// ルートが存在しない
    #[display(fmt = "Endpoint not found")]
    #[from(ignore)]
    NotFound,
    /// 想定外の内部エラー。詳細はログにのみ出す
    #[display(fmt = "Internal server error")]
    #[from(ignore)]
    Internal,
}

#[derive(Serialize)]
struct ValidationBody {
    error: &'static str,
    details: BTreeMap<BookingField, String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationBody {
                    error: "Geçersiz veri.",
                    details: err.details(),
                }),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: "Endpoint bulunamadı",
                    message: "İstediğiniz URL mevcut değil. Lütfen /api/v1/services veya /api/v1/bookings endpoint'lerini kullanın.",
                }),
            )
                .into_response(),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Sunucu hatası",
                    message: "Bir hata oluştu. Lütfen daha sonra tekrar deneyin.",
                }),
            )
                .into_response(),
        }
    }
}

pub async fn not_found(uri: Uri) -> ApiError {
    debug!("ルートが見つかりません: {}", uri);
    ApiError::NotFound
}

/// ハンドラ内のパニックを500に変換する
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Internal Server Error: {}", detail);
    ApiError::Internal.into_response()
}

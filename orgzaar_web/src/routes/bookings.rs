use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use orgzaar::domain::{booking, confirmation::BookingId};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct BookingAccepted {
    message: &'static str,
    booking_id: BookingId,
}

/// POST /api/v1/bookings
///
/// Content-Typeに関係なく本文をJSONとして読む。読めなければ `request_body` エラー
pub async fn create_booking(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<BookingAccepted>), ApiError> {
    let payload = serde_json::from_slice::<Value>(&body).ok();
    let booking = match booking::validate(payload.as_ref(), state.timezone.today()) {
        Ok(booking) => booking,
        Err(err) => {
            warn!(
                "POST /api/v1/bookings - Validasyon hatası: {}: {}",
                err.field(),
                err
            );
            return Err(err.into());
        }
    };
    let booking_id = state.ids.generate();
    info!(
        "POST /api/v1/bookings - Rezervasyon oluşturuldu: ID={}, Tarih={}, Hizmetler=[{}]",
        booking_id,
        booking.event_date(),
        booking
            .services()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok((
        StatusCode::CREATED,
        Json(BookingAccepted {
            message: "Rezervasyon talebiniz alındı.",
            booking_id,
        }),
    ))
}

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use orgzaar::domain::{
    calendar::ReferenceTimezone,
    confirmation::{BookingIdGenerator, RandomBookingIdGenerator},
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod error;
pub mod routes;

use routes::{bookings, index, services};

/// ハンドラ共通の状態
#[derive(Clone)]
pub struct AppState {
    timezone: ReferenceTimezone,
    ids: Arc<dyn BookingIdGenerator + Send + Sync>,
}

impl AppState {
    pub fn new(timezone: ReferenceTimezone) -> Self {
        Self::with_generator(timezone, RandomBookingIdGenerator)
    }

    pub fn with_generator<G>(timezone: ReferenceTimezone, ids: G) -> Self
    where
        G: BookingIdGenerator + Send + Sync + 'static,
    {
        Self {
            timezone,
            ids: Arc::new(ids),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::landing))
        .route("/api", get(index::api_info))
        .route("/api/v1/services", get(services::list_services))
        .route("/api/v1/bookings", post(bookings::create_booking))
        .layer(DefaultBodyLimit::disable())
        .fallback(error::not_found)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

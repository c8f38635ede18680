use axum::Json;
use orgzaar::domain::catalog::{self, Service};
use tracing::info;

/// GET /api/v1/services
pub async fn list_services() -> Json<&'static [Service]> {
    let services = catalog::list_services();
    info!("GET /api/v1/services - Toplam {} hizmet döndürüldü", services.len());
    Json(services)
}

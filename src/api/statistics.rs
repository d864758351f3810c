//! Statistics routes

use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;
use tracing::error;

use crate::core::statistics;
use crate::models::StatisticsSnapshot;
use crate::stores::CatalogStore;

async fn statistics_response(store: &dyn CatalogStore) -> HttpResponse {
    match statistics::snapshot(store).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            error!("Failed to compute statistics: {}", e);
            // keep the snapshot shape so clients can still render zeros
            let mut body = serde_json::to_value(StatisticsSnapshot::default())
                .unwrap_or_else(|_| json!({}));
            if let Some(map) = body.as_object_mut() {
                map.insert("error".to_string(), json!(e.to_string()));
            }
            HttpResponse::build(e.status_code()).json(body)
        }
    }
}

/// GET /statistics
#[get("")]
pub async fn get_statistics(store: web::Data<dyn CatalogStore>) -> impl Responder {
    statistics_response(store.get_ref()).await
}

/// GET /api/songs/stats/all
#[get("/stats/all")]
pub async fn get_statistics_upstream(store: web::Data<dyn CatalogStore>) -> impl Responder {
    statistics_response(store.get_ref()).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_statistics);
}

pub fn configure_upstream(cfg: &mut web::ServiceConfig) {
    cfg.service(get_statistics_upstream);
}

//! REST API routes for the catalog

pub mod songs;
pub mod statistics;

use actix_web::{error, web, HttpResponse};
use serde_json::json;

use crate::error::CatalogError;

/// Configure all API routes
///
/// Expects a `web::Data<dyn CatalogStore>` registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Statistics routes
        .service(web::scope("/statistics").configure(statistics::configure))
        // Song routes, plus statistics under the upstream path
        .service(
            web::scope("/api/songs")
                .configure(statistics::configure_upstream)
                .configure(songs::configure),
        );
}

/// Malformed JSON bodies answer 400 with the same `{ "error" }` shape as other failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({ "error": err.to_string() });
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Map a catalog error to its JSON response
pub(crate) fn error_response(err: &CatalogError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(json!({ "error": err.to_string() }))
}

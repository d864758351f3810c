//! Song CRUD routes

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use tracing::{info, warn};

use super::error_response;
use crate::models::{NewSong, SongPatch};
use crate::stores::CatalogStore;

/// Create a song
#[post("")]
pub async fn create_song(
    store: web::Data<dyn CatalogStore>,
    body: web::Json<NewSong>,
) -> impl Responder {
    let fields = match body.into_inner().validate() {
        Ok(fields) => fields,
        Err(e) => return error_response(&e),
    };

    match store.insert(fields).await {
        Ok(song) => {
            info!("Created song {} ({} - {})", song.id, song.artist, song.title);
            HttpResponse::Created().json(song)
        }
        Err(e) => {
            warn!("Failed to create song: {}", e);
            error_response(&e)
        }
    }
}

/// List every song
#[get("")]
pub async fn get_songs(store: web::Data<dyn CatalogStore>) -> impl Responder {
    match store.list_all().await {
        Ok(songs) => HttpResponse::Ok().json(songs),
        Err(e) => {
            warn!("Failed to list songs: {}", e);
            error_response(&e)
        }
    }
}

/// Get a song by id
#[get("/{id}")]
pub async fn get_song(store: web::Data<dyn CatalogStore>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match store.get(&id).await {
        Ok(Some(song)) => HttpResponse::Ok().json(song),
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Song not found" })),
        Err(e) => error_response(&e),
    }
}

/// Update the provided fields of a song
#[put("/{id}")]
pub async fn update_song(
    store: web::Data<dyn CatalogStore>,
    path: web::Path<String>,
    body: web::Json<SongPatch>,
) -> impl Responder {
    let id = path.into_inner();

    let changes = match body.into_inner().validate() {
        Ok(changes) => changes,
        Err(e) => return error_response(&e),
    };

    match store.update(&id, changes).await {
        Ok(Some(song)) => {
            info!("Updated song {}", song.id);
            HttpResponse::Ok().json(song)
        }
        Ok(None) => HttpResponse::NotFound().json(json!({ "error": "Song not found" })),
        Err(e) => {
            warn!("Failed to update song {}: {}", id, e);
            error_response(&e)
        }
    }
}

/// Delete a song; unknown ids are not an error
#[delete("/{id}")]
pub async fn delete_song(
    store: web::Data<dyn CatalogStore>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();

    match store.delete(&id).await {
        Ok(removed) => {
            if removed {
                info!("Deleted song {}", id);
            }
            HttpResponse::Ok().json(json!({ "message": "Song deleted" }))
        }
        Err(e) => {
            warn!("Failed to delete song {}: {}", id, e);
            error_response(&e)
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_songs)
        .service(create_song)
        .service(get_song)
        .service(update_song)
        .service(delete_song);
}

//! REST API for flatvec.
//!
//! Provides a stateless HTTP server with JSON endpoints for index
//! operations. Each request includes an `index` field specifying the
//! index file path. The server loads the index from disk per request
//! and saves after mutations.
//!
//! ## Endpoints
//!
//! - `POST /create` - Create a new empty index file
//! - `POST /add` - Add a batch of vectors
//! - `POST /search` - Run k-nearest-neighbor queries
//! - `POST /info` - Report dimension, count, and trained state
//! - `POST /reset` - Remove every stored vector
//!
//! ## Usage
//!
//! ```rust,no_run
//! use actix_web::{App, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     HttpServer::new(|| App::new().configure(flatvec::server::config))
//!         .bind("0.0.0.0:7878")?
//!         .run()
//!         .await
//! }
//! ```

use actix_web::{web, HttpResponse, Responder};
use serde::{Serialize, Deserialize};
use crate::{FlatIndex, Neighbor};


// --- Request structs ---

#[derive(Deserialize)]
struct CreateRequest {
    index: String,
    dimension: usize,
}

#[derive(Deserialize)]
struct AddRequest {
    index: String,
    vectors: Vec<Vec<f32>>,
}

#[derive(Deserialize)]
struct SearchRequest {
    index: String,
    queries: Vec<Vec<f32>>,
    k: usize,
}

#[derive(Deserialize)]
struct InfoRequest {
    index: String,
}

#[derive(Deserialize)]
struct ResetRequest {
    index: String,
}

// --- Response structs ---

#[derive(Serialize)]
struct CreateResponse {
    dimension: usize,
    ntotal: usize,
}

#[derive(Serialize)]
struct AddResponse {
    added: usize,
    ntotal: usize,
}

#[derive(Serialize)]
struct SearchResponse {
    results: Vec<Vec<Neighbor>>,
}

#[derive(Serialize)]
struct InfoResponse {
    dimension: usize,
    ntotal: usize,
    is_trained: bool,
}

#[derive(Serialize)]
struct ResetResponse {
    ntotal: usize,
}


// --- Handlers ---

async fn create_handler(body: web::Json<CreateRequest>) -> impl Responder {
    let index = match FlatIndex::new(body.dimension) {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({"error": e.to_string()}))
        }
    };

    if let Err(e) = index.save(&body.index) {
        return HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": e.to_string()}));
    }

    HttpResponse::Ok().json(CreateResponse {
        dimension: index.dim(),
        ntotal: index.ntotal(),
    })
}

async fn add_handler(body: web::Json<AddRequest>) -> impl Responder {
    let mut index = match FlatIndex::load(&body.index) {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}))
        }
    };

    if let Err(e) = index.add(&body.vectors) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({"error": e.to_string()}));
    }

    if let Err(e) = index.save(&body.index) {
        return HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": e.to_string()}));
    }

    HttpResponse::Ok().json(AddResponse {
        added: body.vectors.len(),
        ntotal: index.ntotal(),
    })
}

async fn search_handler(body: web::Json<SearchRequest>) -> impl Responder {
    let index = match FlatIndex::load(&body.index) {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}))
        }
    };

    match index.search(&body.queries, body.k) {
        Ok(results) => HttpResponse::Ok().json(SearchResponse { results }),
        Err(e) => HttpResponse::BadRequest()
            .json(serde_json::json!({"error": e.to_string()})),
    }
}

async fn info_handler(body: web::Json<InfoRequest>) -> impl Responder {
    let index = match FlatIndex::load(&body.index) {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}))
        }
    };

    HttpResponse::Ok().json(InfoResponse {
        dimension: index.dim(),
        ntotal: index.ntotal(),
        is_trained: index.is_trained(),
    })
}

async fn reset_handler(body: web::Json<ResetRequest>) -> impl Responder {
    let mut index = match FlatIndex::load(&body.index) {
        Ok(index) => index,
        Err(e) => {
            return HttpResponse::InternalServerError()
                .json(serde_json::json!({"error": e.to_string()}))
        }
    };

    index.reset();

    if let Err(e) = index.save(&body.index) {
        return HttpResponse::InternalServerError()
            .json(serde_json::json!({"error": e.to_string()}));
    }

    HttpResponse::Ok().json(ResetResponse { ntotal: index.ntotal() })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create").route(web::post().to(create_handler)))
       .service(web::resource("/add").route(web::post().to(add_handler)))
       .service(web::resource("/search").route(web::post().to(search_handler)))
       .service(web::resource("/info").route(web::post().to(info_handler)))
       .service(web::resource("/reset").route(web::post().to(reset_handler)));
}

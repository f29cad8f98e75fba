use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use placesim_core::{Error, KNOWN_ATTRIBUTES};
use placesim_similarity::{MultiRequest, SimilarityEngine, SingleRequest};
use std::sync::Arc;
use tracing::{error, warn};

pub struct RestApi;

impl RestApi {
    pub async fn start(
        engine: Arc<SimilarityEngine>,
        host: &str,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(Self::configure)
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register routes and the JSON body error handler. Expects a
    /// `web::Data<Arc<SimilarityEngine>>` in app data.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let body = serde_json::json!({ "error": err.to_string() });
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        }))
        .route("/health", web::get().to(health))
        .service(
            web::scope("/api/similar")
                .route("/supported", web::get().to(common_attributes))
                .route("/supported/{place_type}", web::get().to(supported_attributes))
                .route("/attributes", web::get().to(known_attributes))
                .route("/single", web::post().to(similar_single))
                .route("/multi", web::post().to(similar_multi)),
        );
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

async fn common_attributes(
    engine: web::Data<Arc<SimilarityEngine>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(engine.list_common_attributes()))
}

async fn supported_attributes(
    engine: web::Data<Arc<SimilarityEngine>>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match engine.list_supported_attributes(path.into_inner()) {
        Ok(attributes) => Ok(HttpResponse::Ok().json(attributes)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn known_attributes() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(KNOWN_ATTRIBUTES))
}

async fn similar_single(
    engine: web::Data<Arc<SimilarityEngine>>,
    req: web::Json<SingleRequest>,
) -> ActixResult<HttpResponse> {
    let engine = engine.get_ref().clone();
    let request = req.into_inner();
    let result = web::block(move || engine.explain_single(&request)).await?;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn similar_multi(
    engine: web::Data<Arc<SimilarityEngine>>,
    req: web::Json<MultiRequest>,
) -> ActixResult<HttpResponse> {
    let engine = engine.get_ref().clone();
    let request = req.into_inner();
    let result = web::block(move || engine.explain_multi(&request)).await?;

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(error_response(&e)),
    }
}

fn error_response(err: &Error) -> HttpResponse {
    match err {
        Error::Validation(fields) => HttpResponse::BadRequest().json(fields),
        Error::UnknownEntityType(_) => HttpResponse::BadRequest().json(serde_json::json!({
            "error": err.to_string()
        })),
        Error::NoCandidates | Error::ReferenceUnavailable { .. } => {
            warn!("similarity query without result: {}", err);
            HttpResponse::NotFound().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
        _ => {
            error!("similarity query failed: {}", err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": err.to_string()
            }))
        }
    }
}

use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use log::{error, info, warn};
use serde::Serialize;
use shared::api::CLASSIFY_ENDPOINT;
use shared::ErrorBody;
use uuid::Uuid;

use crate::classify::{read_upload, ClassificationError, ClassificationErrorKind, ClassifierClient};

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'a str,
    ml_service_url: &'a str,
    ml_service_reachable: bool,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(CLASSIFY_ENDPOINT)
            .route(web::post().to(handle_classify))
            .default_service(web::to(method_not_allowed)),
    )
    .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_classify(
    req: HttpRequest,
    payload: Multipart,
    classifier: web::Data<ClassifierClient>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let result = if is_multipart {
        match read_upload(payload).await {
            Ok(candidate) => {
                if let Some(candidate) = &candidate {
                    info!(
                        "[{}] Classifying {:?} ({}, {} bytes)",
                        request_id,
                        candidate.file_name,
                        candidate.mime_type,
                        candidate.bytes.len()
                    );
                }
                classifier.classify(candidate).await
            }
            Err(e) => Err(e),
        }
    } else {
        Err(ClassificationError::no_file())
    };

    match result {
        Ok(response) => {
            info!(
                "[{}] Prediction: {} ({} risk, {:.1}%)",
                request_id,
                response.prediction.display_name,
                response.prediction.risk,
                response.prediction.confidence_percent()
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            match e.kind {
                ClassificationErrorKind::NoFile
                | ClassificationErrorKind::InvalidType
                | ClassificationErrorKind::FileTooLarge => {
                    warn!("[{}] Rejected upload: {}", request_id, e)
                }
                _ => error!("[{}] Error in classification endpoint: {}", request_id, e),
            }
            e.error_response()
        }
    }
}

async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody::new("Method not allowed"))
}

async fn health(classifier: web::Data<ClassifierClient>) -> HttpResponse {
    let reachable = classifier.probe().await;
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        ml_service_url: classifier.base_url(),
        ml_service_reachable: reachable,
    })
}

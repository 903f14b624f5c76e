//! Simulated inference service for handler and client tests.

use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use futures::{StreamExt, TryStreamExt};

pub const PREDICTION_JSON: &str = r#"{
    "prediction": {
        "class_id": 4,
        "class_name": "mel",
        "display_name": "Melanoma",
        "risk": "Very High",
        "description": "A serious form of skin cancer that can spread if not treated early.",
        "recommendation": "Seek immediate medical attention.",
        "confidence": 0.6666667
    },
    "model_predictions": {
        "mobilenetv3": {"class_id": 4, "class_name": "mel", "confidence": 0.81}
    },
    "class_probabilities": {"mel": 0.5, "nv": 0.25, "bkl": 0.25}
}"#;

#[derive(Debug, Clone)]
pub struct ReceivedField {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

pub struct Upstream {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<ReceivedField>>>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<ReceivedField> {
        self.received.lock().unwrap().clone()
    }
}

/// Starts a server on a random local port whose `/predict` answers every
/// request with `status` and `body`, recording the multipart fields it saw.
pub async fn spawn_upstream(status: u16, body: &'static str) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let server_hits = hits.clone();
    let server_received = received.clone();
    let server = HttpServer::new(move || {
        let hits = server_hits.clone();
        let received = server_received.clone();
        App::new()
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().json(serde_json::json!({"status": "ok"})) }),
            )
            .route(
                "/predict",
                web::post().to(move |mut payload: Multipart| {
                    let hits = hits.clone();
                    let received = received.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        while let Ok(Some(mut field)) = payload.try_next().await {
                            let disposition = field.content_disposition().cloned();
                            let mut len = 0;
                            while let Some(Ok(chunk)) = field.next().await {
                                len += chunk.len();
                            }
                            received.lock().unwrap().push(ReceivedField {
                                field: disposition
                                    .as_ref()
                                    .and_then(|cd| cd.get_name())
                                    .unwrap_or_default()
                                    .to_string(),
                                file_name: disposition
                                    .as_ref()
                                    .and_then(|cd| cd.get_filename())
                                    .map(str::to_string),
                                content_type: field.content_type().map(|m| m.to_string()),
                                len,
                            });
                        }
                        HttpResponse::build(StatusCode::from_u16(status).unwrap())
                            .content_type("application/json")
                            .body(body)
                    }
                }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    Upstream {
        base_url: format!("http://{}", addr),
        hits,
        received,
    }
}

/// Starts a server whose `/predict` takes `delay` before answering.
pub async fn spawn_slow_upstream(delay: Duration) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let server_hits = hits.clone();
    let server = HttpServer::new(move || {
        let hits = server_hits.clone();
        App::new().route(
            "/predict",
            web::post().to(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    actix_web::rt::time::sleep(delay).await;
                    HttpResponse::Ok()
                        .content_type("application/json")
                        .body(PREDICTION_JSON)
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    Upstream {
        base_url: format!("http://{}", addr),
        hits,
        received: Arc::new(Mutex::new(Vec::new())),
    }
}

/// Address of a local port with nothing listening on it.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Builds a single-part multipart body, returning the content type header
/// value and the encoded bytes.
pub fn multipart_body(field: &str, file_name: &str, mime_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "----skin-check-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

/// Builds a multipart body with one plain form value and no filename.
pub fn multipart_text_field(field: &str, value: &str) -> (String, Vec<u8>) {
    let boundary = "----skin-check-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{b}--\r\n",
        b = boundary,
        field = field,
        value = value
    );
    (
        format!("multipart/form-data; boundary={}", boundary),
        body.into_bytes(),
    )
}

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use shared::api::UPLOAD_FIELD;
use shared::{ClassifyResponse, UploadCandidate, UploadedImage};

use super::error::ClassificationError;

/// Relays uploads to the inference service's `/predict` route.
#[derive(Clone)]
pub struct ClassifierClient {
    http_client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl ClassifierClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url)
    }

    /// Validates the upload, forwards it, and normalizes whatever comes back.
    /// Presence and type are checked before any network traffic.
    pub async fn classify(
        &self,
        candidate: Option<UploadCandidate>,
    ) -> Result<ClassifyResponse, ClassificationError> {
        let candidate = candidate.ok_or_else(ClassificationError::no_file)?;
        let image = UploadedImage::try_from(candidate)?;

        let file_name = image.file_name().to_string();
        let mime_type = image.mime_type().to_string();
        debug!(
            "Forwarding {:?} ({}, {} bytes) to {}",
            file_name,
            mime_type,
            image.bytes().len(),
            self.predict_url()
        );
        let part = Part::bytes(image.into_bytes())
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(|_| ClassificationError::invalid_type(&mime_type))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http_client
            .post(self.predict_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("ML service error ({}): {}", status, error_text);
            return Err(ClassificationError::service_error(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.transport_error(e))?;
        parse_prediction(&body)
    }

    /// Whether the inference service answers its health route.
    pub async fn probe(&self) -> bool {
        match self.http_client.get(format!("{}/", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("ML service health probe failed: {}", e);
                false
            }
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> ClassificationError {
        if err.is_timeout() {
            ClassificationError::service_unavailable(format!(
                "ML service did not answer within {}s",
                self.timeout.as_secs()
            ))
        } else {
            ClassificationError::service_unavailable(format!("Could not reach ML service: {}", err))
        }
    }
}

/// Parses a 2xx body from the inference service.
pub fn parse_prediction(body: &str) -> Result<ClassifyResponse, ClassificationError> {
    let response: ClassifyResponse = serde_json::from_str(body).map_err(|e| {
        error!("Malformed ML service response: {}", e);
        ClassificationError::unknown(format!("Malformed ML service response: {}", e))
    })?;
    if !response.prediction.has_valid_confidence() {
        return Err(ClassificationError::unknown(format!(
            "Malformed ML service response: confidence {} is outside [0, 1]",
            response.prediction.confidence
        )));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::error::ClassificationErrorKind;
    use crate::test_support::{closed_port_url, spawn_slow_upstream, spawn_upstream, PREDICTION_JSON};

    fn client(base_url: &str) -> ClassifierClient {
        ClassifierClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn png() -> UploadCandidate {
        UploadCandidate {
            file_name: "mole.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[actix_web::test]
    async fn missing_file_never_reaches_upstream() {
        let upstream = spawn_upstream(200, PREDICTION_JSON).await;
        let err = client(&upstream.base_url).classify(None).await.unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::NoFile);
        assert_eq!(err.http_status, 400);
        assert_eq!(upstream.hits(), 0);
    }

    #[actix_web::test]
    async fn non_image_never_reaches_upstream() {
        let upstream = spawn_upstream(200, PREDICTION_JSON).await;
        let mut candidate = png();
        candidate.mime_type = "application/pdf".to_string();
        let err = client(&upstream.base_url)
            .classify(Some(candidate))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::InvalidType);
        assert_eq!(upstream.hits(), 0);
    }

    #[actix_web::test]
    async fn forwards_file_with_name_and_type() {
        let upstream = spawn_upstream(200, PREDICTION_JSON).await;
        let response = client(&upstream.base_url).classify(Some(png())).await.unwrap();
        assert_eq!(response.prediction.display_name, "Melanoma");
        assert_eq!(upstream.hits(), 1);

        let received = upstream.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].field, "file");
        assert_eq!(received[0].file_name.as_deref(), Some("mole.png"));
        assert_eq!(received[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(received[0].len, 4);
    }

    #[actix_web::test]
    async fn upstream_503_is_a_service_error() {
        let upstream = spawn_upstream(503, r#"{"detail":"No models are loaded"}"#).await;
        let err = client(&upstream.base_url).classify(Some(png())).await.unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::ServiceError);
        assert_eq!(err.http_status, 503);
        assert_eq!(err.message, "Service returned 503");
    }

    #[actix_web::test]
    async fn malformed_success_body_is_unknown() {
        let upstream = spawn_upstream(200, "{\"prediction\": ").await;
        let err = client(&upstream.base_url).classify(Some(png())).await.unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::Unknown);
        assert_eq!(err.http_status, 500);
        assert!(err.message.starts_with("Malformed ML service response"), "{}", err.message);
        assert!(err.message.contains("EOF"), "{}", err.message);
    }

    #[actix_web::test]
    async fn unreachable_service_is_unavailable() {
        let err = client(&closed_port_url()).classify(Some(png())).await.unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::ServiceUnavailable);
        assert!(err.message.starts_with("Could not reach ML service"), "{}", err.message);
    }

    #[actix_web::test]
    async fn slow_service_times_out_as_unavailable() {
        let upstream = spawn_slow_upstream(Duration::from_secs(3)).await;
        let client = ClassifierClient::new(&upstream.base_url, Duration::from_secs(1)).unwrap();
        let err = client.classify(Some(png())).await.unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::ServiceUnavailable);
        assert_eq!(err.http_status, 500);
        assert_eq!(err.message, "ML service did not answer within 1s");
        assert_eq!(upstream.hits(), 1);
    }

    #[actix_web::test]
    async fn probe_reports_reachability() {
        let upstream = spawn_upstream(200, PREDICTION_JSON).await;
        assert!(client(&upstream.base_url).probe().await);
        assert!(!client(&closed_port_url()).probe().await);
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let body = PREDICTION_JSON.replace("0.6666667", "1.5");
        let err = parse_prediction(&body).unwrap_err();
        assert_eq!(err.kind, ClassificationErrorKind::Unknown);
        assert!(err.message.contains("outside [0, 1]"));
    }

    #[test]
    fn predict_url_ignores_trailing_slash() {
        assert_eq!(client("http://ml:8000/").predict_url(), "http://ml:8000/predict");
    }
}

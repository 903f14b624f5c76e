use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::{ErrorBody, UploadError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationErrorKind {
    NoFile,
    InvalidType,
    FileTooLarge,
    ServiceUnavailable,
    ServiceError,
    Unknown,
}

/// Everything that can go wrong between receiving an upload and returning a
/// prediction. Each value knows the status and body the client sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?} ({http_status}): {message}")]
pub struct ClassificationError {
    pub http_status: u16,
    pub kind: ClassificationErrorKind,
    pub message: String,
}

impl ClassificationError {
    pub fn no_file() -> Self {
        Self {
            http_status: 400,
            kind: ClassificationErrorKind::NoFile,
            message: "No file uploaded".to_string(),
        }
    }

    pub fn invalid_type(mime_type: &str) -> Self {
        Self {
            http_status: 400,
            kind: ClassificationErrorKind::InvalidType,
            message: format!("Declared type {:?} is not an image", mime_type),
        }
    }

    pub fn file_too_large() -> Self {
        Self {
            http_status: 500,
            kind: ClassificationErrorKind::FileTooLarge,
            message: "File too large".to_string(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self {
            http_status: 500,
            kind: ClassificationErrorKind::ServiceUnavailable,
            message: message.into(),
        }
    }

    /// The upstream answered with a non-2xx status, which is passed through.
    pub fn service_error(status: u16) -> Self {
        Self {
            http_status: status,
            kind: ClassificationErrorKind::ServiceError,
            message: format!("Service returned {}", status),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            http_status: 500,
            kind: ClassificationErrorKind::Unknown,
            message: message.into(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self.kind {
            ClassificationErrorKind::NoFile => ErrorBody::new("No file uploaded"),
            ClassificationErrorKind::InvalidType => ErrorBody::new("Uploaded file must be an image"),
            ClassificationErrorKind::FileTooLarge => {
                ErrorBody::with_message("Server error", self.message.clone())
            }
            ClassificationErrorKind::ServiceError => {
                ErrorBody::with_message("ML service error", self.message.clone())
            }
            ClassificationErrorKind::ServiceUnavailable => {
                ErrorBody::with_message("ML service unavailable", self.message.clone())
            }
            ClassificationErrorKind::Unknown => {
                ErrorBody::with_message("Error processing image", self.message.clone())
            }
        }
    }
}

impl From<UploadError> for ClassificationError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidType { mime_type } => ClassificationError::invalid_type(&mime_type),
            UploadError::TooLarge { .. } => ClassificationError::file_too_large(),
        }
    }
}

impl ResponseError for ClassificationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_match_the_public_contract() {
        assert_eq!(
            serde_json::to_value(ClassificationError::no_file().body()).unwrap(),
            serde_json::json!({"error": "No file uploaded"})
        );
        assert_eq!(
            serde_json::to_value(ClassificationError::invalid_type("text/plain").body()).unwrap(),
            serde_json::json!({"error": "Uploaded file must be an image"})
        );
        assert_eq!(
            serde_json::to_value(ClassificationError::service_error(502).body()).unwrap(),
            serde_json::json!({"error": "ML service error", "message": "Service returned 502"})
        );
        assert_eq!(
            serde_json::to_value(ClassificationError::file_too_large().body()).unwrap(),
            serde_json::json!({"error": "Server error", "message": "File too large"})
        );
    }

    #[test]
    fn upstream_status_is_kept() {
        let err = ClassificationError::service_error(503);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.kind, ClassificationErrorKind::ServiceError);
    }

    #[test]
    fn nonsense_status_falls_back_to_500() {
        let err = ClassificationError {
            http_status: 42,
            kind: ClassificationErrorKind::ServiceError,
            message: String::new(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upload_errors_map_to_kinds() {
        let err: ClassificationError = UploadError::TooLarge { size: 1 }.into();
        assert_eq!(err.kind, ClassificationErrorKind::FileTooLarge);
        let err: ClassificationError = UploadError::InvalidType {
            mime_type: "text/csv".into(),
        }
        .into();
        assert_eq!(err.kind, ClassificationErrorKind::InvalidType);
        assert_eq!(err.http_status, 400);
    }
}

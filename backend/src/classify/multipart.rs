use actix_multipart::Multipart;
use futures::{StreamExt, TryStreamExt};
use log::{debug, warn};
use shared::api::UPLOAD_FIELD;
use shared::{UploadCandidate, MAX_UPLOAD_BYTES};

use super::error::ClassificationError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Pulls the `file` field out of a multipart body into memory. Other fields
/// are drained and ignored. The size limit is enforced while streaming so an
/// oversized upload is never fully buffered.
pub async fn read_upload(
    mut payload: Multipart,
) -> Result<Option<UploadCandidate>, ClassificationError> {
    let mut upload = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ClassificationError::unknown(format!("Invalid multipart payload: {}", e)))?
    {
        let disposition = field.content_disposition().cloned();
        let name = disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        let file_name = disposition
            .as_ref()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        // A `file` part without a filename is a plain form value, not an upload.
        let wanted = name == UPLOAD_FIELD && upload.is_none();
        let Some(file_name) = file_name.filter(|_| wanted) else {
            debug!("Skipping multipart field {:?}", name);
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| {
                    ClassificationError::unknown(format!("Invalid multipart payload: {}", e))
                })?;
            }
            continue;
        };

        let mime_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| {
                ClassificationError::unknown(format!("Invalid multipart payload: {}", e))
            })?;
            if (bytes.len() + data.len()) as u64 > MAX_UPLOAD_BYTES {
                warn!("Rejecting upload {:?}: over {} bytes", file_name, MAX_UPLOAD_BYTES);
                return Err(ClassificationError::file_too_large());
            }
            bytes.extend_from_slice(&data);
        }

        upload = Some(UploadCandidate {
            file_name,
            mime_type,
            bytes,
        });
    }

    Ok(upload)
}

use std::fmt;

/// Hard limit on the size of an uploaded image, 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Please upload an image file")]
    InvalidType { mime_type: String },
    #[error("Image is too large ({size} bytes); the limit is 5 MB")]
    TooLarge { size: u64 },
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

pub fn check_candidate(mime_type: &str, size: u64) -> Result<(), UploadError> {
    if !is_image_mime(mime_type) {
        return Err(UploadError::InvalidType {
            mime_type: mime_type.to_string(),
        });
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { size });
    }
    Ok(())
}

/// Anything the user can pick as the photo: a browser file handle on the
/// client, raw multipart bytes on the server.
pub trait ImageSource {
    fn file_name(&self) -> String;
    fn mime_type(&self) -> String;
    fn byte_len(&self) -> u64;

    fn check(&self) -> Result<(), UploadError> {
        check_candidate(&self.mime_type(), self.byte_len())
    }
}

/// A file as it arrived, before any checks.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageSource for UploadCandidate {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// An image that passed the type and size checks.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl TryFrom<UploadCandidate> for UploadedImage {
    type Error = UploadError;

    fn try_from(candidate: UploadCandidate) -> Result<Self, Self::Error> {
        candidate.check()?;
        Ok(Self {
            file_name: candidate.file_name,
            mime_type: candidate.mime_type,
            bytes: candidate.bytes,
        })
    }
}

impl UploadedImage {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Holds the one picked image and its preview handle. `P` is whatever keeps
/// a preview alive (an object URL in the browser); dropping it releases it.
pub struct UploadSlot<S, P> {
    current: Option<(S, P)>,
}

impl<S, P> Default for UploadSlot<S, P> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<S: ImageSource, P> UploadSlot<S, P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `source` and, if it passes, replaces the held image. The old
    /// preview is released before `make_preview` runs, so at most one is
    /// alive at a time. A rejected source leaves the slot untouched.
    pub fn accept<F>(&mut self, source: S, make_preview: F) -> Result<(), UploadError>
    where
        F: FnOnce(&S) -> P,
    {
        source.check()?;
        drop(self.current.take());
        let preview = make_preview(&source);
        self.current = Some((source, preview));
        Ok(())
    }

    pub fn image(&self) -> Option<&S> {
        self.current.as_ref().map(|(source, _)| source)
    }

    pub fn preview(&self) -> Option<&P> {
        self.current.as_ref().map(|(_, preview)| preview)
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn candidate(mime_type: &str, len: usize) -> UploadCandidate {
        UploadCandidate {
            file_name: "lesion.jpg".to_string(),
            mime_type: mime_type.to_string(),
            bytes: vec![0u8; len],
        }
    }

    #[test]
    fn rejects_non_images() {
        let err = UploadedImage::try_from(candidate("application/pdf", 10)).unwrap_err();
        assert_eq!(
            err,
            UploadError::InvalidType {
                mime_type: "application/pdf".to_string()
            }
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        let max = MAX_UPLOAD_BYTES as usize;
        assert!(UploadedImage::try_from(candidate("image/png", max)).is_ok());
        assert_eq!(
            UploadedImage::try_from(candidate("image/png", max + 1)).unwrap_err(),
            UploadError::TooLarge {
                size: MAX_UPLOAD_BYTES + 1
            }
        );
    }

    #[test]
    fn accepted_image_keeps_metadata() {
        let image = UploadedImage::try_from(candidate("image/jpeg", 3)).unwrap();
        assert_eq!(image.file_name(), "lesion.jpg");
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.bytes().len(), 3);
        assert_eq!(image.into_bytes(), vec![0, 0, 0]);
    }

    #[test]
    fn repeated_accept_keeps_one_live_preview() {
        let tracker = Rc::new(());
        let mut slot: UploadSlot<UploadCandidate, Rc<()>> = UploadSlot::new();

        for round in 0..5 {
            slot.accept(candidate("image/png", round + 1), |_| {
                // the previous preview must already be gone here
                assert_eq!(Rc::strong_count(&tracker), 1);
                Rc::clone(&tracker)
            })
            .unwrap();
            assert_eq!(Rc::strong_count(&tracker), 2);
        }
        assert_eq!(slot.image().unwrap().bytes.len(), 5);

        slot.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
        assert!(!slot.has_image());
    }

    #[test]
    fn rejected_accept_keeps_previous_image() {
        let mut slot: UploadSlot<UploadCandidate, &'static str> = UploadSlot::new();
        slot.accept(candidate("image/png", 4), |_| "preview-1").unwrap();

        let err = slot.accept(candidate("text/plain", 4), |_| "preview-2");
        assert!(matches!(err, Err(UploadError::InvalidType { .. })));
        assert_eq!(slot.preview(), Some(&"preview-1"));
        assert_eq!(slot.image().unwrap().mime_type, "image/png");
    }
}

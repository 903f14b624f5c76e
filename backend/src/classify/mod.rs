pub mod client;
pub mod error;
pub mod multipart;

pub use client::ClassifierClient;
pub use error::{ClassificationError, ClassificationErrorKind};
pub use multipart::read_upload;

pub mod api;
pub mod profile;
pub mod session;
pub mod upload;
pub mod validation;
pub mod wizard;

pub use api::{ClassifyResponse, ErrorBody, ModelVote, Prediction, Risk};
pub use profile::{ProfileField, ProfileForm};
pub use session::{IntakeSession, RequestTicket, SubmitError};
pub use upload::{ImageSource, UploadCandidate, UploadError, UploadSlot, UploadedImage, MAX_UPLOAD_BYTES};
pub use wizard::{AutoAdvanceToken, Screen, TransitionError, Wizard, AUTO_ADVANCE_DELAY_MS, TOTAL_SCREENS};

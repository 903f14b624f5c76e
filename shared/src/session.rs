//! One user's pass through the intake screens.
//!
//! The session owns the wizard, the profile, the picked image and the latest
//! result. All methods run to completion on the event that triggered them;
//! the only thing left pending between events is the classification request,
//! tracked by a [`RequestTicket`].

use uuid::Uuid;

use crate::api::ClassifyResponse;
use crate::profile::{ProfileField, ProfileForm};
use crate::upload::{ImageSource, UploadError, UploadSlot};
use crate::wizard::{AutoAdvanceToken, Screen, TransitionError, Wizard};

/// Identifies the single outstanding classification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct RequestTicket(Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please select an image first")]
    NoImage,
    #[error("An analysis is already running")]
    AlreadyInFlight,
    #[error("Images can only be submitted from the picture screen")]
    WrongScreen,
}

pub struct IntakeSession<S, P> {
    wizard: Wizard,
    profile: ProfileForm,
    upload: UploadSlot<S, P>,
    upload_error: Option<UploadError>,
    pending: Option<RequestTicket>,
    result: Option<ClassifyResponse>,
    banner: Option<String>,
}

impl<S: ImageSource, P> Default for IntakeSession<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ImageSource, P> IntakeSession<S, P> {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            profile: ProfileForm::new(),
            upload: UploadSlot::new(),
            upload_error: None,
            pending: None,
            result: None,
            banner: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.wizard.screen()
    }

    pub fn profile(&self) -> &ProfileForm {
        &self.profile
    }

    pub fn image(&self) -> Option<&S> {
        self.upload.image()
    }

    pub fn preview(&self) -> Option<&P> {
        self.upload.preview()
    }

    pub fn upload_error(&self) -> Option<&UploadError> {
        self.upload_error.as_ref()
    }

    pub fn result(&self) -> Option<&ClassifyResponse> {
        self.result.as_ref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_go_next(&self) -> bool {
        self.wizard.can_go_next(&self.profile)
    }

    pub fn can_go_prev(&self) -> bool {
        self.wizard.can_go_prev()
    }

    pub fn can_submit(&self) -> bool {
        self.screen() == Screen::PictureInstructions && self.upload.has_image() && !self.is_in_flight()
    }

    pub fn auto_advance_token(&self) -> Option<AutoAdvanceToken> {
        self.wizard.armed_auto_advance()
    }

    /// Keystroke on the profile screen. Ignored on every other screen.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) -> bool {
        if self.screen() != Screen::Profile {
            return false;
        }
        self.profile.set_value(field, value);
        true
    }

    pub fn next(&mut self) -> Result<Screen, TransitionError> {
        let screen = self.wizard.next(&self.profile)?;
        self.after_transition();
        Ok(screen)
    }

    pub fn prev(&mut self) -> Result<Screen, TransitionError> {
        let screen = self.wizard.prev()?;
        self.after_transition();
        Ok(screen)
    }

    /// `next` for a click made while `origin` was showing. A click that is
    /// delivered after the screen changed under it does nothing.
    pub fn next_from(&mut self, origin: Screen) -> Result<Screen, TransitionError> {
        self.ensure_on(origin)?;
        self.next()
    }

    pub fn prev_from(&mut self, origin: Screen) -> Result<Screen, TransitionError> {
        self.ensure_on(origin)?;
        self.prev()
    }

    pub fn fire_auto_advance(&mut self, token: AutoAdvanceToken) -> bool {
        let moved = self.wizard.fire_auto_advance(token);
        if moved {
            self.after_transition();
        }
        moved
    }

    /// Replaces the picked image. A new image makes any earlier result stale.
    pub fn accept_image<F>(&mut self, source: S, make_preview: F) -> Result<(), UploadError>
    where
        F: FnOnce(&S) -> P,
    {
        match self.upload.accept(source, make_preview) {
            Ok(()) => {
                self.upload_error = None;
                self.banner = None;
                self.result = None;
                Ok(())
            }
            Err(err) => {
                self.upload_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Back to the pre-upload state; the current screen does not change.
    pub fn reset_upload(&mut self) {
        self.upload.clear();
        self.upload_error = None;
        self.result = None;
        self.banner = None;
        self.pending = None;
    }

    /// Moves to the loading screen and hands out the ticket the eventual
    /// response must present.
    pub fn begin_classification(&mut self) -> Result<RequestTicket, SubmitError> {
        if self.pending.is_some() {
            return Err(SubmitError::AlreadyInFlight);
        }
        if !self.upload.has_image() {
            return Err(SubmitError::NoImage);
        }
        if self.screen() != Screen::PictureInstructions {
            return Err(SubmitError::WrongScreen);
        }
        self.wizard
            .next(&self.profile)
            .map_err(|_| SubmitError::WrongScreen)?;
        let ticket = RequestTicket(Uuid::new_v4());
        self.pending = Some(ticket);
        self.banner = None;
        self.result = None;
        Ok(ticket)
    }

    /// Applies a finished request. Returns `false` when the response is
    /// stale, i.e. the user left the loading screen or reset the upload.
    pub fn complete_classification(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ClassifyResponse, String>,
    ) -> bool {
        if self.pending != Some(ticket) || self.screen() != Screen::Loading {
            log::debug!("Discarding response for stale request {}", ticket);
            return false;
        }
        self.pending = None;
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                if let Err(e) = self.wizard.next(&self.profile) {
                    log::warn!("Could not show results: {}", e);
                }
            }
            Err(message) => {
                self.banner = Some(message);
                if let Err(e) = self.wizard.prev() {
                    log::warn!("Could not return to the picture screen: {}", e);
                }
            }
        }
        true
    }

    /// Releases the welcome timer and any outstanding request on teardown.
    pub fn shutdown(&mut self) {
        self.wizard.disarm();
        self.pending = None;
    }

    fn ensure_on(&self, origin: Screen) -> Result<(), TransitionError> {
        let current = self.screen();
        if current == origin {
            Ok(())
        } else {
            Err(TransitionError::ScreenChanged {
                clicked: origin,
                current,
            })
        }
    }

    fn after_transition(&mut self) {
        if self.screen() != Screen::Loading {
            self.pending = None;
        }
    }
}

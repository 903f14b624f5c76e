use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::profile::ProfileForm;

pub const TOTAL_SCREENS: usize = 7;

/// Delay before the welcome screen moves on by itself.
pub const AUTO_ADVANCE_DELAY_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Screen {
    Welcome,
    Begin,
    Profile,
    DataInfo,
    PictureInstructions,
    Loading,
    Results,
}

impl Screen {
    pub fn index(self) -> usize {
        match self {
            Screen::Welcome => 0,
            Screen::Begin => 1,
            Screen::Profile => 2,
            Screen::DataInfo => 3,
            Screen::PictureInstructions => 4,
            Screen::Loading => 5,
            Screen::Results => 6,
        }
    }

    /// Forward edge of the transition table.
    pub fn next(self) -> Option<Screen> {
        match self {
            Screen::Welcome => Some(Screen::Begin),
            Screen::Begin => Some(Screen::Profile),
            Screen::Profile => Some(Screen::DataInfo),
            Screen::DataInfo => Some(Screen::PictureInstructions),
            Screen::PictureInstructions => Some(Screen::Loading),
            Screen::Loading => Some(Screen::Results),
            Screen::Results => None,
        }
    }

    /// Backward edge of the transition table.
    pub fn prev(self) -> Option<Screen> {
        match self {
            Screen::Welcome => None,
            Screen::Begin => Some(Screen::Welcome),
            Screen::Profile => Some(Screen::Begin),
            Screen::DataInfo => Some(Screen::Profile),
            Screen::PictureInstructions => Some(Screen::DataInfo),
            Screen::Loading => Some(Screen::PictureInstructions),
            Screen::Results => Some(Screen::Loading),
        }
    }

    /// Leaving this screen forward requires a complete profile.
    pub fn requires_complete_profile(self) -> bool {
        matches!(self, Screen::Profile)
    }

    pub fn auto_advances(self) -> bool {
        matches!(self, Screen::Welcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("already on the first screen")]
    AtFirstScreen,
    #[error("already on the last screen")]
    AtLastScreen,
    #[error("profile is not complete")]
    ProfileIncomplete,
    #[error("clicked on {clicked} but already moved to {current}")]
    ScreenChanged { clicked: Screen, current: Screen },
}

/// Identifies one arming of the welcome-screen timer. A token stops being
/// honoured as soon as the wizard leaves the screen that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub struct AutoAdvanceToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    screen: Screen,
    generation: u64,
    armed: Option<AutoAdvanceToken>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        let mut wizard = Self {
            screen: Screen::Welcome,
            generation: 0,
            armed: None,
        };
        wizard.enter(Screen::Welcome);
        wizard
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Token for the timer that should currently be running, if any.
    pub fn armed_auto_advance(&self) -> Option<AutoAdvanceToken> {
        self.armed
    }

    pub fn can_go_next(&self, profile: &ProfileForm) -> bool {
        self.check_next(profile).is_ok()
    }

    pub fn can_go_prev(&self) -> bool {
        self.screen.prev().is_some()
    }

    pub fn next(&mut self, profile: &ProfileForm) -> Result<Screen, TransitionError> {
        let target = self.check_next(profile)?;
        self.enter(target);
        Ok(target)
    }

    pub fn prev(&mut self) -> Result<Screen, TransitionError> {
        let target = self.screen.prev().ok_or(TransitionError::AtFirstScreen)?;
        self.enter(target);
        Ok(target)
    }

    /// Called when a welcome timer elapses. Returns whether the wizard moved.
    pub fn fire_auto_advance(&mut self, token: AutoAdvanceToken) -> bool {
        if self.armed != Some(token) || !self.screen.auto_advances() {
            log::debug!("Ignoring stale auto-advance token {}", token);
            return false;
        }
        match self.screen.next() {
            Some(target) => {
                self.enter(target);
                true
            }
            None => false,
        }
    }

    /// Drops the armed token without moving, for teardown.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    fn check_next(&self, profile: &ProfileForm) -> Result<Screen, TransitionError> {
        let target = self.screen.next().ok_or(TransitionError::AtLastScreen)?;
        if self.screen.requires_complete_profile() && !profile.is_complete() {
            return Err(TransitionError::ProfileIncomplete);
        }
        Ok(target)
    }

    fn enter(&mut self, screen: Screen) {
        self.screen = screen;
        self.armed = None;
        if screen.auto_advances() {
            self.generation += 1;
            self.armed = Some(AutoAdvanceToken(self.generation));
        }
    }
}

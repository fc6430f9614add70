use anchor_lang::prelude::*;

use crate::{constants::*, error::LedgerError};

/// Which bound set a ledger validates submissions against.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ValidationProfile {
    /// Category + positive value + nonzero proof.
    Aggregation,
    /// Bounded value plus mandatory location and age range.
    Demographic,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct SubmissionRules {
    pub profile: ValidationProfile,
    /// Inclusive lower bound on `value`
    pub min_value: u64,
    /// Inclusive upper bound on `value`
    pub max_value: u64,
    pub require_location: bool,
    pub require_age_range: bool,
}

impl SubmissionRules {
    pub fn aggregation() -> Self {
        Self {
            profile: ValidationProfile::Aggregation,
            min_value: 1,
            max_value: u64::MAX,
            require_location: false,
            require_age_range: false,
        }
    }

    pub fn demographic() -> Self {
        Self {
            profile: ValidationProfile::Demographic,
            min_value: 1,
            max_value: DEMOGRAPHIC_MAX_VALUE,
            require_location: true,
            require_age_range: true,
        }
    }

    pub fn accepts_value(&self, value: u64) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }
}

/// Epoch window length and the points where it is enforced.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct EpochWindow {
    /// Window length in ticks
    pub duration: u64,
    /// Reject submissions once the window has elapsed
    pub enforce_on_submit: bool,
    /// Reject `close_epoch` until the window has elapsed
    pub enforce_on_close: bool,
}

impl EpochWindow {
    /// A window whose end does not fit in a tick never elapses.
    pub fn elapsed(&self, start: u64, tick: u64) -> bool {
        match start.checked_add(self.duration) {
            Some(end) => tick >= end,
            None => false,
        }
    }
}

impl Default for EpochWindow {
    fn default() -> Self {
        Self {
            duration: DEFAULT_EPOCH_DURATION,
            enforce_on_submit: true,
            enforce_on_close: true,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct LedgerConfig {
    pub rules: SubmissionRules,
    pub window: EpochWindow,
}

impl LedgerConfig {
    /// Epoch window enforced on submit and close, unbounded positive values.
    pub fn aggregation() -> Self {
        Self {
            rules: SubmissionRules::aggregation(),
            window: EpochWindow::default(),
        }
    }

    /// Location/age-range submissions, epochs closed on demand.
    pub fn demographic() -> Self {
        Self {
            rules: SubmissionRules::demographic(),
            window: EpochWindow {
                duration: DEFAULT_EPOCH_DURATION,
                enforce_on_submit: false,
                enforce_on_close: false,
            },
        }
    }

    pub fn validate(&self) -> std::result::Result<(), LedgerError> {
        let rules = &self.rules;
        if rules.min_value == 0 || rules.min_value > rules.max_value {
            return Err(LedgerError::InvalidConfig);
        }
        let enforced = self.window.enforce_on_submit || self.window.enforce_on_close;
        if enforced && self.window.duration == 0 {
            return Err(LedgerError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::aggregation()
    }
}

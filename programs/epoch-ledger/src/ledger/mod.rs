//! Runtime-independent ledger core.
//!
//! [`EpochControl`] holds the clock and config and validates every operation
//! against the records it would touch, which the caller passes in. Nothing is
//! written until every check passes, so a rejected call leaves all state
//! unchanged. [`EpochLedger`] keeps the records in memory on top of it; the
//! program keeps them in one account per record.

mod aggregation;
mod clock;
mod commitment;
mod memory;
mod submission;
mod verification;

use anchor_lang::prelude::*;

use crate::{config::LedgerConfig, error::LedgerError, state::EpochClock};

pub use aggregation::aggregate_totals;
pub use commitment::{hash_submission, RevealedFields};
pub use memory::EpochLedger;
pub use submission::{SubmissionInput, SubmissionPlan};
pub use verification::{check_registration, check_reveal};

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Who is calling and at which tick; supplied by the runtime per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Pubkey,
    pub tick: u64,
}

impl CallContext {
    pub fn new(caller: Pubkey, tick: u64) -> Self {
        Self { caller, tick }
    }
}

/// Clock and config of one ledger.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct EpochControl {
    pub(crate) config: LedgerConfig,
    pub(crate) clock: EpochClock,
}

impl EpochControl {
    /// Opens epoch 0 at `tick` with `authority` in charge.
    pub fn new(authority: Pubkey, tick: u64, config: LedgerConfig) -> LedgerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: EpochClock {
                current_epoch: 0,
                epoch_start: tick,
                closed: false,
                authority,
            },
        })
    }

    fn require_authority(&self, ctx: &CallContext) -> LedgerResult<()> {
        if ctx.caller != self.clock.authority {
            return Err(LedgerError::NotAuthorized);
        }
        Ok(())
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn clock(&self) -> &EpochClock {
        &self.clock
    }

    pub fn current_epoch(&self) -> u64 {
        self.clock.current_epoch
    }

    pub fn epoch_start(&self) -> u64 {
        self.clock.epoch_start
    }

    pub fn is_closed(&self) -> bool {
        self.clock.closed
    }

    pub fn authority(&self) -> Pubkey {
        self.clock.authority
    }
}

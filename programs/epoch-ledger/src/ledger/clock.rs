use anchor_lang::prelude::Pubkey;

use super::{CallContext, EpochControl, LedgerResult};
use crate::error::LedgerError;

impl EpochControl {
    /// Stops accepting submissions for the current epoch.
    pub fn close_epoch(&mut self, ctx: &CallContext) -> LedgerResult<()> {
        self.require_authority(ctx)?;
        if self.clock.closed {
            return Err(LedgerError::AlreadyClosed);
        }
        let window = self.config.window;
        if window.enforce_on_close && !window.elapsed(self.clock.epoch_start, ctx.tick) {
            return Err(LedgerError::TooEarly);
        }

        self.clock.closed = true;
        Ok(())
    }

    /// Rolls over to a fresh open epoch without aggregating. Returns the new epoch id.
    pub fn force_new_epoch(&mut self, ctx: &CallContext) -> LedgerResult<u64> {
        self.require_authority(ctx)?;
        self.advance_epoch(ctx.tick)
    }

    pub fn update_authority(&mut self, ctx: &CallContext, new_authority: Pubkey) -> LedgerResult<()> {
        self.require_authority(ctx)?;
        self.clock.authority = new_authority;
        Ok(())
    }

    fn next_epoch_id(&self) -> LedgerResult<u64> {
        self.clock
            .current_epoch
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub(super) fn advance_epoch(&mut self, tick: u64) -> LedgerResult<u64> {
        let next = self.next_epoch_id()?;
        self.clock.current_epoch = next;
        self.clock.epoch_start = tick;
        self.clock.closed = false;
        Ok(next)
    }

    /// Whether submissions are accepted at `tick`.
    pub fn is_open(&self, tick: u64) -> bool {
        if self.clock.closed {
            return false;
        }
        let window = self.config.window;
        !(window.enforce_on_submit && window.elapsed(self.clock.epoch_start, tick))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use crate::config::LedgerConfig;
    use crate::error::LedgerError;

    #[test]
    fn authority_closes_after_duration() {
        let mut ledger = new_ledger(LedgerConfig::aggregation());
        ledger.close_epoch(&as_authority(150)).unwrap();
        assert!(ledger.is_closed());
        assert_eq!(ledger.current_epoch(), 0);
        assert_eq!(ledger.epoch_start(), 0);
    }

    #[test]
    fn close_rejects_non_authority() {
        let mut ledger = new_ledger(LedgerConfig::aggregation());
        let before = ledger.clone();
        assert_eq!(
            ledger.close_epoch(&as_participant(1, 150)),
            Err(LedgerError::NotAuthorized)
        );
        assert_eq!(ledger, before);
    }

    #[test]
    fn close_before_duration_is_too_early() {
        let mut ledger = new_ledger(LedgerConfig::aggregation());
        assert_eq!(ledger.close_epoch(&as_authority(50)), Err(LedgerError::TooEarly));
        assert_eq!(ledger.close_epoch(&as_authority(99)), Err(LedgerError::TooEarly));
        assert!(!ledger.is_closed());
    }

    #[test]
    fn close_succeeds_exactly_once() {
        let mut ledger = new_ledger(LedgerConfig::aggregation());
        ledger.close_epoch(&as_authority(100)).unwrap();
        assert_eq!(
            ledger.close_epoch(&as_authority(101)),
            Err(LedgerError::AlreadyClosed)
        );
    }

    #[test]
    fn demographic_ledger_closes_any_time() {
        let mut ledger = new_ledger(LedgerConfig::demographic());
        ledger.close_epoch(&as_authority(1)).unwrap();
        assert!(ledger.is_closed());
    }

    #[test]
    fn force_new_epoch_advances_and_reopens() {
        let mut ledger = new_ledger(LedgerConfig::demographic());
        ledger.close_epoch(&as_authority(10)).unwrap();

        assert_eq!(ledger.force_new_epoch(&as_authority(42)), Ok(1));
        assert_eq!(ledger.current_epoch(), 1);
        assert_eq!(ledger.epoch_start(), 42);
        assert!(!ledger.is_closed());

        assert_eq!(ledger.force_new_epoch(&as_authority(43)), Ok(2));
    }

    #[test]
    fn force_new_epoch_rejects_non_authority() {
        let mut ledger = new_ledger(LedgerConfig::demographic());
        assert_eq!(
            ledger.force_new_epoch(&as_participant(1, 5)),
            Err(LedgerError::NotAuthorized)
        );
        assert_eq!(ledger.current_epoch(), 0);
    }

    #[test]
    fn authority_transfer() {
        let mut ledger = new_ledger(LedgerConfig::aggregation());
        let new_authority = participant(9);

        assert_eq!(
            ledger.update_authority(&as_participant(1, 0), new_authority),
            Err(LedgerError::NotAuthorized)
        );
        assert_eq!(ledger.authority(), authority());

        ledger.update_authority(&as_authority(0), new_authority).unwrap();
        assert_eq!(ledger.authority(), new_authority);

        // the previous authority lost its privileges
        assert_eq!(
            ledger.close_epoch(&as_authority(200)),
            Err(LedgerError::NotAuthorized)
        );
        ledger.close_epoch(&as_participant(9, 200)).unwrap();
    }

    #[test]
    fn open_window_tracks_enforcement_toggle() {
        let ledger = new_ledger(LedgerConfig::aggregation());
        assert!(ledger.is_open(99));
        assert!(!ledger.is_open(100));

        let mut config = LedgerConfig::aggregation();
        config.window.enforce_on_submit = false;
        let ledger = new_ledger(config);
        assert!(ledger.is_open(10_000));
    }
}

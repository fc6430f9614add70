use anchor_lang::prelude::*;

use crate::{
    config::ValidationProfile,
    error::{Action, LedgerError},
    ledger::CallContext,
};

pub mod close_epoch;
pub mod finalize_epoch;
pub mod force_new_epoch;
pub mod initialize;
pub mod register_commitment;
pub mod submit_data;
pub mod update_authority;
pub mod verify_proof;

/// Caller plus the current slot, which serves as the ledger tick
pub(crate) fn call_context(caller: Pubkey) -> Result<CallContext> {
    let clock = Clock::get()?;
    Ok(CallContext::new(caller, clock.slot))
}

/// Reads a record PDA that may not have been created yet
pub(crate) fn load_record<T: AccountDeserialize + Owner>(info: &AccountInfo) -> Result<Option<T>> {
    if info.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(*info.owner, T::owner(), LedgerError::RecordAccountMismatch);
    let data = info.try_borrow_data()?;
    Ok(Some(T::try_deserialize(&mut &data[..])?))
}

/// Logs a rejected call with its legacy status code and passes the error through
pub(crate) fn rejected(action: Action, profile: ValidationProfile) -> impl Fn(LedgerError) -> LedgerError {
    move |err| {
        msg!(
            "❌ {:?} rejected: {} (status {})",
            action,
            err,
            err.status_code(action, profile)
        );
        err
    }
}

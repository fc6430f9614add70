use anchor_lang::prelude::*;
use crate::{
    contexts::ForceNewEpoch,
    error::Action,
    instructions::{call_context, rejected},
    state::EpochAdvanced,
};

pub fn handler(ctx: Context<ForceNewEpoch>) -> Result<u64> {
    let call = call_context(ctx.accounts.authority.key())?;
    let control = &mut ctx.accounts.ledger_state.control;
    let profile = control.config().rules.profile;
    let old_epoch = control.current_epoch();

    let new_epoch = control
        .force_new_epoch(&call)
        .map_err(rejected(Action::ForceNewEpoch, profile))?;

    // Emit event for historical tracking
    emit!(EpochAdvanced {
        old_epoch,
        new_epoch,
        tick: call.tick,
    });

    msg!("📅 Epoch forced forward: {} → {}", old_epoch, new_epoch);

    Ok(new_epoch)
}

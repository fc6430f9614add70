use anchor_lang::prelude::*;
use crate::{
    contexts::CloseEpoch,
    error::Action,
    instructions::{call_context, rejected},
    state::EpochClosed,
};

pub fn handler(ctx: Context<CloseEpoch>) -> Result<()> {
    let call = call_context(ctx.accounts.authority.key())?;
    let control = &mut ctx.accounts.ledger_state.control;
    let profile = control.config().rules.profile;

    control
        .close_epoch(&call)
        .map_err(rejected(Action::CloseEpoch, profile))?;

    emit!(EpochClosed {
        epoch: control.current_epoch(),
        tick: call.tick,
    });

    msg!("🔒 Epoch {} closed at slot {}", control.current_epoch(), call.tick);

    Ok(())
}

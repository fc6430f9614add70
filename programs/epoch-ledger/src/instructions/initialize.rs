use anchor_lang::prelude::*;
use crate::{
    config::LedgerConfig, contexts::Initialize, instructions::call_context, ledger::EpochControl,
    state::LedgerInitialized,
};

pub fn handler(ctx: Context<Initialize>, config: LedgerConfig) -> Result<()> {
    let call = call_context(ctx.accounts.creator.key())?;
    let ledger_state = &mut ctx.accounts.ledger_state;

    ledger_state.creator = call.caller;
    ledger_state.bump = ctx.bumps.ledger_state;
    ledger_state.control = EpochControl::new(call.caller, call.tick, config)?;

    emit!(LedgerInitialized {
        authority: call.caller,
        epoch_start: call.tick,
    });

    msg!("✅ Epoch ledger initialized!");
    msg!("   Authority: {}", call.caller);
    msg!("   Profile: {:?}", config.rules.profile);
    msg!(
        "   Window: {} slots (submit: {}, close: {})",
        config.window.duration,
        config.window.enforce_on_submit,
        config.window.enforce_on_close
    );

    Ok(())
}

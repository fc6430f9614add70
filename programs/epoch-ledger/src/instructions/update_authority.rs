use anchor_lang::prelude::*;
use crate::{
    contexts::UpdateAuthority,
    error::Action,
    instructions::{call_context, rejected},
    state::AuthorityUpdated,
};

pub fn handler(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
    let call = call_context(ctx.accounts.authority.key())?;
    let control = &mut ctx.accounts.ledger_state.control;
    let profile = control.config().rules.profile;
    let old_authority = control.authority();

    control
        .update_authority(&call, new_authority)
        .map_err(rejected(Action::UpdateAuthority, profile))?;

    emit!(AuthorityUpdated {
        old_authority,
        new_authority,
    });

    msg!("🔑 Authority updated: {} → {}", old_authority, new_authority);

    Ok(())
}

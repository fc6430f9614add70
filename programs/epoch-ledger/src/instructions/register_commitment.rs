use anchor_lang::prelude::*;
use crate::{
    contexts::RegisterCommitment,
    error::Action,
    instructions::{call_context, rejected},
    ledger::{check_registration, RevealedFields},
    state::CommitmentRegistered,
};

pub fn handler(
    ctx: Context<RegisterCommitment>,
    epoch: u64,
    submitter: Pubkey,
    fields: RevealedFields,
) -> Result<[u8; 32]> {
    let call = call_context(ctx.accounts.caller.key())?;
    let profile = ctx.accounts.ledger_state.control.config().rules.profile;
    let record = &mut ctx.accounts.commitment;

    let commitment = check_registration(&call, submitter, &fields, record.commitment.as_ref())
        .map_err(rejected(Action::RegisterCommitment, profile))?;
    record.commitment = Some(commitment);

    emit!(CommitmentRegistered {
        epoch,
        submitter,
        commitment,
    });

    msg!("✅ Commitment registered for epoch {} by {}", epoch, submitter);

    Ok(commitment)
}

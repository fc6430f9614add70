use anchor_lang::prelude::*;
use crate::{
    contexts::VerifyProof,
    error::Action,
    instructions::{call_context, load_record, rejected},
    ledger::{check_reveal, RevealedFields},
    state::{CommitmentRecord, ProofVerified},
};

/// Reveal the committed fields and consume `proof_hash`.
///
/// The check is plain digest equality against the registered commitment:
/// 1. Signer must be the submitter
/// 2. Proof hash must be 32 bytes and never used before (on any epoch)
/// 3. Category and value bounds
/// 4. Recomputed digest must equal the stored one byte for byte
pub fn handler(
    ctx: Context<VerifyProof>,
    epoch: u64,
    submitter: Pubkey,
    fields: RevealedFields,
    proof_hash: Vec<u8>,
) -> Result<()> {
    let call = call_context(ctx.accounts.caller.key())?;
    let profile = ctx.accounts.ledger_state.control.config().rules.profile;

    msg!("📝 Verifying reveal for epoch {}...", epoch);

    let commitment = load_record::<CommitmentRecord>(&ctx.accounts.commitment)?
        .and_then(|record| record.commitment);
    let already_used = ctx.accounts.proof.proof.is_some();

    let (consumed, record) = check_reveal(
        &call,
        epoch,
        submitter,
        &fields,
        &proof_hash,
        |_| already_used,
        commitment.as_ref(),
    )
    .map_err(rejected(Action::VerifyProof, profile))?;
    ctx.accounts.proof.proof = Some(record);

    emit!(ProofVerified {
        epoch,
        submitter,
        proof_hash: consumed,
        tick: record.verified_at,
    });

    msg!("✅ Proof verified and consumed (epoch {}, slot {})", epoch, record.verified_at);

    Ok(())
}

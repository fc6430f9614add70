use anchor_lang::prelude::Pubkey;

use super::{CallContext, LedgerResult, RevealedFields};
use crate::{constants::*, error::LedgerError, state::VerifiedProof};

/// Digest to store for (epoch, submitter). Self-registration only.
///
/// `existing` is the commitment already stored under that key, if any.
pub fn check_registration(
    ctx: &CallContext,
    submitter: Pubkey,
    fields: &RevealedFields,
    existing: Option<&[u8; 32]>,
) -> LedgerResult<[u8; 32]> {
    if ctx.caller != submitter {
        return Err(LedgerError::NotAuthorized);
    }
    if existing.is_some() {
        return Err(LedgerError::AlreadyRegistered);
    }
    Ok(fields.digest())
}

/// Checks revealed fields against `commitment` and returns the record that
/// consumes `proof_hash`.
///
/// `consumed` answers whether a well-formed proof hash was already used; it
/// is only asked after the length check.
pub fn check_reveal(
    ctx: &CallContext,
    epoch: u64,
    submitter: Pubkey,
    fields: &RevealedFields,
    proof_hash: &[u8],
    consumed: impl FnOnce(&[u8; PROOF_HASH_LEN]) -> bool,
    commitment: Option<&[u8; 32]>,
) -> LedgerResult<([u8; PROOF_HASH_LEN], VerifiedProof)> {
    if ctx.caller != submitter {
        return Err(LedgerError::NotAuthorized);
    }
    let proof_hash: [u8; PROOF_HASH_LEN] = proof_hash
        .try_into()
        .map_err(|_| LedgerError::InvalidProofLength)?;
    if consumed(&proof_hash) {
        return Err(LedgerError::ProofReplayed);
    }
    if fields.category >= CATEGORY_COUNT {
        return Err(LedgerError::InvalidCategory);
    }
    if fields.value == 0 {
        return Err(LedgerError::InvalidValue);
    }
    let stored = commitment.ok_or(LedgerError::NoCommitment)?;
    if fields.digest() != *stored {
        return Err(LedgerError::HashMismatch);
    }

    Ok((
        proof_hash,
        VerifiedProof {
            epoch,
            submitter,
            verified_at: ctx.tick,
        },
    ))
}

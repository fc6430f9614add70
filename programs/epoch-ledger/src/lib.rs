pub mod config;
pub mod constants;
pub mod contexts;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod state;

use anchor_lang::prelude::*;

pub use config::*;
pub use contexts::*;
pub use error::*;
pub use ledger::{
    aggregate_totals, check_registration, check_reveal, hash_submission, CallContext,
    EpochControl, EpochLedger, LedgerResult, RevealedFields, SubmissionInput, SubmissionPlan,
};
pub use state::*;

declare_id!("ChdeH1zkoAb8KpRioFb7aq1BL6Dye7ax6WtkmGxHbEWw");

/// Epoch Ledger: epoch-bounded data collection with commit-reveal checks
///
/// - One submission per participant per epoch, validated against the
///   configured profile and summed into per-category/per-location totals
/// - Commitments bind (category, value, location, age range) to a digest;
///   a later reveal is checked byte-for-byte and its proof hash consumed once
/// - The authority closes an epoch, finalizes it into floor averages, and
///   the ledger rolls forward to the next epoch
///
/// The ledger account holds only the clock and config; submissions, totals,
/// commitments, consumed proofs and aggregates each live in their own PDA.
///
/// The slot number is the logical clock for windows and timestamps.
#[program]
pub mod epoch_ledger {
    use super::*;

    /// Create a ledger with the given profile and window
    pub fn initialize(ctx: Context<Initialize>, config: LedgerConfig) -> Result<()> {
        instructions::initialize::handler(ctx, config)
    }

    /// Submit the signer's data point for the current epoch
    pub fn submit_data(ctx: Context<SubmitData>, input: SubmissionInput) -> Result<()> {
        instructions::submit_data::handler(ctx, input)
    }

    /// Close the current epoch (authority-only)
    pub fn close_epoch(ctx: Context<CloseEpoch>) -> Result<()> {
        instructions::close_epoch::handler(ctx)
    }

    /// Aggregate the closed epoch and open the next one (authority-only).
    /// Pass the epoch's ten category total PDAs as remaining accounts.
    pub fn finalize_epoch(ctx: Context<FinalizeEpoch>) -> Result<FinalAggregate> {
        instructions::finalize_epoch::handler(ctx)
    }

    /// Open a new epoch without aggregating (authority-only)
    pub fn force_new_epoch(ctx: Context<ForceNewEpoch>) -> Result<u64> {
        instructions::force_new_epoch::handler(ctx)
    }

    /// Transfer the authority role (authority-only)
    pub fn update_authority(ctx: Context<UpdateAuthority>, new_authority: Pubkey) -> Result<()> {
        instructions::update_authority::handler(ctx, new_authority)
    }

    /// Register the signer's commitment for an epoch
    pub fn register_commitment(
        ctx: Context<RegisterCommitment>,
        epoch: u64,
        submitter: Pubkey,
        fields: RevealedFields,
    ) -> Result<[u8; 32]> {
        instructions::register_commitment::handler(ctx, epoch, submitter, fields)
    }

    /// Reveal committed fields and consume a one-time proof hash
    pub fn verify_proof(
        ctx: Context<VerifyProof>,
        epoch: u64,
        submitter: Pubkey,
        fields: RevealedFields,
        proof_hash: Vec<u8>,
    ) -> Result<()> {
        instructions::verify_proof::handler(ctx, epoch, submitter, fields, proof_hash)
    }
}

use anchor_lang::prelude::*;
use crate::{
    constants::*,
    ledger::{RevealedFields, SubmissionInput},
    state::*,
};

/// Create a ledger; the creator becomes its first authority
#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Ledger PDA, one per creator
    #[account(
        init,
        payer = creator,
        space = 8 + LedgerState::INIT_SPACE,
        seeds = [LEDGER_SEED, creator.key().as_ref()],
        bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    pub system_program: Program<'info, System>,
}

/// Submit a data point (signer is the participant and pays for new records)
///
/// Record PDAs are created on first use; the handler rejects a record that
/// already holds data, and a rejected call rolls the creation back.
#[derive(Accounts)]
#[instruction(input: SubmissionInput)]
pub struct SubmitData<'info> {
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    /// One per (epoch, participant)
    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + SubmissionRecord::INIT_SPACE,
        seeds = [
            SUBMISSION_SEED,
            ledger_state.key().as_ref(),
            &ledger_state.control.current_epoch().to_le_bytes(),
            participant.key().as_ref()
        ],
        bump
    )]
    pub submission: Account<'info, SubmissionRecord>,

    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + TotalRecord::INIT_SPACE,
        seeds = [
            CATEGORY_TOTAL_SEED,
            ledger_state.key().as_ref(),
            &ledger_state.control.current_epoch().to_le_bytes(),
            &[input.category]
        ],
        bump
    )]
    pub category_total: Account<'info, TotalRecord>,

    /// Required exactly when the input carries a location
    #[account(
        init_if_needed,
        payer = participant,
        space = 8 + TotalRecord::INIT_SPACE,
        seeds = [
            LOCATION_TOTAL_SEED,
            ledger_state.key().as_ref(),
            &ledger_state.control.current_epoch().to_le_bytes(),
            &location_seed(input.location.as_deref())
        ],
        bump
    )]
    pub location_total: Option<Account<'info, TotalRecord>>,

    pub system_program: Program<'info, System>,
}

/// Close the current epoch (authority-only, checked by the ledger)
#[derive(Accounts)]
pub struct CloseEpoch<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,
}

/// Aggregate the closed epoch and open the next one (authority-only)
///
/// Remaining accounts: the ten category total PDAs of the current epoch in
/// category order, whether or not they exist yet.
#[derive(Accounts)]
pub struct FinalizeEpoch<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    /// One per epoch
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + AggregateRecord::INIT_SPACE,
        seeds = [
            AGGREGATE_SEED,
            ledger_state.key().as_ref(),
            &ledger_state.control.current_epoch().to_le_bytes()
        ],
        bump
    )]
    pub aggregate: Account<'info, AggregateRecord>,

    pub system_program: Program<'info, System>,
}

/// Roll over without aggregating (authority-only)
#[derive(Accounts)]
pub struct ForceNewEpoch<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,
}

/// Hand the authority role to another principal (authority-only)
#[derive(Accounts)]
pub struct UpdateAuthority<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,
}

/// Register a commitment (signer must be the submitter)
#[derive(Accounts)]
#[instruction(epoch: u64, submitter: Pubkey)]
pub struct RegisterCommitment<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    /// One per (epoch, submitter)
    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + CommitmentRecord::INIT_SPACE,
        seeds = [
            COMMITMENT_SEED,
            ledger_state.key().as_ref(),
            &epoch.to_le_bytes(),
            submitter.as_ref()
        ],
        bump
    )]
    pub commitment: Account<'info, CommitmentRecord>,

    pub system_program: Program<'info, System>,
}

/// Reveal fields against a commitment and consume a proof hash
#[derive(Accounts)]
#[instruction(
    epoch: u64,
    submitter: Pubkey,
    fields: RevealedFields,
    proof_hash: Vec<u8>
)]
pub struct VerifyProof<'info> {
    #[account(mut)]
    pub caller: Signer<'info>,

    #[account(
        seeds = [LEDGER_SEED, ledger_state.creator.as_ref()],
        bump = ledger_state.bump
    )]
    pub ledger_state: Account<'info, LedgerState>,

    /// CHECK: commitment PDA for (epoch, submitter); may not exist, read by the handler
    #[account(
        seeds = [
            COMMITMENT_SEED,
            ledger_state.key().as_ref(),
            &epoch.to_le_bytes(),
            submitter.as_ref()
        ],
        bump
    )]
    pub commitment: UncheckedAccount<'info>,

    /// One per proof hash, shared by every epoch and submitter of this ledger
    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + ProofRecord::INIT_SPACE,
        seeds = [PROOF_SEED, ledger_state.key().as_ref(), &proof_seed(&proof_hash)],
        bump
    )]
    pub proof: Account<'info, ProofRecord>,

    pub system_program: Program<'info, System>,
}

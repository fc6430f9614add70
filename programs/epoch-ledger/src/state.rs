use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::ledger::EpochControl;

// ============================================================================
// LEDGER STATE - Clock and config for one ledger instance
// ============================================================================

#[account]
#[derive(InitSpace)]
pub struct LedgerState {
    /// Signer that created the ledger (PDA seed, never changes)
    pub creator: Pubkey,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Epoch clock and validation config
    pub control: EpochControl,
}

// ============================================================================
// RECORD ACCOUNTS - One PDA per record, created on first write
//
// Payloads are `Option`s (or zeroed totals) so a freshly created account
// reads as "no record yet"; the handler then runs the same checks as for an
// existing record and a rejected call rolls the creation back.
// ============================================================================

/// A participant's submission for one epoch
#[account]
#[derive(InitSpace)]
pub struct SubmissionRecord {
    pub submission: Option<Submission>,
}

/// Running total for one (epoch, category) or (epoch, location)
#[account]
#[derive(InitSpace)]
pub struct TotalRecord {
    pub total: RunningTotal,
}

/// Commitment digest for one (epoch, submitter)
#[account]
#[derive(InitSpace)]
pub struct CommitmentRecord {
    pub commitment: Option<[u8; 32]>,
}

/// Consumption marker for one proof hash
#[account]
#[derive(InitSpace)]
pub struct ProofRecord {
    pub proof: Option<VerifiedProof>,
}

/// Final aggregate for one epoch
#[account]
#[derive(InitSpace)]
pub struct AggregateRecord {
    pub aggregate: Option<FinalAggregate>,
}

/// Fixed-width seed for a location total PDA (locations can exceed the 32-byte seed limit)
pub fn location_seed(location: Option<&str>) -> [u8; 32] {
    Sha256::digest(location.unwrap_or_default().as_bytes()).into()
}

/// Fixed-width seed for a proof PDA; malformed hashes of any length still derive an address
pub fn proof_seed(proof_hash: &[u8]) -> [u8; 32] {
    Sha256::digest(proof_hash).into()
}

// ============================================================================
// COMPOSITE KEYS
// ============================================================================

/// Key for per-participant records inside one epoch
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochParticipant {
    pub epoch: u64,
    pub participant: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochCategory {
    pub epoch: u64,
    pub category: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochLocation {
    pub epoch: u64,
    pub location: String,
}

// ============================================================================
// RECORDS
// ============================================================================

/// Epoch id, window start and closed flag plus the authority gating them
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct EpochClock {
    pub current_epoch: u64,

    /// Tick at which the current epoch opened
    pub epoch_start: u64,

    pub closed: bool,

    pub authority: Pubkey,
}

/// One participant's data point for an epoch (immutable once stored)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Submission {
    pub category: u8,
    pub value: u64,
    /// Up to `MAX_LOCATION_BYTES` of UTF-8
    #[max_len(150)]
    pub location: Option<String>,
    pub age_range: Option<u8>,
    pub proof_hash: [u8; 32],
    pub submitted_at: u64,
}

/// Additive sum/count over accepted submissions
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RunningTotal {
    pub sum: u64,
    pub count: u64,
}

pub type CategoryTotal = RunningTotal;
pub type LocationTotal = RunningTotal;

impl RunningTotal {
    /// Returns the total with `value` folded in, or `None` on overflow.
    pub fn checked_add(self, value: u64) -> Option<Self> {
        Some(Self {
            sum: self.sum.checked_add(value)?,
            count: self.count.checked_add(1)?,
        })
    }
}

/// Summary written once when an epoch is finalized
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct FinalAggregate {
    pub total_submissions: u64,

    /// Floor averages for each category with submissions, ascending category order
    #[max_len(10)]
    pub averages: Vec<u64>,

    pub finalized_at: u64,
}

/// Consumption record for a proof hash (global, one per hash)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct VerifiedProof {
    pub epoch: u64,
    pub submitter: Pubkey,
    pub verified_at: u64,
}

// ============================================================================
// EVENTS - Emitted for off-chain indexing
// ============================================================================

#[event]
pub struct LedgerInitialized {
    pub authority: Pubkey,
    pub epoch_start: u64,
}

#[event]
pub struct DataSubmitted {
    pub epoch: u64,
    pub participant: Pubkey,
    pub category: u8,
    pub value: u64,
    pub tick: u64,
}

#[event]
pub struct EpochClosed {
    pub epoch: u64,
    pub tick: u64,
}

#[event]
pub struct EpochFinalized {
    pub epoch: u64,
    pub total_submissions: u64,
    pub averages: Vec<u64>,
    pub tick: u64,
}

#[event]
pub struct EpochAdvanced {
    pub old_epoch: u64,
    pub new_epoch: u64,
    pub tick: u64,
}

#[event]
pub struct AuthorityUpdated {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}

#[event]
pub struct CommitmentRegistered {
    pub epoch: u64,
    pub submitter: Pubkey,
    pub commitment: [u8; 32],
}

#[event]
pub struct ProofVerified {
    pub epoch: u64,
    pub submitter: Pubkey,
    pub proof_hash: [u8; 32],
    pub tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::LedgerConfig, constants::MAX_LOCATION_BYTES};

    fn serialize_at<T: AccountSerialize>(account: &T, space: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; space];
        let mut writer: &mut [u8] = &mut buf;
        account.try_serialize(&mut writer)?;
        Ok(buf)
    }

    #[test]
    fn ledger_state_fits_declared_space() {
        let mut control =
            EpochControl::new(Pubkey::new_from_array([1; 32]), 7, LedgerConfig::demographic())
                .unwrap();
        control.clock.current_epoch = u64::MAX - 1;
        control.clock.closed = true;
        let state = LedgerState {
            creator: Pubkey::new_from_array([2; 32]),
            bump: 254,
            control,
        };

        let buf = serialize_at(&state, 8 + LedgerState::INIT_SPACE).unwrap();
        let back = LedgerState::try_deserialize(&mut &buf[..]).unwrap();
        assert_eq!(back.creator, state.creator);
        assert_eq!(back.bump, 254);
        assert_eq!(back.control, control);
    }

    #[test]
    fn largest_submission_fits_declared_space() {
        // 50 BMP code units at 3 bytes each
        let location = "€".repeat(50);
        assert_eq!(location.len(), MAX_LOCATION_BYTES);
        let record = SubmissionRecord {
            submission: Some(Submission {
                category: 9,
                value: u64::MAX,
                location: Some(location),
                age_range: Some(5),
                proof_hash: [0xFF; 32],
                submitted_at: u64::MAX,
            }),
        };

        let space = 8 + SubmissionRecord::INIT_SPACE;
        let buf = serialize_at(&record, space).unwrap();
        let back = SubmissionRecord::try_deserialize(&mut &buf[..]).unwrap();
        assert_eq!(back.submission, record.submission);

        let mut too_long = record.clone();
        if let Some(submission) = too_long.submission.as_mut() {
            submission.location = Some("€".repeat(51));
        }
        assert!(serialize_at(&too_long, space).is_err());
    }

    #[test]
    fn full_aggregate_fits_declared_space() {
        let record = AggregateRecord {
            aggregate: Some(FinalAggregate {
                total_submissions: u64::MAX,
                averages: vec![u64::MAX; crate::constants::MAX_AVERAGES],
                finalized_at: u64::MAX,
            }),
        };
        let buf = serialize_at(&record, 8 + AggregateRecord::INIT_SPACE).unwrap();
        let back = AggregateRecord::try_deserialize(&mut &buf[..]).unwrap();
        assert_eq!(back.aggregate, record.aggregate);
    }

    #[test]
    fn zeroed_records_read_as_empty() {
        let zeroed = vec![0u8; 8 + SubmissionRecord::INIT_SPACE];
        let fresh = SubmissionRecord::try_deserialize_unchecked(&mut &zeroed[..]).unwrap();
        assert!(fresh.submission.is_none());

        let zeroed = vec![0u8; 8 + TotalRecord::INIT_SPACE];
        let fresh = TotalRecord::try_deserialize_unchecked(&mut &zeroed[..]).unwrap();
        assert_eq!(fresh.total, RunningTotal::default());

        let zeroed = vec![0u8; 8 + ProofRecord::INIT_SPACE];
        assert!(ProofRecord::try_deserialize_unchecked(&mut &zeroed[..])
            .unwrap()
            .proof
            .is_none());
    }

    #[test]
    fn seeds_are_fixed_width_and_distinct() {
        assert_ne!(location_seed(Some("North")), location_seed(Some("South")));
        assert_eq!(location_seed(None), location_seed(Some("")));
        assert_ne!(proof_seed(&[1; 31]), proof_seed(&[1; 32]));
    }
}

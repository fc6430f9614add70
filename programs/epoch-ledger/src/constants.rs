// ============================================================================
// SEEDS FOR PDA DERIVATION
// ============================================================================

pub const LEDGER_SEED: &[u8] = b"ledger";

/// `[SUBMISSION_SEED, ledger, epoch_le, participant]`
pub const SUBMISSION_SEED: &[u8] = b"submission";

/// `[CATEGORY_TOTAL_SEED, ledger, epoch_le, [category]]`
pub const CATEGORY_TOTAL_SEED: &[u8] = b"category_total";

/// `[LOCATION_TOTAL_SEED, ledger, epoch_le, sha256(location)]`
pub const LOCATION_TOTAL_SEED: &[u8] = b"location_total";

/// `[COMMITMENT_SEED, ledger, epoch_le, submitter]`
pub const COMMITMENT_SEED: &[u8] = b"commitment";

/// `[PROOF_SEED, ledger, sha256(proof_hash)]`
pub const PROOF_SEED: &[u8] = b"proof";

/// `[AGGREGATE_SEED, ledger, epoch_le]`
pub const AGGREGATE_SEED: &[u8] = b"aggregate";

// ============================================================================
// SUBMISSION BOUNDS
// ============================================================================

/// Categories are numbered 0..CATEGORY_COUNT
pub const CATEGORY_COUNT: u8 = 10;

/// Maximum location length in UTF-16 code units
pub const MAX_LOCATION_LEN: usize = 50;

/// Largest UTF-8 encoding of a valid location (3 bytes per BMP code unit)
pub const MAX_LOCATION_BYTES: usize = 3 * MAX_LOCATION_LEN;

/// Largest accepted age-range bucket
pub const MAX_AGE_RANGE: u8 = 5;

/// Upper value bound used by the demographic profile
pub const DEMOGRAPHIC_MAX_VALUE: u64 = 1000;

/// Proof hashes and commitments are 32-byte digests
pub const PROOF_HASH_LEN: usize = 32;

// ============================================================================
// EPOCH CONFIGURATION
// ============================================================================

/// Default epoch window in ticks (slots)
pub const DEFAULT_EPOCH_DURATION: u64 = 100;

/// Cap on the number of averages stored in a final aggregate
pub const MAX_AVERAGES: usize = 10;

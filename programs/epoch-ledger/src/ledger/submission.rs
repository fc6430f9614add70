use anchor_lang::prelude::*;

use super::{CallContext, EpochControl, LedgerResult};
use crate::{
    constants::*,
    error::LedgerError,
    state::{CategoryTotal, LocationTotal, Submission},
};

/// Raw submission arguments as received from the caller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmissionInput {
    pub category: u8,
    pub value: u64,
    pub location: Option<String>,
    pub age_range: Option<u8>,
    /// Must be exactly 32 bytes; kept as a vector so short/long hashes can be rejected
    pub proof_hash: Vec<u8>,
}

/// Records an accepted submission writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionPlan {
    pub submission: Submission,
    pub category_total: CategoryTotal,
    /// Present when the submission carries a location
    pub location_total: Option<LocationTotal>,
}

impl EpochControl {
    /// Validates the caller's data point for the current epoch.
    ///
    /// `existing` is the caller's stored submission for this epoch; the two
    /// totals are the current ones for the input's category and location
    /// (zero when none exist yet).
    pub fn plan_submission(
        &self,
        ctx: &CallContext,
        input: SubmissionInput,
        existing: Option<&Submission>,
        category_total: CategoryTotal,
        location_total: LocationTotal,
    ) -> LedgerResult<SubmissionPlan> {
        let rules = self.config.rules;

        if !self.is_open(ctx.tick) {
            return Err(LedgerError::EpochClosed);
        }
        if input.category >= CATEGORY_COUNT {
            return Err(LedgerError::InvalidCategory);
        }
        if !rules.accepts_value(input.value) {
            return Err(LedgerError::InvalidValue);
        }
        match &input.location {
            Some(location) if !is_valid_location(location) => {
                return Err(LedgerError::InvalidLocation)
            }
            None if rules.require_location => return Err(LedgerError::InvalidLocation),
            _ => {}
        }
        match input.age_range {
            Some(age_range) if age_range > MAX_AGE_RANGE => {
                return Err(LedgerError::InvalidAgeRange)
            }
            None if rules.require_age_range => return Err(LedgerError::InvalidAgeRange),
            _ => {}
        }
        let proof_hash = parse_proof_hash(&input.proof_hash)?;
        if existing.is_some() {
            return Err(LedgerError::DuplicateSubmission);
        }

        let category_total = category_total
            .checked_add(input.value)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let location_total = match input.location {
            Some(_) => Some(
                location_total
                    .checked_add(input.value)
                    .ok_or(LedgerError::ArithmeticOverflow)?,
            ),
            None => None,
        };

        Ok(SubmissionPlan {
            submission: Submission {
                category: input.category,
                value: input.value,
                location: input.location,
                age_range: input.age_range,
                proof_hash,
                submitted_at: ctx.tick,
            },
            category_total,
            location_total,
        })
    }
}

/// Non-empty and at most `MAX_LOCATION_LEN` UTF-16 code units.
fn is_valid_location(location: &str) -> bool {
    !location.is_empty() && location.encode_utf16().count() <= MAX_LOCATION_LEN
}

/// 32 bytes, not all zero.
fn parse_proof_hash(bytes: &[u8]) -> LedgerResult<[u8; 32]> {
    let hash: [u8; PROOF_HASH_LEN] = bytes.try_into().map_err(|_| LedgerError::InvalidProof)?;
    if hash.iter().all(|b| *b == 0) {
        return Err(LedgerError::InvalidProof);
    }
    Ok(hash)
}

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use super::{
    check_registration, check_reveal, CallContext, EpochControl, LedgerResult, RevealedFields,
    SubmissionInput,
};
use crate::{
    config::LedgerConfig,
    constants::CATEGORY_COUNT,
    state::{
        CategoryTotal, EpochCategory, EpochClock, EpochLocation, EpochParticipant,
        FinalAggregate, LocationTotal, Submission, VerifiedProof,
    },
};

/// A whole ledger in memory: the control block plus every record it owns.
///
/// Runs the same checks as the program, keyed the same way as its record
/// accounts. Useful for simulation and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochLedger {
    control: EpochControl,
    submissions: BTreeMap<EpochParticipant, Submission>,
    category_totals: BTreeMap<EpochCategory, CategoryTotal>,
    location_totals: BTreeMap<EpochLocation, LocationTotal>,
    final_aggregates: BTreeMap<u64, FinalAggregate>,
    commitments: BTreeMap<EpochParticipant, [u8; 32]>,
    verified_proofs: BTreeMap<[u8; 32], VerifiedProof>,
}

impl EpochLedger {
    /// Opens epoch 0 at `tick` with `authority` in charge.
    pub fn new(authority: Pubkey, tick: u64, config: LedgerConfig) -> LedgerResult<Self> {
        Ok(Self {
            control: EpochControl::new(authority, tick, config)?,
            submissions: BTreeMap::new(),
            category_totals: BTreeMap::new(),
            location_totals: BTreeMap::new(),
            final_aggregates: BTreeMap::new(),
            commitments: BTreeMap::new(),
            verified_proofs: BTreeMap::new(),
        })
    }

    /// Records the caller's data point for the current epoch.
    pub fn submit(&mut self, ctx: &CallContext, input: SubmissionInput) -> LedgerResult<Submission> {
        let epoch = self.control.current_epoch();
        let key = EpochParticipant {
            epoch,
            participant: ctx.caller,
        };
        let category_key = EpochCategory {
            epoch,
            category: input.category,
        };
        let location_key = input.location.clone().map(|location| EpochLocation { epoch, location });

        let category_total = self.category_totals.get(&category_key).copied().unwrap_or_default();
        let location_total = location_key
            .as_ref()
            .and_then(|k| self.location_totals.get(k))
            .copied()
            .unwrap_or_default();
        let plan = self.control.plan_submission(
            ctx,
            input,
            self.submissions.get(&key),
            category_total,
            location_total,
        )?;

        self.category_totals.insert(category_key, plan.category_total);
        if let (Some(k), Some(total)) = (location_key, plan.location_total) {
            self.location_totals.insert(k, total);
        }
        self.submissions.insert(key, plan.submission.clone());
        Ok(plan.submission)
    }

    pub fn close_epoch(&mut self, ctx: &CallContext) -> LedgerResult<()> {
        self.control.close_epoch(ctx)
    }

    pub fn force_new_epoch(&mut self, ctx: &CallContext) -> LedgerResult<u64> {
        self.control.force_new_epoch(ctx)
    }

    pub fn update_authority(&mut self, ctx: &CallContext, new_authority: Pubkey) -> LedgerResult<()> {
        self.control.update_authority(ctx, new_authority)
    }

    /// Aggregates the closed epoch, stores the result and opens the next epoch.
    pub fn finalize_epoch(&mut self, ctx: &CallContext) -> LedgerResult<FinalAggregate> {
        let epoch = self.control.current_epoch();
        let existing = self.final_aggregates.get(&epoch);
        self.control.check_finalize(ctx, existing)?;

        let totals: Vec<CategoryTotal> = (0..CATEGORY_COUNT)
            .map(|category| {
                self.category_totals
                    .get(&EpochCategory { epoch, category })
                    .copied()
                    .unwrap_or_default()
            })
            .collect();
        let aggregate = self.control.finalize_epoch(ctx, existing, &totals)?;
        self.final_aggregates.insert(epoch, aggregate.clone());
        Ok(aggregate)
    }

    /// Stores the commitment digest for (epoch, submitter).
    pub fn register_commitment(
        &mut self,
        ctx: &CallContext,
        epoch: u64,
        submitter: Pubkey,
        fields: &RevealedFields,
    ) -> LedgerResult<[u8; 32]> {
        let key = EpochParticipant {
            epoch,
            participant: submitter,
        };
        let digest = check_registration(ctx, submitter, fields, self.commitments.get(&key))?;
        self.commitments.insert(key, digest);
        Ok(digest)
    }

    /// Checks revealed fields against the stored commitment and consumes `proof_hash`.
    pub fn verify_proof(
        &mut self,
        ctx: &CallContext,
        epoch: u64,
        submitter: Pubkey,
        fields: &RevealedFields,
        proof_hash: &[u8],
    ) -> LedgerResult<VerifiedProof> {
        let commitment = self.commitments.get(&EpochParticipant {
            epoch,
            participant: submitter,
        });
        let (proof_hash, record) = check_reveal(
            ctx,
            epoch,
            submitter,
            fields,
            proof_hash,
            |hash| self.verified_proofs.contains_key(hash),
            commitment,
        )?;
        self.verified_proofs.insert(proof_hash, record);
        Ok(record)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn control(&self) -> &EpochControl {
        &self.control
    }

    pub fn config(&self) -> &LedgerConfig {
        self.control.config()
    }

    pub fn clock(&self) -> &EpochClock {
        self.control.clock()
    }

    pub fn current_epoch(&self) -> u64 {
        self.control.current_epoch()
    }

    pub fn epoch_start(&self) -> u64 {
        self.control.epoch_start()
    }

    pub fn is_closed(&self) -> bool {
        self.control.is_closed()
    }

    pub fn authority(&self) -> Pubkey {
        self.control.authority()
    }

    /// Whether submissions are accepted at `tick`.
    pub fn is_open(&self, tick: u64) -> bool {
        self.control.is_open(tick)
    }

    pub fn submission(&self, epoch: u64, participant: &Pubkey) -> Option<&Submission> {
        self.submissions.get(&EpochParticipant {
            epoch,
            participant: *participant,
        })
    }

    pub fn category_total(&self, epoch: u64, category: u8) -> Option<&CategoryTotal> {
        self.category_totals.get(&EpochCategory { epoch, category })
    }

    pub fn location_total(&self, epoch: u64, location: &str) -> Option<&LocationTotal> {
        self.location_totals.get(&EpochLocation {
            epoch,
            location: location.to_string(),
        })
    }

    pub fn final_aggregate(&self, epoch: u64) -> Option<&FinalAggregate> {
        self.final_aggregates.get(&epoch)
    }

    pub fn verified_proof(&self, proof_hash: &[u8; 32]) -> Option<&VerifiedProof> {
        self.verified_proofs.get(proof_hash)
    }

    pub fn commitment(&self, epoch: u64, participant: &Pubkey) -> Option<&[u8; 32]> {
        self.commitments.get(&EpochParticipant {
            epoch,
            participant: *participant,
        })
    }
}

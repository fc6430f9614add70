use anchor_lang::prelude::*;
use crate::{
    constants::{CATEGORY_COUNT, CATEGORY_TOTAL_SEED},
    contexts::FinalizeEpoch,
    error::{Action, LedgerError},
    instructions::{call_context, load_record, rejected},
    state::{CategoryTotal, EpochAdvanced, EpochFinalized, FinalAggregate, TotalRecord},
};

pub fn handler(ctx: Context<FinalizeEpoch>) -> Result<FinalAggregate> {
    let call = call_context(ctx.accounts.authority.key())?;
    let ledger_key = ctx.accounts.ledger_state.key();
    let existing = ctx.accounts.aggregate.aggregate.clone();
    let control = &mut ctx.accounts.ledger_state.control;
    let profile = control.config().rules.profile;
    let finalized_epoch = control.current_epoch();

    control
        .check_finalize(&call, existing.as_ref())
        .map_err(rejected(Action::FinalizeEpoch, profile))?;

    let totals = read_category_totals(
        ctx.program_id,
        &ledger_key,
        finalized_epoch,
        ctx.remaining_accounts,
    )?;

    let aggregate = control
        .finalize_epoch(&call, existing.as_ref(), &totals)
        .map_err(rejected(Action::FinalizeEpoch, profile))?;
    let new_epoch = control.current_epoch();
    ctx.accounts.aggregate.aggregate = Some(aggregate.clone());

    emit!(EpochFinalized {
        epoch: finalized_epoch,
        total_submissions: aggregate.total_submissions,
        averages: aggregate.averages.clone(),
        tick: call.tick,
    });
    emit!(EpochAdvanced {
        old_epoch: finalized_epoch,
        new_epoch,
        tick: call.tick,
    });

    msg!(
        "📊 Epoch {} finalized: {} submissions, averages {:?}",
        finalized_epoch,
        aggregate.total_submissions,
        aggregate.averages
    );
    msg!("📅 Epoch advanced: {} → {}", finalized_epoch, new_epoch);

    Ok(aggregate)
}

/// Category totals of `epoch` in category order, zero where no PDA exists yet.
///
/// Every account must sit at the derived address for its category so an
/// omitted or substituted total cannot skew the aggregate.
fn read_category_totals(
    program_id: &Pubkey,
    ledger: &Pubkey,
    epoch: u64,
    accounts: &[AccountInfo],
) -> Result<Vec<CategoryTotal>> {
    require_eq!(
        accounts.len(),
        usize::from(CATEGORY_COUNT),
        LedgerError::RecordAccountMismatch
    );

    let epoch_bytes = epoch.to_le_bytes();
    let mut totals = Vec::with_capacity(accounts.len());
    for (category, info) in (0..CATEGORY_COUNT).zip(accounts) {
        let (expected, _) = Pubkey::find_program_address(
            &[CATEGORY_TOTAL_SEED, ledger.as_ref(), &epoch_bytes, &[category]],
            program_id,
        );
        require_keys_eq!(info.key(), expected, LedgerError::RecordAccountMismatch);

        let total = load_record::<TotalRecord>(info)?
            .map(|record| record.total)
            .unwrap_or_default();
        totals.push(total);
    }
    Ok(totals)
}

use anchor_lang::prelude::*;
use crate::{
    contexts::SubmitData,
    error::{Action, LedgerError},
    instructions::{call_context, rejected},
    ledger::SubmissionInput,
    state::DataSubmitted,
};

pub fn handler(ctx: Context<SubmitData>, input: SubmissionInput) -> Result<()> {
    let call = call_context(ctx.accounts.participant.key())?;
    let accounts = ctx.accounts;
    let control = accounts.ledger_state.control;
    let profile = control.config().rules.profile;
    let epoch = control.current_epoch();

    let location_total = accounts
        .location_total
        .as_ref()
        .map(|record| record.total)
        .unwrap_or_default();

    let plan = control
        .plan_submission(
            &call,
            input,
            accounts.submission.submission.as_ref(),
            accounts.category_total.total,
            location_total,
        )
        .map_err(rejected(Action::Submit, profile))?;

    // The location total account travels with the location, never without it
    match (accounts.location_total.as_mut(), plan.location_total) {
        (Some(record), Some(total)) => record.total = total,
        (None, None) => {}
        _ => {
            msg!("❌ Location total account must be passed exactly when a location is");
            return err!(LedgerError::RecordAccountMismatch);
        }
    }
    accounts.category_total.total = plan.category_total;
    accounts.submission.submission = Some(plan.submission.clone());

    emit!(DataSubmitted {
        epoch,
        participant: call.caller,
        category: plan.submission.category,
        value: plan.submission.value,
        tick: call.tick,
    });

    msg!(
        "✅ Submission recorded (epoch {}, category {})",
        epoch,
        plan.submission.category
    );

    Ok(())
}

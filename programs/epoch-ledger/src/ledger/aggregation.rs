use super::{CallContext, EpochControl, LedgerResult};
use crate::{
    constants::*,
    error::LedgerError,
    state::{CategoryTotal, FinalAggregate},
};

/// Folds per-category totals (indexed by category) into `(total count, floor averages)`.
///
/// Categories without submissions are skipped; the result holds at most
/// [`MAX_AVERAGES`] averages in ascending category order.
pub fn aggregate_totals<'a, I>(totals: I) -> LedgerResult<(u64, Vec<u64>)>
where
    I: IntoIterator<Item = &'a CategoryTotal>,
{
    let mut total_submissions: u64 = 0;
    let mut averages = Vec::new();
    for total in totals.into_iter().filter(|t| t.count > 0) {
        total_submissions = total_submissions
            .checked_add(total.count)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        averages.push(total.sum / total.count);
    }
    if total_submissions == 0 {
        return Err(LedgerError::NoSubmissions);
    }
    averages.truncate(MAX_AVERAGES);
    Ok((total_submissions, averages))
}

impl EpochControl {
    /// Authority, closed flag and an existing aggregate for the current epoch,
    /// in that order. Runs before the category totals are gathered.
    pub fn check_finalize(
        &self,
        ctx: &CallContext,
        existing: Option<&FinalAggregate>,
    ) -> LedgerResult<()> {
        self.require_authority(ctx)?;
        if !self.clock.closed {
            return Err(LedgerError::NotClosed);
        }
        if existing.is_some() {
            return Err(LedgerError::AlreadyFinalized);
        }
        Ok(())
    }

    /// Seals the closed epoch into a [`FinalAggregate`] and opens the next one.
    ///
    /// `totals` are the current epoch's category totals in category order,
    /// zero for categories nobody submitted to. The caller stores the result.
    pub fn finalize_epoch(
        &mut self,
        ctx: &CallContext,
        existing: Option<&FinalAggregate>,
        totals: &[CategoryTotal],
    ) -> LedgerResult<FinalAggregate> {
        self.check_finalize(ctx, existing)?;
        let (total_submissions, averages) = aggregate_totals(totals)?;
        self.advance_epoch(ctx.tick)?;

        Ok(FinalAggregate {
            total_submissions,
            averages,
            finalized_at: ctx.tick,
        })
    }
}

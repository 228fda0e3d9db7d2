//! Even split of an expense total among its participants.

use crate::{EngineError, ExpenseMember, Money, ResultEngine};

/// Splits `total` evenly across `member_ids`, one row per listed id.
///
/// Each row gets `total / n` cents; the `total % n` leftover cents go one
/// each to the last rows, so the shares always sum to `total` exactly
/// (`100.00` over three members gives `33.33`, `33.33`, `33.34`).
///
/// Duplicate ids are kept as separate rows.
pub fn even_split(total: Money, member_ids: &[i64]) -> ResultEngine<Vec<ExpenseMember>> {
    check_total(total)?;
    if member_ids.is_empty() {
        return Err(EngineError::InvalidInput(
            "memberIds must not be empty".to_string(),
        ));
    }

    let count = member_ids.len() as i64;
    let base = total.cents() / count;
    let remainder = (total.cents() % count) as usize;
    let first_bumped = member_ids.len() - remainder;

    Ok(member_ids
        .iter()
        .enumerate()
        .map(|(index, user_id)| {
            let extra = i64::from(index >= first_bumped);
            ExpenseMember::new(*user_id, Money::new(base + extra))
        })
        .collect())
}

/// Expense totals must lie in `0.01..=99999999.99`.
pub(crate) fn check_total(total: Money) -> ResultEngine<()> {
    if !total.is_positive() {
        return Err(EngineError::InvalidInput(
            "totalAmount must be greater than 0".to_string(),
        ));
    }
    if total > Money::MAX_TOTAL {
        return Err(EngineError::InvalidInput(format!(
            "totalAmount must not exceed {}",
            Money::MAX_TOTAL
        )));
    }
    Ok(())
}

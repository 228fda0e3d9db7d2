//! Net pairwise balances.
//!
//! Positive amounts mean the counterparty owes the querying user, negative
//! amounts mean the querying user owes the counterparty.

use std::collections::BTreeMap;

use crate::{EngineError, Expense, Money, ResultEngine};

/// Net amount between the querying user and one other user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Balance {
    pub other_user_id: i64,
    pub amount: Money,
}

/// A split row of `user_id` on an expense paid by someone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Debt {
    pub payer_id: i64,
    pub split_amount: Money,
}

/// Aggregates the balances of `user_id`.
///
/// `paid` are the expenses `user_id` paid (with all their split rows);
/// `owed` are the split rows of `user_id` on expenses paid by others. Every
/// counterparty that appears gets one entry, even when its net is zero.
/// Entries are ordered by counterparty id.
///
/// Fails with `InvalidInput` if a net leaves the `i64` cent range.
pub fn compute_balances(
    user_id: i64,
    paid: &[Expense],
    owed: &[Debt],
) -> ResultEngine<Vec<Balance>> {
    let out_of_range =
        |other: i64| EngineError::InvalidInput(format!("balance with user {other} out of range"));
    let mut net: BTreeMap<i64, Money> = BTreeMap::new();

    for expense in paid {
        for member in expense.members.iter().filter(|m| m.user_id != user_id) {
            let entry = net.entry(member.user_id).or_default();
            *entry = entry
                .checked_add(member.split_amount)
                .ok_or_else(|| out_of_range(member.user_id))?;
        }
    }

    for debt in owed {
        let entry = net.entry(debt.payer_id).or_default();
        *entry = entry
            .checked_sub(debt.split_amount)
            .ok_or_else(|| out_of_range(debt.payer_id))?;
    }

    Ok(net
        .into_iter()
        .map(|(other_user_id, amount)| Balance {
            other_user_id,
            amount,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{ExpenseMember, split::even_split};

    fn expense(id: i64, payer: i64, total: i64, members: &[i64]) -> Expense {
        let now = Utc.timestamp_opt(0, 0).unwrap();
        Expense {
            id,
            description: format!("expense {id}"),
            total_amount: Money::new(total),
            paid_by_user_id: payer,
            created_at: now,
            updated_at: now,
            members: even_split(Money::new(total), members).unwrap(),
        }
    }

    fn debts_of(user_id: i64, expenses: &[Expense]) -> Vec<Debt> {
        expenses
            .iter()
            .filter(|e| e.paid_by_user_id != user_id)
            .flat_map(|e| {
                e.members
                    .iter()
                    .filter(|m| m.user_id == user_id)
                    .map(|m| Debt {
                        payer_id: e.paid_by_user_id,
                        split_amount: m.split_amount,
                    })
            })
            .collect()
    }

    fn paid_by(user_id: i64, expenses: &[Expense]) -> Vec<Expense> {
        expenses
            .iter()
            .filter(|e| e.paid_by_user_id == user_id)
            .cloned()
            .collect()
    }

    fn balances_for(user_id: i64, expenses: &[Expense]) -> Vec<Balance> {
        compute_balances(
            user_id,
            &paid_by(user_id, expenses),
            &debts_of(user_id, expenses),
        )
        .unwrap()
    }

    #[test]
    fn empty_when_not_involved() {
        let expenses = vec![expense(1, 1, 1000, &[1, 2])];
        assert!(balances_for(3, &expenses).is_empty());
        assert!(compute_balances(3, &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn dinner_scenario() {
        let expenses = vec![expense(1, 1, 10_000, &[1, 2, 3])];

        let payer = balances_for(1, &expenses);
        assert_eq!(
            payer,
            vec![
                Balance {
                    other_user_id: 2,
                    amount: Money::new(3333)
                },
                Balance {
                    other_user_id: 3,
                    amount: Money::new(3334)
                },
            ]
        );

        let guest = balances_for(2, &expenses);
        assert_eq!(
            guest,
            vec![Balance {
                other_user_id: 1,
                amount: Money::new(-3333)
            }]
        );
        assert_eq!(guest[0].amount.to_string(), "-33.33");
    }

    #[test]
    fn antisymmetric_between_two_users() {
        let expenses = vec![
            expense(1, 1, 5000, &[1, 2]),
            expense(2, 2, 1234, &[1]),
            expense(3, 1, 999, &[2, 2, 1]),
        ];
        let a = balances_for(1, &expenses);
        let b = balances_for(2, &expenses);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(a[0].other_user_id, 2);
        assert_eq!(b[0].other_user_id, 1);
        assert_eq!(a[0].amount, -b[0].amount);
    }

    #[test]
    fn payer_listed_as_member_is_netted_out() {
        let expenses = vec![expense(1, 1, 1000, &[1])];
        assert!(balances_for(1, &expenses).is_empty());
    }

    #[test]
    fn mutual_debts_accumulate_to_zero_entry() {
        let expenses = vec![expense(1, 1, 1000, &[2]), expense(2, 2, 1000, &[1])];
        assert_eq!(
            balances_for(1, &expenses),
            vec![Balance {
                other_user_id: 2,
                amount: Money::ZERO
            }]
        );
    }

    #[test]
    fn orphan_counterparty_still_reported() {
        let paid = vec![Expense {
            members: vec![ExpenseMember::new(42, Money::new(500))],
            ..expense(1, 1, 500, &[1])
        }];
        assert_eq!(
            compute_balances(1, &paid, &[]).unwrap(),
            vec![Balance {
                other_user_id: 42,
                amount: Money::new(500)
            }]
        );
    }

    #[test]
    fn overflowing_net_is_an_error() {
        let huge = |id| Expense {
            members: vec![ExpenseMember::new(2, Money::new(i64::MAX / 2 + 1))],
            ..expense(id, 1, 100, &[2])
        };
        assert_eq!(
            compute_balances(1, &[huge(1), huge(2)], &[]),
            Err(EngineError::InvalidInput(
                "balance with user 2 out of range".to_string()
            ))
        );

        let debt = Debt {
            payer_id: 3,
            split_amount: Money::new(i64::MAX),
        };
        assert!(compute_balances(1, &[], &[debt, debt]).is_err());
    }
}

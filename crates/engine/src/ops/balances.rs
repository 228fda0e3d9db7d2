use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Balance, CurrencyCode, Debt, EngineError, ResultEngine, compute_balances, expense_members,
    expenses,
};

use super::{Engine, with_tx};

/// Balances of one user against everyone it shares expenses with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSheet {
    pub user_id: i64,
    pub currency: CurrencyCode,
    pub balances: Vec<Balance>,
}

impl Engine {
    /// Computes the net balance of `user_id` toward every counterparty.
    ///
    /// Reads the expenses the user paid (with their split rows) and the
    /// user's split rows on expenses paid by others, then aggregates them
    /// with [`compute_balances`].
    pub async fn balances(&self, user_id: i64) -> ResultEngine<BalanceSheet> {
        with_tx!(self, |db_tx| {
            let user = self.require_user(&db_tx, user_id).await?;
            let currency = CurrencyCode::try_from(user.currency.as_str())?;

            let paid_models = expenses::Entity::find()
                .filter(expenses::Column::PaidByUserId.eq(user_id))
                .order_by_asc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            let paid = self.with_members(&db_tx, paid_models).await?;

            let owed = expense_members::Entity::find()
                .find_also_related(expenses::Entity)
                .filter(expense_members::Column::UserId.eq(user_id))
                .filter(expenses::Column::PaidByUserId.ne(user_id))
                .order_by_asc(expense_members::Column::Id)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|(member, expense)| {
                    let expense = expense.ok_or_else(|| {
                        EngineError::KeyNotFound("Expense not found".to_string())
                    })?;
                    Ok(Debt {
                        payer_id: expense.paid_by_user_id,
                        split_amount: member.split_amount.into(),
                    })
                })
                .collect::<ResultEngine<Vec<Debt>>>()?;

            Ok(BalanceSheet {
                user_id,
                currency,
                balances: compute_balances(user_id, &paid, &owed)?,
            })
        })
    }
}

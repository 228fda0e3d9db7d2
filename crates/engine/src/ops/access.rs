use std::collections::{BTreeSet, HashMap};

use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{EngineError, Expense, ResultEngine, expense_members, expenses, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_user(
        &self,
        db: &DatabaseTransaction,
        user_id: i64,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("User not found".to_string()))
    }

    /// Fails with `KeyNotFound` unless every id references an existing user.
    pub(super) async fn require_users_exist(
        &self,
        db: &DatabaseTransaction,
        user_ids: &[i64],
    ) -> ResultEngine<()> {
        let wanted: BTreeSet<i64> = user_ids.iter().copied().collect();
        let found = users::Entity::find()
            .filter(users::Column::Id.is_in(wanted.iter().copied()))
            .all(db)
            .await?;
        if found.len() != wanted.len() {
            let found: BTreeSet<i64> = found.into_iter().map(|u| u.id).collect();
            let missing: Vec<String> = wanted
                .difference(&found)
                .map(ToString::to_string)
                .collect();
            return Err(EngineError::KeyNotFound(format!(
                "User not found: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub(super) async fn require_expense(
        &self,
        db: &DatabaseTransaction,
        expense_id: i64,
    ) -> ResultEngine<expenses::Model> {
        expenses::Entity::find_by_id(expense_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Expense not found".to_string()))
    }

    /// Loads the expense and checks that `user_id` paid it.
    pub(super) async fn require_expense_payer(
        &self,
        db: &DatabaseTransaction,
        expense_id: i64,
        user_id: i64,
        action: &str,
    ) -> ResultEngine<expenses::Model> {
        let expense = self.require_expense(db, expense_id).await?;
        if expense.paid_by_user_id != user_id {
            tracing::warn!(
                expense_id,
                user_id,
                payer = expense.paid_by_user_id,
                "rejected {action} by non-payer"
            );
            return Err(EngineError::Forbidden(format!(
                "Only the payer can {action} this expense"
            )));
        }
        Ok(expense)
    }

    /// Attaches split rows (in insertion order) to each expense, keeping the
    /// order of `models`.
    pub(super) async fn with_members(
        &self,
        db: &DatabaseTransaction,
        models: Vec<expenses::Model>,
    ) -> ResultEngine<Vec<Expense>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let rows = expense_members::Entity::find()
            .filter(expense_members::Column::ExpenseId.is_in(ids))
            .order_by_asc(expense_members::Column::Id)
            .all(db)
            .await?;

        let mut by_expense: HashMap<i64, Vec<expense_members::Model>> = HashMap::new();
        for row in rows {
            by_expense.entry(row.expense_id).or_default().push(row);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let members = by_expense.remove(&model.id).unwrap_or_default();
                Expense::from((model, members))
            })
            .collect())
    }
}

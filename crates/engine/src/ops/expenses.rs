use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Query,
};

use crate::{
    EngineError, Expense, ResultEngine, even_split, expense_members, expenses, split::check_total,
};

use super::{Engine, ExpenseNew, ExpenseUpdate, normalize_required_text, with_tx};

impl Engine {
    /// Records an expense paid by `payer_id` and splits it evenly among
    /// `member_ids`.
    ///
    /// The expense row and its split rows are written in one transaction.
    pub async fn add_expense(&self, payer_id: i64, input: ExpenseNew) -> ResultEngine<Expense> {
        let description = normalize_required_text(&input.description, "description")?;
        let members = even_split(input.total_amount, &input.member_ids)?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, payer_id).await?;
            self.require_users_exist(&db_tx, &input.member_ids).await?;

            let now = Utc::now();
            let model = expenses::ActiveModel {
                id: ActiveValue::NotSet,
                description: ActiveValue::Set(description),
                total_amount: ActiveValue::Set(input.total_amount.cents()),
                paid_by_user_id: ActiveValue::Set(payer_id),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            expense_members::Entity::insert_many(
                members.iter().map(|member| member.active_model(model.id, now)),
            )
            .exec(&db_tx)
            .await?;

            tracing::debug!(
                expense_id = model.id,
                payer_id,
                members = members.len(),
                "expense created"
            );
            Ok(Expense {
                members,
                ..Expense::from((model, Vec::new()))
            })
        })
    }

    /// Lists every expense `user_id` paid or shares, newest first.
    pub async fn expenses(&self, user_id: i64) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            let participations = Query::select()
                .column(expense_members::Column::ExpenseId)
                .from(expense_members::Entity)
                .and_where(expense_members::Column::UserId.eq(user_id))
                .to_owned();

            let models = expenses::Entity::find()
                .filter(
                    Condition::any()
                        .add(expenses::Column::PaidByUserId.eq(user_id))
                        .add(expenses::Column::Id.in_subquery(participations)),
                )
                .order_by_desc(expenses::Column::CreatedAt)
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?;

            self.with_members(&db_tx, models).await
        })
    }

    /// Returns one expense, visible to its payer and participants only.
    pub async fn expense(&self, expense_id: i64, user_id: i64) -> ResultEngine<Expense> {
        with_tx!(self, |db_tx| {
            let model = self.require_expense(&db_tx, expense_id).await?;
            let expense = self.load_expense(&db_tx, model).await?;
            if !expense.involves(user_id) {
                return Err(EngineError::KeyNotFound("Expense not found".to_string()));
            }
            Ok(expense)
        })
    }

    /// Updates an expense (payer only).
    ///
    /// When the amount or the member list is given, the split rows are
    /// deleted and regenerated, from the given members or from the current
    /// participants, inside the same transaction as the expense update.
    pub async fn update_expense(
        &self,
        expense_id: i64,
        user_id: i64,
        input: ExpenseUpdate,
    ) -> ResultEngine<Expense> {
        let description = input
            .description
            .as_deref()
            .map(|d| normalize_required_text(d, "description"))
            .transpose()?;
        if let Some(total) = input.total_amount {
            check_total(total)?;
        }
        if let Some(ids) = &input.member_ids
            && ids.is_empty()
        {
            return Err(EngineError::InvalidInput(
                "memberIds must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = self
                .require_expense_payer(&db_tx, expense_id, user_id, "edit")
                .await?;
            if let Some(ids) = &input.member_ids {
                self.require_users_exist(&db_tx, ids).await?;
            }

            let resplit = input.total_amount.is_some() || input.member_ids.is_some();
            let mut active: expenses::ActiveModel = model.into();
            if let Some(description) = description {
                active.description = ActiveValue::Set(description);
            }
            if let Some(total) = input.total_amount {
                active.total_amount = ActiveValue::Set(total.cents());
            }
            let now = Utc::now();
            active.updated_at = ActiveValue::Set(now);
            let model = active.update(&db_tx).await?;

            if resplit {
                let member_ids = match input.member_ids {
                    Some(ids) => ids,
                    None => self.load_expense(&db_tx, model.clone()).await?.member_ids(),
                };
                let members = even_split(model.total_amount.into(), &member_ids)?;

                expense_members::Entity::delete_many()
                    .filter(expense_members::Column::ExpenseId.eq(expense_id))
                    .exec(&db_tx)
                    .await?;
                expense_members::Entity::insert_many(
                    members.iter().map(|member| member.active_model(expense_id, now)),
                )
                .exec(&db_tx)
                .await?;

                tracing::debug!(expense_id, members = members.len(), "expense re-split");
            }

            self.load_expense(&db_tx, model).await
        })
    }

    /// Deletes an expense and its split rows (payer only).
    pub async fn delete_expense(&self, expense_id: i64, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_expense_payer(&db_tx, expense_id, user_id, "delete")
                .await?;
            expense_members::Entity::delete_many()
                .filter(expense_members::Column::ExpenseId.eq(expense_id))
                .exec(&db_tx)
                .await?;
            expenses::Entity::delete_by_id(expense_id)
                .exec(&db_tx)
                .await?;
            tracing::debug!(expense_id, "expense deleted");
            Ok(())
        })
    }

    async fn load_expense(
        &self,
        db: &sea_orm::DatabaseTransaction,
        model: expenses::Model,
    ) -> ResultEngine<Expense> {
        let mut loaded = self.with_members(db, vec![model]).await?;
        loaded
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("Expense not found".to_string()))
    }
}

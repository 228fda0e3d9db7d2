//! The module contains the `Expense` type and its table.
//!
//! An expense is fronted by one user (the payer) and split evenly among a
//! list of participants; each participant's share is an
//! [`ExpenseMember`](crate::ExpenseMember) row.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{ExpenseMember, Money};

/// A shared expense together with its split rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub total_amount: Money,
    pub paid_by_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub members: Vec<ExpenseMember>,
}

impl Expense {
    /// Returns the participant ids in split-row order (duplicates kept).
    pub fn member_ids(&self) -> Vec<i64> {
        self.members.iter().map(|member| member.user_id).collect()
    }

    /// Returns `true` if `user_id` paid or shares this expense.
    pub fn involves(&self, user_id: i64) -> bool {
        self.paid_by_user_id == user_id || self.members.iter().any(|m| m.user_id == user_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub description: String,
    pub total_amount: i64,
    pub paid_by_user_id: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expense_members::Entity")]
    Members,
}

impl Related<super::expense_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<(Model, Vec<super::expense_members::Model>)> for Expense {
    fn from((model, members): (Model, Vec<super::expense_members::Model>)) -> Self {
        Self {
            id: model.id,
            description: model.description,
            total_amount: Money::new(model.total_amount),
            paid_by_user_id: model.paid_by_user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            members: members.into_iter().map(ExpenseMember::from).collect(),
        }
    }
}

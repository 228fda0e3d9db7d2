//! Split rows: one participant's share of one expense.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::Money;

/// A participant's owed share of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpenseMember {
    pub user_id: i64,
    pub split_amount: Money,
}

impl ExpenseMember {
    pub fn new(user_id: i64, split_amount: Money) -> Self {
        Self {
            user_id,
            split_amount,
        }
    }

    /// Builds the row to insert for `expense_id`.
    pub(crate) fn active_model(
        &self,
        expense_id: i64,
        created_at: DateTimeUtc,
    ) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            expense_id: ActiveValue::Set(expense_id),
            user_id: ActiveValue::Set(self.user_id),
            split_amount: ActiveValue::Set(self.split_amount.cents()),
            created_at: ActiveValue::Set(created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub expense_id: i64,
    pub user_id: i64,
    pub split_amount: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expenses::Entity",
        from = "Column::ExpenseId",
        to = "super::expenses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExpenseMember {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            split_amount: Money::new(model.split_amount),
        }
    }
}

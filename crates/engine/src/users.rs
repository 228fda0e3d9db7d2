//! The module contains the `User` account and its table.
//!
//! Users are identified by an integer id; the email is unique. The password is
//! stored and compared as plain text.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{CurrencyCode, EngineError};

/// An account holder.
///
/// The password never leaves the engine: it is only read by login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub currency: CurrencyCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub currency: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            email: model.email,
            currency: CurrencyCode::try_from(model.currency.as_str())?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{CurrencyCode, EngineError, ResultEngine, User, users};

use super::{Engine, ProfileUpdate, Signup, normalize_required_text, with_tx};

impl Engine {
    /// Opens a new account.
    ///
    /// The email must not belong to another user; the currency defaults to
    /// [`CurrencyCode::DEFAULT`].
    pub async fn signup(&self, input: Signup) -> ResultEngine<User> {
        let name = normalize_required_text(&input.name, "name")?;
        let email = normalize_required_text(&input.email, "email")?;
        if input.password.is_empty() {
            return Err(EngineError::InvalidInput("password is required".to_string()));
        }
        let currency = match input.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => CurrencyCode::try_from(code)?,
            _ => CurrencyCode::default(),
        };

        with_tx!(self, |db_tx| {
            if self.email_taken(&db_tx, &email, None).await? {
                return Err(EngineError::ExistingKey(email));
            }

            let now = Utc::now();
            let model = users::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                email: ActiveValue::Set(email),
                password: ActiveValue::Set(input.password),
                currency: ActiveValue::Set(currency.code().to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            }
            .insert(&db_tx)
            .await?;

            tracing::debug!(user_id = model.id, "user created");
            User::try_from(model)
        })
    }

    /// Returns the user whose email and password match exactly.
    pub async fn login(&self, email: &str, password: &str) -> ResultEngine<User> {
        let email = normalize_required_text(email, "email")?;
        if password.is_empty() {
            return Err(EngineError::InvalidInput("password is required".to_string()));
        }

        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Password.eq(password))
            .one(&self.database)
            .await?
            .ok_or(EngineError::InvalidCredentials)?;
        User::try_from(model)
    }

    /// Return the user profile.
    pub async fn profile(&self, user_id: i64) -> ResultEngine<User> {
        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            User::try_from(model)
        })
    }

    /// Changes email and/or currency. Absent or blank fields stay as they are.
    pub async fn update_profile(&self, user_id: i64, input: ProfileUpdate) -> ResultEngine<User> {
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);
        let currency = input
            .currency
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(CurrencyCode::try_from)
            .transpose()?;

        with_tx!(self, |db_tx| {
            let model = self.require_user(&db_tx, user_id).await?;
            let mut active: users::ActiveModel = model.into();

            if let Some(email) = email {
                if self.email_taken(&db_tx, &email, Some(user_id)).await? {
                    return Err(EngineError::ExistingKey(email));
                }
                active.email = ActiveValue::Set(email);
            }
            if let Some(currency) = currency {
                active.currency = ActiveValue::Set(currency.code().to_string());
            }
            active.updated_at = ActiveValue::Set(Utc::now());

            let model = active.update(&db_tx).await?;
            User::try_from(model)
        })
    }

    /// Deletes the account.
    ///
    /// Expenses and split rows that reference the user are left untouched.
    pub async fn delete_user(&self, user_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            users::Entity::delete_by_id(user_id).exec(&db_tx).await?;
            tracing::debug!(user_id, "user deleted");
            Ok(())
        })
    }

    async fn email_taken(
        &self,
        db: &sea_orm::DatabaseTransaction,
        email: &str,
        except: Option<i64>,
    ) -> ResultEngine<bool> {
        let mut query = users::Entity::find().filter(users::Column::Email.eq(email));
        if let Some(user_id) = except {
            query = query.filter(users::Column::Id.ne(user_id));
        }
        Ok(query.one(db).await?.is_some())
    }
}

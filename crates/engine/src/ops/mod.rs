use sea_orm::DatabaseConnection;

use crate::{EngineError, Money, ResultEngine};

mod access;
mod balances;
mod expenses;
mod users;

pub use balances::BalanceSheet;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger: every account, expense and balance operation goes through it.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Closes the underlying connection pool.
    pub async fn shutdown(self) -> ResultEngine<()> {
        self.database.close().await.map_err(Into::into)
    }
}

/// Data required to open an account.
#[derive(Clone, Debug, Default)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub currency: Option<String>,
}

/// Profile fields a user may change; `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub currency: Option<String>,
}

/// A new expense paid by the calling user.
#[derive(Clone, Debug)]
pub struct ExpenseNew {
    pub description: String,
    pub total_amount: Money,
    pub member_ids: Vec<i64>,
}

/// Partial expense update; `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub total_amount: Option<Money>,
    pub member_ids: Option<Vec<i64>>,
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(
            normalize_required_text("  Dinner ", "description").unwrap(),
            "Dinner"
        );
    }

    #[test]
    fn blank_required_text_is_rejected() {
        assert_eq!(
            normalize_required_text("   ", "description"),
            Err(EngineError::InvalidInput(
                "description is required".to_string()
            ))
        );
    }
}

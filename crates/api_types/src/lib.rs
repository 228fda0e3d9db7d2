use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Money as accepted in requests: a JSON number (`100`, `45.5`) or a decimal
/// string (`"45.50"`).
///
/// Responses always carry amounts as strings with two decimals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Returns the decimal text of the amount, ready to be parsed.
    ///
    /// Numbers use the shortest representation that round-trips, so `0.1`
    /// becomes `"0.1"` and `100` becomes `"100"`.
    pub fn as_decimal_text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Signup {
        pub name: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
        pub currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub email: Option<String>,
        pub currency: Option<String>,
    }

    /// A user as returned by the API (the password is never sent back).
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: i64,
        pub name: String,
        pub email: String,
        pub currency: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct LoginResponse {
        pub message: String,
        pub user_id: i64,
        pub user: User,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub description: Option<String>,
        pub total_amount: Option<Amount>,
        pub member_ids: Option<Vec<i64>>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub description: Option<String>,
        pub total_amount: Option<Amount>,
        pub member_ids: Option<Vec<i64>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Member {
        pub user_id: i64,
        pub split_amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        pub id: i64,
        pub description: String,
        pub total_amount: String,
        pub paid_by_user_id: i64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
        pub members: Vec<Member>,
    }
}

pub mod balance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Balance {
        pub other_user_id: i64,
        pub amount: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalancesResponse {
        pub user_id: i64,
        pub currency: String,
        pub balances: Vec<Balance>,
    }
}

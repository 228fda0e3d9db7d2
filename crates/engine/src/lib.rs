//! Expense-splitting ledger engine.
//!
//! The [`Engine`] owns the database handle and exposes the user account,
//! expense lifecycle and balance operations. Amounts are [`Money`] values in
//! integer minor units.

pub use balances::{Balance, Debt, compute_balances};
pub use currency::CurrencyCode;
pub use error::EngineError;
pub use expense_members::ExpenseMember;
pub use expenses::Expense;
pub use money::Money;
pub use ops::{
    BalanceSheet, Engine, EngineBuilder, ExpenseNew, ExpenseUpdate, ProfileUpdate, Signup,
};
pub use split::even_split;
pub use users::User;

mod balances;
mod currency;
mod error;
mod expense_members;
mod expenses;
mod money;
mod ops;
mod split;
mod users;

type ResultEngine<T> = Result<T, EngineError>;

// Bank errors - every failure a console command can report
//
// None of these are fatal: the console prints the message and shows the
// menu again. Display strings are the exact lines the user sees.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BankError {
    /// Deposit, withdraw or balance check before any account exists
    #[error("No account found. Please create an account first.")]
    NoActiveAccount,

    /// Deposit of zero, a negative amount, or NaN
    #[error("Deposit amount must be positive.")]
    InvalidAmount(f64),

    /// Withdrawal that is non-positive or larger than the balance.
    /// Both causes print the same line.
    #[error("Insufficient balance or invalid amount.")]
    InsufficientFundsOrInvalidAmount { requested: f64, available: f64 },

    #[error("Invalid choice. Please try again.")]
    InvalidChoice(String),

    #[error("Invalid number '{0}'. Please enter a numeric amount.")]
    MalformedNumericInput(String),

    /// Anything other than exactly 5 ASCII digits
    #[error("Invalid account number '{0}'.")]
    InvalidAccountNumber(String),
}

pub type BankResult<T> = std::result::Result<T, BankError>;

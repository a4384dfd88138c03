// 💳 Account Entity - one holder, one balance, one 5-digit number
//
// The account number is assigned once at opening and never changes.
// Balance moves only through deposit/withdraw, which validate the amount.
// The opening deposit is taken as given.
//
// The registry keeps a handle to every account ever opened, keyed by
// number. Numbers are random and may collide: a later account silently
// takes over the slot.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{BankError, BankResult};

/// Exclusive upper bound of the number space (00000..=99999)
pub const ACCOUNT_NUMBER_SPACE: u32 = 100_000;

/// Width of a rendered account number
pub const ACCOUNT_NUMBER_WIDTH: usize = 5;

// ============================================================================
// ACCOUNT NUMBER
// ============================================================================

/// Zero-padded 5-digit account number, e.g. "04821"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Draw a uniformly random number in [0, 100000) and pad it to 5 digits
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let raw = rng.gen_range(0..ACCOUNT_NUMBER_SPACE);
        Self::from_raw(raw)
    }

    fn from_raw(raw: u32) -> Self {
        AccountNumber(format!("{:0width$}", raw, width = ACCOUNT_NUMBER_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = BankError;

    fn try_from(value: String) -> BankResult<Self> {
        let well_formed = value.len() == ACCOUNT_NUMBER_WIDTH && value.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(BankError::InvalidAccountNumber(value));
        }
        Ok(AccountNumber(value))
    }
}

// Lets the registry be queried with a plain &str
impl std::borrow::Borrow<str> for AccountNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Assigned at opening, never reassigned
    number: AccountNumber,

    /// Immutable after opening
    holder_name: String,

    balance: f64,

    opened_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with the given number and opening deposit.
    ///
    /// The opening deposit is not validated: a zero or negative value is
    /// accepted as the starting balance.
    pub fn open(number: AccountNumber, holder_name: impl Into<String>, initial_deposit: f64) -> Self {
        Account {
            number,
            holder_name: holder_name.into(),
            balance: initial_deposit,
            opened_at: Utc::now(),
        }
    }

    /// Add a strictly positive amount, returning the new balance
    pub fn deposit(&mut self, amount: f64) -> BankResult<f64> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(BankError::InvalidAmount(amount));
        }
        self.balance += amount;
        Ok(self.balance)
    }

    /// Take out a strictly positive amount no larger than the balance
    pub fn withdraw(&mut self, amount: f64) -> BankResult<f64> {
        if amount.is_nan() || amount <= 0.0 || amount > self.balance {
            return Err(BankError::InsufficientFundsOrInvalidAmount {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }

    pub fn number(&self) -> &AccountNumber {
        &self.number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }
}

/// Shared handle: the session and the registry see the same record
pub type AccountHandle = Rc<RefCell<Account>>;

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// Every account opened in this process, keyed by number.
///
/// Entries are never removed. Registering a number that is already present
/// replaces the earlier entry.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<AccountNumber, AccountHandle>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        AccountRegistry {
            accounts: HashMap::new(),
        }
    }

    /// Insert under the account's own number, overwriting on collision
    pub fn register(&mut self, account: AccountHandle) {
        let number = account.borrow().number().clone();
        if let Some(previous) = self.accounts.insert(number.clone(), account) {
            tracing::warn!(
                account_number = %number,
                replaced_holder = %previous.borrow().holder_name(),
                "account number collision, earlier registry entry replaced"
            );
        }
    }

    pub fn lookup(&self, number: &str) -> Option<AccountHandle> {
        self.accounts.get(number).map(Rc::clone)
    }

    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Registered numbers in ascending order
    pub fn numbers(&self) -> Vec<AccountNumber> {
        let mut numbers: Vec<AccountNumber> = self.accounts.keys().cloned().collect();
        numbers.sort();
        numbers
    }
}

// ============================================================================
// TESTS
// ============================================================================

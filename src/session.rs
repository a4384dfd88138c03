// Account Session - the single "current account" slot and its commands
//
// States: NoAccount -> HasAccount on create; create again overwrites the
// slot. Deposit, withdraw and balance need an account and report
// NoActiveAccount otherwise, leaving state untouched.

use rand::rngs::ThreadRng;
use rand::Rng;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entities::{Account, AccountHandle, AccountNumber, AccountRegistry};
use crate::error::{BankError, BankResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoAccount,
    HasAccount,
}

/// One console session: at most one active account, plus the registry of
/// every account opened through it.
pub struct AccountSession<R: Rng = ThreadRng> {
    active: Option<AccountHandle>,
    registry: AccountRegistry,
    rng: R,
}

impl AccountSession<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for AccountSession<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> AccountSession<R> {
    /// Session with an empty registry and the given number generator
    pub fn with_rng(rng: R) -> Self {
        Self::with_parts(AccountRegistry::new(), rng)
    }

    /// Session writing into an existing registry
    pub fn with_parts(registry: AccountRegistry, rng: R) -> Self {
        AccountSession {
            active: None,
            registry,
            rng,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.active {
            Some(_) => SessionState::HasAccount,
            None => SessionState::NoAccount,
        }
    }

    /// Open a new account and make it the active one.
    ///
    /// Always succeeds. The previous active account, if any, drops out of
    /// the session but stays in the registry.
    pub fn create_account(&mut self, holder_name: impl Into<String>, initial_deposit: f64) -> AccountHandle {
        let number = AccountNumber::generate(&mut self.rng);
        let account = Rc::new(RefCell::new(Account::open(number.clone(), holder_name, initial_deposit)));

        self.registry.register(Rc::clone(&account));
        if let Some(previous) = self.active.replace(Rc::clone(&account)) {
            tracing::debug!(
                previous = %previous.borrow().number(),
                current = %number,
                "active account replaced"
            );
        }

        tracing::info!(account_number = %number, initial_deposit, "account created");
        account
    }

    /// Deposit into the active account, returning the new balance
    pub fn deposit(&mut self, amount: f64) -> BankResult<f64> {
        let account = self.require_active()?;
        let result = account.borrow_mut().deposit(amount);
        match &result {
            Ok(balance) => tracing::debug!(amount, balance, "deposit accepted"),
            Err(e) => tracing::debug!(amount, error = %e, "deposit rejected"),
        }
        result
    }

    /// Withdraw from the active account, returning the new balance
    pub fn withdraw(&mut self, amount: f64) -> BankResult<f64> {
        let account = self.require_active()?;
        let result = account.borrow_mut().withdraw(amount);
        match &result {
            Ok(balance) => tracing::debug!(amount, balance, "withdrawal accepted"),
            Err(e) => tracing::debug!(amount, error = %e, "withdrawal rejected"),
        }
        result
    }

    /// Read-only
    pub fn check_balance(&self) -> BankResult<f64> {
        let account = self.require_active()?;
        let balance = account.borrow().balance();
        Ok(balance)
    }

    pub fn active_account(&self) -> Option<&AccountHandle> {
        self.active.as_ref()
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    fn require_active(&self) -> BankResult<&AccountHandle> {
        self.active.as_ref().ok_or_else(|| {
            tracing::debug!("command needs an account but none is active");
            BankError::NoActiveAccount
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> AccountSession<StdRng> {
        AccountSession::with_rng(StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_new_session_has_no_account() {
        let session = session();
        assert_eq!(session.state(), SessionState::NoAccount);
        assert!(session.active_account().is_none());
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_create_account_activates_and_registers() {
        let mut session = session();
        let account = session.create_account("Alice", 100.0);

        assert_eq!(session.state(), SessionState::HasAccount);
        assert_eq!(session.check_balance(), Ok(100.0));

        let number = account.borrow().number().clone();
        assert_eq!(number.as_str().len(), 5);
        assert!(number.as_str().chars().all(|c| c.is_ascii_digit()));

        let registered = session.registry().lookup(number.as_str()).unwrap();
        assert!(Rc::ptr_eq(&registered, &account));
    }

    #[test]
    fn test_alice_scenario() {
        let mut session = session();
        session.create_account("Alice", 100.0);

        assert_eq!(session.deposit(50.0), Ok(150.0));
        assert!(matches!(
            session.withdraw(200.0),
            Err(BankError::InsufficientFundsOrInvalidAmount { .. })
        ));
        assert_eq!(session.check_balance(), Ok(150.0));
        assert_eq!(session.withdraw(150.0), Ok(0.0));
        assert_eq!(session.check_balance(), Ok(0.0));
    }

    #[test]
    fn test_commands_without_account_leave_state_unchanged() {
        let mut session = session();

        assert_eq!(session.deposit(10.0), Err(BankError::NoActiveAccount));
        assert_eq!(session.withdraw(10.0), Err(BankError::NoActiveAccount));
        assert_eq!(session.check_balance(), Err(BankError::NoActiveAccount));

        assert_eq!(session.state(), SessionState::NoAccount);
        assert!(session.registry().is_empty());
    }

    #[test]
    fn test_invalid_deposit_reports_invalid_amount() {
        let mut session = session();
        session.create_account("Alice", 100.0);

        assert_eq!(session.deposit(-3.0), Err(BankError::InvalidAmount(-3.0)));
        assert_eq!(session.check_balance(), Ok(100.0));
    }

    #[test]
    fn test_second_create_replaces_active_account() {
        let mut session = session();
        let first = session.create_account("Alice", 100.0);
        session.deposit(25.0).unwrap();
        let second = session.create_account("Bob", 5.0);

        let active = session.active_account().unwrap();
        assert!(Rc::ptr_eq(active, &second));
        assert_eq!(session.check_balance(), Ok(5.0));

        // The first account is only reachable through the registry now
        let first_number = first.borrow().number().clone();
        let archived = session.registry().lookup(first_number.as_str()).unwrap();
        assert_eq!(archived.borrow().holder_name(), "Alice");
        assert_eq!(archived.borrow().balance(), 125.0);
    }

    #[test]
    fn test_with_parts_writes_into_given_registry() {
        let mut session = AccountSession::with_parts(AccountRegistry::new(), StdRng::seed_from_u64(1));
        session.create_account("Alice", 1.0);
        session.create_account("Bob", 2.0);
        session.create_account("Carol", 3.0);

        // Seeded draws from a 100k space; three distinct numbers
        assert_eq!(session.registry().count(), 3);
    }
}

// Balance invariants checked over generated amounts

use console_bank::{AccountSession, BankError, SessionState};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn session_with(balance: f64, seed: u64) -> AccountSession<StdRng> {
    let mut session = AccountSession::with_rng(StdRng::seed_from_u64(seed));
    session.create_account("Prop", balance);
    session
}

proptest! {
    #[test]
    fn deposit_positive_adds(balance in 0.0f64..1e9, amount in 0.01f64..1e9, seed in any::<u64>()) {
        let mut session = session_with(balance, seed);
        prop_assert_eq!(session.deposit(amount), Ok(balance + amount));
        prop_assert_eq!(session.check_balance(), Ok(balance + amount));
    }

    #[test]
    fn deposit_non_positive_is_rejected(balance in 0.0f64..1e9, amount in -1e9f64..=0.0, seed in any::<u64>()) {
        let mut session = session_with(balance, seed);
        prop_assert_eq!(session.deposit(amount), Err(BankError::InvalidAmount(amount)));
        prop_assert_eq!(session.check_balance(), Ok(balance));
    }

    #[test]
    fn withdraw_within_balance_subtracts(balance in 0.01f64..1e9, fraction in 0.0001f64..=1.0, seed in any::<u64>()) {
        let amount = balance * fraction;
        prop_assume!(amount > 0.0 && amount <= balance);
        let mut session = session_with(balance, seed);
        prop_assert_eq!(session.withdraw(amount), Ok(balance - amount));
    }

    #[test]
    fn withdraw_outside_range_leaves_balance(balance in 0.0f64..1e6, excess in 0.01f64..1e6, negative in -1e6f64..=0.0, seed in any::<u64>()) {
        let mut session = session_with(balance, seed);
        let too_much = session.withdraw(balance + excess);
        let is_rejected = matches!(too_much, Err(BankError::InsufficientFundsOrInvalidAmount { .. }));
        prop_assert!(is_rejected);
        prop_assert!(session.withdraw(negative).is_err());
        prop_assert_eq!(session.check_balance(), Ok(balance));
    }

    #[test]
    fn check_balance_is_idempotent(balance in -1e9f64..1e9, reads in 1usize..20, seed in any::<u64>()) {
        let session = session_with(balance, seed);
        for _ in 0..reads {
            prop_assert_eq!(session.check_balance(), Ok(balance));
        }
    }

    #[test]
    fn created_numbers_are_five_digits(seed in any::<u64>()) {
        let mut session = AccountSession::with_rng(StdRng::seed_from_u64(seed));
        let account = session.create_account("Prop", 0.0);
        let number = account.borrow().number().to_string();
        prop_assert_eq!(number.len(), 5);
        prop_assert!(number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn commands_without_account_change_nothing(amount in -1e6f64..1e6, seed in any::<u64>()) {
        let mut session = AccountSession::with_rng(StdRng::seed_from_u64(seed));
        prop_assert_eq!(session.deposit(amount), Err(BankError::NoActiveAccount));
        prop_assert_eq!(session.withdraw(amount), Err(BankError::NoActiveAccount));
        prop_assert_eq!(session.check_balance(), Err(BankError::NoActiveAccount));
        prop_assert_eq!(session.state(), SessionState::NoAccount);
        prop_assert!(session.registry().is_empty());
    }
}

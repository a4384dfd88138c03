// Console Bank - Core Library
// Exposes the account model, the session and the console loop for the
// binary and the integration tests

pub mod config;
pub mod entities;
pub mod error;
pub mod menu;
pub mod session;

// Re-export commonly used types
pub use config::BankConfig;
pub use entities::{Account, AccountHandle, AccountNumber, AccountRegistry};
pub use error::{BankError, BankResult};
pub use menu::{format_amount, parse_amount, Console, MenuChoice};
pub use session::{AccountSession, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

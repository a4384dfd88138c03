// Entity Models
//
// Account is the only entity: a record with a stable number and a mutable
// balance, plus the registry that remembers every account opened.

pub mod account;

pub use account::{
    Account, AccountHandle, AccountNumber, AccountRegistry,
    ACCOUNT_NUMBER_SPACE, ACCOUNT_NUMBER_WIDTH,
};

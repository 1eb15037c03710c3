//! Banana currency.

mod wallet;

pub use wallet::{BalanceChanged, Wallet, WalletError};

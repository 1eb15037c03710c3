use crate::error::{ErrorSeverity, GameError};
use crate::notify::{Observers, SubscriptionId};

/// Notification sent after every balance mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceChanged {
    /// Balance after the change.
    pub balance: u64,
    /// Signed change that produced `balance`.
    pub delta: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("insufficient bananas: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
}

impl GameError for WalletError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientFunds { .. } => "WALLET_INSUFFICIENT_FUNDS",
        }
    }
}

/// Non-negative banana balance.
///
/// Every mutation is a single check-and-set on `&mut self`, so a spend can
/// never observe a stale balance. Observers run synchronously after the
/// balance has been updated.
#[derive(Debug, Default)]
pub struct Wallet {
    balance: u64,
    observers: Observers<BalanceChanged>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a wallet from a persisted balance. No notification is sent.
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            observers: Observers::new(),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    /// Credits `amount`. Adding zero is a silent no-op.
    pub fn add(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.balance = self.balance.saturating_add(amount);
        self.notify(signed(amount));
    }

    /// Debits `amount` if the balance covers it.
    ///
    /// Returns `false` and leaves the balance untouched otherwise. Spending
    /// zero always succeeds without notifying.
    pub fn try_spend(&mut self, amount: u64) -> bool {
        if amount == 0 {
            return true;
        }
        if self.balance < amount {
            return false;
        }
        self.balance -= amount;
        self.notify(-signed(amount));
        true
    }

    /// [`Wallet::try_spend`] with the shortfall reported as an error.
    pub fn spend(&mut self, amount: u64) -> Result<(), WalletError> {
        let available = self.balance;
        if self.try_spend(amount) {
            Ok(())
        } else {
            Err(WalletError::InsufficientFunds {
                needed: amount,
                available,
            })
        }
    }

    /// Sets the balance to zero and notifies, even if it already was zero.
    pub fn reset(&mut self) {
        let previous = self.balance;
        self.balance = 0;
        self.notify(-signed(previous));
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&BalanceChanged) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn notify(&mut self, delta: i64) {
        let event = BalanceChanged {
            balance: self.balance,
            delta,
        };
        self.observers.notify(&event);
    }
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(wallet: &mut Wallet) -> Rc<RefCell<Vec<BalanceChanged>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        wallet.subscribe(move |event| sink.borrow_mut().push(*event));
        log
    }

    #[test]
    fn add_then_spend_scenario() {
        let mut wallet = Wallet::new();
        wallet.add(50);
        assert_eq!(wallet.balance(), 50);

        assert!(!wallet.try_spend(60));
        assert_eq!(wallet.balance(), 50);

        assert!(wallet.try_spend(50));
        assert_eq!(wallet.balance(), 0);
    }

    #[test]
    fn failed_spend_does_not_notify() {
        let mut wallet = Wallet::with_balance(10);
        let log = recording(&mut wallet);

        assert!(!wallet.try_spend(11));
        assert!(log.borrow().is_empty());

        assert!(wallet.try_spend(4));
        assert_eq!(
            *log.borrow(),
            vec![BalanceChanged {
                balance: 6,
                delta: -4
            }]
        );
    }

    #[test]
    fn zero_amounts_are_silent() {
        let mut wallet = Wallet::with_balance(3);
        let log = recording(&mut wallet);

        wallet.add(0);
        assert!(wallet.try_spend(0));
        assert_eq!(wallet.balance(), 3);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn reset_always_notifies() {
        let mut wallet = Wallet::with_balance(25);
        let log = recording(&mut wallet);

        wallet.reset();
        wallet.reset();

        assert_eq!(wallet.balance(), 0);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[0].delta, -25);
        assert_eq!(log.borrow()[1].delta, 0);
    }

    #[test]
    fn spend_reports_shortfall() {
        let mut wallet = Wallet::with_balance(7);
        let err = wallet.spend(9).unwrap_err();

        assert_eq!(
            err,
            WalletError::InsufficientFunds {
                needed: 9,
                available: 7
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(wallet.balance(), 7);
    }

    #[test]
    fn balance_never_goes_negative() {
        let mut wallet = Wallet::new();
        let ops: [(bool, u64); 8] = [
            (true, 5),
            (false, 3),
            (false, 3),
            (true, 1),
            (false, 10),
            (false, 3),
            (true, 40),
            (false, 41),
        ];
        let mut expected: u64 = 0;
        for (is_add, amount) in ops {
            if is_add {
                wallet.add(amount);
                expected += amount;
            } else if wallet.try_spend(amount) {
                expected -= amount;
            }
            assert_eq!(wallet.balance(), expected);
        }
    }
}

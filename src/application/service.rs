use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::domain::{Account, Identity, parse_amount};
use crate::storage::CsvStore;

use super::LedgerError;

/// Application service providing high-level operations over the account
/// ledger. This is the primary interface for any client (CLI, tests, a
/// future UI).
pub struct LedgerService {
    store: CsvStore,
}

/// The balance held in memory between a successful lookup and the next
/// mutation. Each deposit or withdrawal consumes a session and returns a
/// new one carrying the updated balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Identity,
    pub balance: Decimal,
}

impl LedgerService {
    /// Create a service over the ledger file at the given path. The file
    /// is not touched until an operation runs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            store: CsvStore::new(path),
        }
    }

    /// Create the ledger file if it does not exist yet.
    pub fn init(&self) -> Result<(), LedgerError> {
        Ok(self.store.init()?)
    }

    /// Look up an account by identity and start a session on its balance.
    ///
    /// Names compare case-insensitively, the PIN exactly. A missing
    /// identity is reported as `AccountNotFound` so callers can offer to
    /// create the account instead of failing hard.
    pub fn find_account(
        &self,
        first_name: &str,
        last_name: &str,
        pin: &str,
    ) -> Result<Session, LedgerError> {
        let identity = validated_identity(first_name, last_name, pin)?;
        match self.store.find(&identity)? {
            Some(account) => Ok(Session {
                identity,
                balance: account.balance,
            }),
            None => Err(LedgerError::AccountNotFound {
                first_name: identity.first_name,
                last_name: identity.last_name,
            }),
        }
    }

    /// Append a new account with a zero balance.
    ///
    /// No uniqueness check: creating an identity that already exists
    /// appends a duplicate row, and lookups keep returning the first one.
    pub fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
        pin: &str,
    ) -> Result<Account, LedgerError> {
        let identity = validated_identity(first_name, last_name, pin)?;
        let account = Account::new(&identity);
        self.store.append(&account)?;
        Ok(account)
    }

    /// Add funds to the session's account and persist the new balance.
    pub fn deposit(&self, session: &Session, amount: &str) -> Result<Session, LedgerError> {
        let amount =
            parse_amount(amount).map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?;
        self.adjust(session, amount)
    }

    /// Remove funds from the session's account and persist the new
    /// balance. Fails without touching the store when the amount exceeds
    /// the session balance.
    pub fn withdraw(&self, session: &Session, amount: &str) -> Result<Session, LedgerError> {
        let amount =
            parse_amount(amount).map_err(|_| LedgerError::InvalidAmount(amount.to_string()))?;
        if amount > session.balance {
            return Err(LedgerError::InsufficientFunds {
                balance: session.balance,
                requested: amount,
            });
        }
        self.adjust(session, -amount)
    }

    /// All accounts in file order.
    pub fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        Ok(self.store.accounts()?)
    }

    fn adjust(&self, session: &Session, delta: Decimal) -> Result<Session, LedgerError> {
        let balance = session.balance + delta;
        // An identity that vanished between lookup and rewrite leaves the
        // store untouched; the session still advances.
        self.store.update_balance(&session.identity, balance)?;
        Ok(Session {
            identity: session.identity.clone(),
            balance,
        })
    }
}

fn validated_identity(
    first_name: &str,
    last_name: &str,
    pin: &str,
) -> Result<Identity, LedgerError> {
    let identity = Identity::new(first_name, last_name, pin);
    if identity.first_name.is_empty() {
        return Err(LedgerError::MissingField("first name"));
    }
    if identity.last_name.is_empty() {
        return Err(LedgerError::MissingField("last name"));
    }
    if identity.pin.is_empty() {
        return Err(LedgerError::MissingField("PIN"));
    }
    Ok(identity)
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the ledger file. Field names map onto the file's fixed
/// header columns, so serde can read and append rows directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "First name")]
    pub first_name: String,
    #[serde(rename = "Last name")]
    pub last_name: String,
    #[serde(rename = "PIN")]
    pub pin: String,
    #[serde(rename = "Account Balance")]
    pub balance: Decimal,
}

impl Account {
    /// A freshly created account always starts at a zero balance.
    pub fn new(identity: &Identity) -> Self {
        Self {
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            pin: identity.pin.clone(),
            balance: Decimal::ZERO,
        }
    }
}

/// The (first name, last name, PIN) triple used to locate an account.
/// Names match case-insensitively, the PIN matches exactly. The triple is
/// a de-facto key but the store never enforces uniqueness; lookups take
/// the first matching row in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub first_name: String,
    pub last_name: String,
    pub pin: String,
}

impl Identity {
    /// Build an identity from raw input fields, trimming surrounding
    /// whitespace. Empty-field validation happens in the service layer.
    pub fn new(first_name: &str, last_name: &str, pin: &str) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            pin: pin.trim().to_string(),
        }
    }

    pub fn matches(&self, account: &Account) -> bool {
        self.matches_fields(&account.first_name, &account.last_name, &account.pin)
    }

    /// Compare against raw row fields. Stored fields are trimmed before
    /// comparison so rows with stray padding still match.
    pub fn matches_fields(&self, first_name: &str, last_name: &str, pin: &str) -> bool {
        first_name.trim().to_lowercase() == self.first_name.to_lowercase()
            && last_name.trim().to_lowercase() == self.last_name.to_lowercase()
            && pin.trim() == self.pin
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(first: &str, last: &str, pin: &str) -> Account {
        Account {
            first_name: first.into(),
            last_name: last.into(),
            pin: pin.into(),
            balance: dec!(100),
        }
    }

    #[test]
    fn test_names_match_case_insensitively() {
        let identity = Identity::new("jane", "DOE", "1234");
        assert!(identity.matches(&account("Jane", "Doe", "1234")));
    }

    #[test]
    fn test_pin_matches_exactly() {
        let identity = Identity::new("Jane", "Doe", "1234");
        assert!(!identity.matches(&account("Jane", "Doe", "12345")));
        assert!(!identity.matches(&account("Jane", "Doe", "123")));
    }

    #[test]
    fn test_whitespace_is_ignored_on_both_sides() {
        let identity = Identity::new("  Jane ", "Doe", " 1234 ");
        assert!(identity.matches(&account(" Jane", "Doe ", "1234")));
    }

    #[test]
    fn test_different_name_does_not_match() {
        let identity = Identity::new("Jane", "Doe", "1234");
        assert!(!identity.matches(&account("Janet", "Doe", "1234")));
    }

    #[test]
    fn test_new_account_starts_at_zero() {
        let identity = Identity::new("Sam", "Lee", "9999");
        let account = Account::new(&identity);
        assert_eq!(account.balance, Decimal::ZERO);
        assert_eq!(account.first_name, "Sam");
    }
}

// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use passbook::application::{LedgerService, Session};
use tempfile::TempDir;

/// Helper to create a test service with a temporary ledger file
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("atm.csv");
    let service = LedgerService::open(path);
    service.init()?;
    Ok((service, temp_dir))
}

/// Helper to write a ledger file containing the given rows under the
/// standard header, returning its path
pub fn write_ledger(temp_dir: &TempDir, rows: &[&str]) -> Result<PathBuf> {
    let path = temp_dir.path().join("atm.csv");
    let mut contents = String::from("First name,Last name,PIN,Account Balance\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Helper to create an account and bring it to the given balance
pub fn seed_account(
    service: &LedgerService,
    first_name: &str,
    last_name: &str,
    pin: &str,
    balance: i64,
) -> Result<Session> {
    service.create_account(first_name, last_name, pin)?;
    let session = service.find_account(first_name, last_name, pin)?;
    if balance == 0 {
        return Ok(session);
    }
    Ok(service.deposit(&session, &balance.to_string())?)
}

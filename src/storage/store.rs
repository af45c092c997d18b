use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use crate::domain::{Account, Identity};

/// Fixed header row of the ledger file. Must stay in sync with the serde
/// renames on `Account`.
pub const LEDGER_HEADERS: [&str; 4] = ["First name", "Last name", "PIN", "Account Balance"];

/// Store for persisting and querying accounts in a delimited flat file.
///
/// Every operation is whole-file scoped: open, fully consume or produce,
/// close. Mutations that touch existing rows go through a temporary file
/// renamed over the store, so a crash mid-write leaves the previous
/// contents intact.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the ledger file with its header row. Does nothing if the
    /// file already exists.
    pub fn init(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Failed to create ledger file {}", self.path.display()))?;
        writer.write_record(LEDGER_HEADERS)?;
        writer.flush()?;
        Ok(())
    }

    /// All accounts in file order.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        let mut reader = self.reader()?;
        reader
            .deserialize()
            .collect::<Result<Vec<Account>, csv::Error>>()
            .with_context(|| format!("Failed to read ledger file {}", self.path.display()))
    }

    /// Scan rows in file order and return the first account matching the
    /// identity, if any.
    pub fn find(&self, identity: &Identity) -> Result<Option<Account>> {
        let mut reader = self.reader()?;
        for result in reader.deserialize() {
            let account: Account = result
                .with_context(|| format!("Failed to read ledger file {}", self.path.display()))?;
            if identity.matches(&account) {
                return Ok(Some(account));
            }
        }
        Ok(None)
    }

    /// Append one account row to the end of the file. Existing rows are
    /// not touched.
    pub fn append(&self, account: &Account) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open ledger file {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(account)?;
        writer.flush()?;
        Ok(())
    }

    /// Overwrite the balance column of every row matching the identity and
    /// rewrite the whole store (header + rows) through a temporary file in
    /// the same directory, atomically renamed over the original.
    ///
    /// Non-matching rows pass through with their raw fields unmodified.
    /// Returns whether any row matched; when none does, the file is left
    /// untouched.
    pub fn update_balance(&self, identity: &Identity, balance: Decimal) -> Result<bool> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ledger file {}", self.path.display()))?;
        // Raw records here, not serde: rows that never match must round-trip
        // untouched, whatever their balance cell holds.
        let mut reader = csv::Reader::from_reader(file);
        let headers = reader.headers()?.clone();
        let columns = column_indexes(&headers)?;
        let balance_text = balance.to_string();

        let mut rows = Vec::new();
        let mut matched = false;
        for result in reader.records() {
            let record = result
                .with_context(|| format!("Failed to read ledger file {}", self.path.display()))?;
            let is_match = identity.matches_fields(
                record.get(columns.first_name).unwrap_or(""),
                record.get(columns.last_name).unwrap_or(""),
                record.get(columns.pin).unwrap_or(""),
            );
            if is_match {
                matched = true;
                let updated: csv::StringRecord = record
                    .iter()
                    .enumerate()
                    .map(|(i, field)| {
                        if i == columns.balance {
                            balance_text.as_str()
                        } else {
                            field
                        }
                    })
                    .collect();
                rows.push(updated);
            } else {
                rows.push(record);
            }
        }

        if !matched {
            return Ok(false);
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
        {
            let mut writer = csv::Writer::from_writer(&mut tmp);
            writer.write_record(&headers)?;
            for row in &rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace ledger file {}", self.path.display()))?;
        Ok(true)
    }

    /// Reads trim every field, matching how inputs are trimmed before
    /// comparison and keeping padded balance cells parseable.
    fn reader(&self) -> Result<csv::Reader<File>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open ledger file {}", self.path.display()))?;
        Ok(csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file))
    }
}

struct Columns {
    first_name: usize,
    last_name: usize,
    pin: usize,
    balance: usize,
}

/// Locate the four ledger columns by header name, so column order in the
/// file does not matter.
fn column_indexes(headers: &csv::StringRecord) -> Result<Columns> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .with_context(|| format!("Ledger file is missing the '{name}' column"))
    };
    Ok(Columns {
        first_name: position(LEDGER_HEADERS[0])?,
        last_name: position(LEDGER_HEADERS[1])?,
        pin: position(LEDGER_HEADERS[2])?,
        balance: position(LEDGER_HEADERS[3])?,
    })
}

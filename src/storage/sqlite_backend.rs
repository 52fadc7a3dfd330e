//! SQLite-backed [`EntryStore`].
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};

use crate::{
    errors::{LedgerError, Result},
    ledger::{
        Clock, Entry, EntryKind, NewEntry, SystemClock, AMOUNT_SCALE, DEFAULT_ACCOUNT,
        TIMESTAMP_FORMAT,
    },
};

use super::EntryStore;

pub const TABLE_NAME: &str = "lancamentos";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS lancamentos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data TEXT,
    tipo TEXT,
    categoria TEXT,
    valor REAL,
    descricao TEXT,
    conta TEXT
)";

const INSERT_ENTRY: &str = "INSERT INTO lancamentos (data, tipo, categoria, valor, descricao, conta)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_ALL: &str = "SELECT id, data, tipo, categoria, valor, descricao, conta
    FROM lancamentos
    ORDER BY data ASC, id ASC";

/// Ledger store kept in a single SQLite file.
///
/// No connection is held between calls: every operation opens the file,
/// does its work and drops the handle before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore<C: Clock = SystemClock> {
    path: PathBuf,
    default_account: String,
    clock: C,
}

impl SqliteStore<SystemClock> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteStore<C> {
    pub fn with_clock(path: impl Into<PathBuf>, clock: C) -> Self {
        Self {
            path: path.into(),
            default_account: DEFAULT_ACCOUNT.to_string(),
            clock,
        }
    }

    /// Overrides the account recorded when a request names none.
    pub fn with_default_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into();
        if !account.trim().is_empty() {
            self.default_account = account;
        }
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_account(&self) -> &str {
        &self.default_account
    }

    fn open(&self) -> Result<Connection> {
        tracing::debug!(path = %self.path.display(), "opening ledger database");
        Ok(Connection::open(&self.path)?)
    }
}

impl<C: Clock> EntryStore for SqliteStore<C> {
    fn initialize(&self) -> Result<()> {
        let conn = self.open()?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    fn append(&self, entry: &NewEntry) -> Result<Entry> {
        let amount = entry.amount();
        let stored_amount = amount
            .to_f64()
            .filter(|value| value.is_finite())
            .filter(|value| {
                Decimal::from_f64(*value).map(|back| back.round_dp(AMOUNT_SCALE)) == Some(amount)
            })
            .ok_or(LedgerError::AmountOutOfRange(amount))?;
        let timestamp = self.clock.now_seconds();
        let account = entry.account_or(&self.default_account).to_string();

        let conn = self.open()?;
        conn.execute(
            INSERT_ENTRY,
            params![
                timestamp.format(TIMESTAMP_FORMAT).to_string(),
                entry.kind().as_str(),
                entry.category(),
                stored_amount,
                entry.description(),
                account,
            ],
        )?;
        let id = conn.last_insert_rowid();

        tracing::info!(id, kind = entry.kind().as_str(), %amount, "ledger entry appended");

        Ok(Entry {
            id,
            timestamp,
            kind: entry.kind(),
            category: entry.category().to_string(),
            amount,
            description: entry.description().to_string(),
            account,
        })
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(SELECT_ALL)?;
        let rows = stmt
            .query_map([], EntryRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut entries = rows
            .into_iter()
            .map(|row| row.into_entry(&self.default_account))
            .collect::<Result<Vec<_>>>()?;
        // SQLite compares the raw `data` text; the parsed timestamp decides.
        entries.sort_by_key(|entry| (entry.timestamp, entry.id));
        tracing::debug!(count = entries.len(), "ledger entries loaded");
        Ok(entries)
    }
}

/// Column values exactly as SQLite hands them back.
///
/// Text columns are nullable so files written by other tools still load.
struct EntryRow {
    id: i64,
    data: Option<String>,
    tipo: Option<String>,
    categoria: Option<String>,
    valor: Option<f64>,
    descricao: Option<String>,
    conta: Option<String>,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            data: row.get(1)?,
            tipo: row.get(2)?,
            categoria: row.get(3)?,
            valor: row.get(4)?,
            descricao: row.get(5)?,
            conta: row.get(6)?,
        })
    }

    fn into_entry(self, default_account: &str) -> Result<Entry> {
        let id = self.id;
        let corrupt = |reason: String| {
            tracing::warn!(id, %reason, "corrupt ledger row");
            LedgerError::CorruptRecord { id, reason }
        };

        let data = self.data.unwrap_or_default();
        let timestamp = NaiveDateTime::parse_from_str(data.trim(), TIMESTAMP_FORMAT)
            .map_err(|_| corrupt(format!("invalid timestamp `{data}`")))?;

        let tipo = self.tipo.unwrap_or_default();
        let kind = tipo
            .parse::<EntryKind>()
            .map_err(|err| corrupt(err.to_string()))?;

        let valor = self
            .valor
            .ok_or_else(|| corrupt("missing amount".to_string()))?;
        let amount = Decimal::from_f64(valor)
            .ok_or_else(|| corrupt(format!("amount {valor} is not a finite number")))?
            .round_dp(AMOUNT_SCALE);
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(corrupt(format!("negative amount {amount}")));
        }

        let account = self
            .conta
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_account.to_string());

        Ok(Entry {
            id,
            timestamp,
            kind,
            category: self.categoria.unwrap_or_default(),
            amount: amount.abs(),
            description: self.descricao.unwrap_or_default(),
            account,
        })
    }
}

use crate::{
    db::DbPool,
    model::{Deadline, ExchangeQuote, QuoteError},
};
use rusqlite::{params, Connection, ErrorCode};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tokio::task::spawn_blocking;
use tracing::debug;

// Number of SQLite VM instructions between deadline checks.
const PROGRESS_OPS: i32 = 100;

const INSERT: &str = "INSERT INTO rates (codein, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

pub struct RateRepository {
    pool: DbPool,
    timeout: Duration,
}

impl RateRepository {
    pub fn new(pool: DbPool, timeout: Duration) -> RateRepository {
        RateRepository { pool, timeout }
    }

    /// Appends `row` to `rates` and returns its id.
    ///
    /// The write either commits before the deadline or leaves nothing behind.
    /// Dropping the returned future before it resolves aborts the write too.
    pub async fn insert(&self, row: &ExchangeQuote, deadline: &Deadline) -> Result<i64, QuoteError> {
        let expiry = Expiry {
            at: deadline.bounded(self.timeout).into_std(),
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let _guard = CancelOnDrop(expiry.cancelled.clone());
        let pool = self.pool.clone();
        let row = row.clone();

        spawn_blocking(move || insert_blocking(&pool, &row, expiry)).await?
    }
}

#[derive(Clone)]
struct Expiry {
    at: Instant,
    cancelled: Arc<AtomicBool>,
}

impl Expiry {
    fn passed(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed) || Instant::now() >= self.at
    }

    fn remaining(&self) -> Result<Duration, QuoteError> {
        match self.at.checked_duration_since(Instant::now()) {
            Some(left) if !left.is_zero() && !self.passed() => Ok(left),
            _ => Err(QuoteError::StorageTimeout),
        }
    }
}

struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn insert_blocking(pool: &DbPool, row: &ExchangeQuote, expiry: Expiry) -> Result<i64, QuoteError> {
    let mut conn = pool.get_timeout(expiry.remaining()?)?;
    conn.busy_timeout(expiry.remaining()?)?;

    let handler = expiry.clone();
    conn.progress_handler(PROGRESS_OPS, Some(move || handler.passed()));
    let res = write_row(&mut conn, row, &expiry);
    conn.progress_handler(0, None::<fn() -> bool>);

    res.map_err(|e| match e {
        QuoteError::Storage(ref inner)
            if expiry.passed() || inner.sqlite_error_code() == Some(ErrorCode::DatabaseBusy) =>
        {
            debug!(error = %e, "Insert interrupted by deadline");
            QuoteError::StorageTimeout
        }
        e => e,
    })
}

fn write_row(conn: &mut Connection, row: &ExchangeQuote, expiry: &Expiry) -> Result<i64, QuoteError> {
    let tx = conn.transaction()?;
    let id = tx.prepare_cached(INSERT)?.insert(params![
        &row.codein,
        &row.name,
        &row.high,
        &row.low,
        &row.var_bid,
        &row.pct_change,
        &row.bid,
        &row.ask,
        &row.timestamp,
        &row.create_date,
    ])?;

    if expiry.passed() {
        return Err(QuoteError::StorageTimeout);
    }

    tx.commit()?;
    Ok(id)
}

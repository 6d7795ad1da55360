use crate::conf::DbConf;
use anyhow::Result;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::info;

pub type DbPool = Pool<SqliteConnectionManager>;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS rates (
        id INTEGER NOT NULL PRIMARY KEY,
        codein TEXT NOT NULL,
        name TEXT NOT NULL,
        high TEXT NOT NULL,
        low TEXT NOT NULL,
        var_bid TEXT NOT NULL,
        pct_change TEXT NOT NULL,
        bid TEXT NOT NULL,
        ask TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        create_date TEXT NOT NULL
    );
"#;

pub fn pool(conf: &DbConf) -> Result<DbPool> {
    info!(db_url = %conf.url, pool_size = conf.pool_size, "Opening database");
    let manager = SqliteConnectionManager::file(&conf.url);
    Ok(Pool::builder().max_size(conf.pool_size).build(manager)?)
}

/// Creates the `rates` table unless it's already there.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    info!("Schema is up to date");
    Ok(())
}

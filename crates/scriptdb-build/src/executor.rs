use async_trait::async_trait;
use sqlx::{Executor, SqliteConnection};

use scriptdb_core::{Error, Result, StatementExecutor};

/// Runs statements on a connection, normally one borrowed from an open
/// transaction so the caller decides between commit and rollback.
pub struct ConnectionExecutor<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> ConnectionExecutor<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'c> StatementExecutor for ConnectionExecutor<'c> {
    async fn execute(&mut self, statement: &str) -> Result<()> {
        // Reborrow with a concrete lifetime; the generic `Executor` impl is
        // not accepted inside the boxed `Send` future otherwise.
        let conn: &mut SqliteConnection = self.conn;
        conn.execute(sqlx::raw_sql(statement))
            .await
            .map_err(|err| Error::Db(err.to_string()))?;
        Ok(())
    }
}

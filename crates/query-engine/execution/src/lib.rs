//! Talk to a remote PostgreSQL database: scan its catalog and describe the result columns of
//! push-down queries.

pub mod catalog;
pub mod columns;
pub mod error;
pub mod probe;

pub use error::Error;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// A connection pool to the remote database.
#[derive(Debug, Clone)]
pub struct PostgresRemote {
    pool: PgPool,
}

impl PostgresRemote {
    /// Connect with a small pool; scans and probes run one statement at a time.
    pub async fn connect(database_url: &str) -> Result<PostgresRemote, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(database_url)
            .await
            .map_err(Error::UnableToCreatePool)?;
        Ok(PostgresRemote { pool })
    }

    pub fn from_pool(pool: PgPool) -> PostgresRemote {
        PostgresRemote { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

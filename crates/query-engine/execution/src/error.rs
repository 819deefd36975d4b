//! Errors for talking to the remote database.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
}

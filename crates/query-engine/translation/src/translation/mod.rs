//! Translate push-down query trees into SQL for a remote database, map the remote catalog onto
//! normalized metadata and compose the final import statement.

pub mod capabilities;
pub mod connection;
pub mod dialect;
pub mod error;
pub mod generation;
pub mod identifiers;
pub mod metadata_readers;
pub mod rewriter;
pub mod session;
pub mod type_mapper;

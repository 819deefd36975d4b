//! Metadata information regarding the remote database and the normalized type system.

pub mod adapter_notes;
pub mod data_type;
pub mod database;
pub mod remote;

// re-export without modules
pub use adapter_notes::*;
pub use data_type::*;
pub use database::*;
pub use remote::*;

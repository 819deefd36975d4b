mod connection_info;
mod secret;

pub use connection_info::{
    ConnectionInformation, ConnectionString, DatabaseUrl, Password, SecretSetting,
};
pub use secret::Secret;

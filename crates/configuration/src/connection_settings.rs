//! Remote connection settings.

use crate::values::{ConnectionString, DatabaseUrl, Password, Secret};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_URL_VARIABLE: &str = "PUSHDOWN_DATABASE_URL";

/// How the remote database is reached.
///
/// The first four fields feed the connection clause of the generated `IMPORT` statement: a named
/// connection, an explicit address with credentials, or a named connection whose credentials are
/// overridden. `database_url` is what this adapter uses to probe result columns and scan the
/// catalog.
#[derive(Clone, PartialEq, Eq, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<ConnectionString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Password>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<DatabaseUrl>,
}

impl ConnectionSettings {
    pub fn empty() -> Self {
        Self {
            connection_name: None,
            connection_string: None,
            username: None,
            password: None,
            database_url: Some(DatabaseUrl(Secret::FromEnvironment {
                variable: DEFAULT_DATABASE_URL_VARIABLE.into(),
            })),
        }
    }
}

//! The `AT ...` clause of an import statement, and which import forms a dialect accepts.

use pushdown_configuration::configuration::ConnectionInformation;
use pushdown_configuration::ImportMode;
use query_engine_sql::sql::string::quote_string_literal;

use super::dialect::Dialect;
use super::error::ConnectionDefinitionError;

/// How the importing database reaches the remote one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionDefinition {
    /// A connection object defined in the importing database.
    Named { name: String },
    /// A connection object whose credentials are replaced.
    NamedWithCredentials {
        name: String,
        username: String,
        password: String,
    },
    /// Address and credentials spelled out in the statement.
    Explicit {
        address: String,
        username: String,
        password: String,
    },
}

impl ConnectionDefinition {
    pub fn from_information(
        information: &ConnectionInformation,
    ) -> Result<ConnectionDefinition, ConnectionDefinitionError> {
        let name = non_empty(information.connection_name.as_deref());
        let address = non_empty(information.connection_string.as_deref());
        let username = non_empty(information.username.as_deref());
        let password = non_empty(information.password.as_deref());

        match (name, address, username, password) {
            (Some(_), Some(_), _, _) => Err(ConnectionDefinitionError::NameAndAddress),
            (Some(name), None, None, None) => Ok(ConnectionDefinition::Named {
                name: name.to_string(),
            }),
            (Some(name), None, Some(username), Some(password)) => {
                Ok(ConnectionDefinition::NamedWithCredentials {
                    name: name.to_string(),
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            (Some(_), None, _, _) => Err(ConnectionDefinitionError::PartialCredentialOverride),
            (None, Some(address), Some(username), Some(password)) => {
                tracing::warn!(
                    "Connection address and credentials given in the configuration. Please use a named connection instead."
                );
                Ok(ConnectionDefinition::Explicit {
                    address: address.to_string(),
                    username: username.to_string(),
                    password: password.to_string(),
                })
            }
            (None, _, _, _) => Err(ConnectionDefinitionError::Incomplete),
        }
    }

    /// The clause following `FROM JDBC`.
    pub fn clause(&self) -> String {
        match self {
            ConnectionDefinition::Named { name } => format!("AT {name}"),
            ConnectionDefinition::NamedWithCredentials {
                name,
                username,
                password,
            } => format!("AT {name}{}", credentials(username, password)),
            ConnectionDefinition::Explicit {
                address,
                username,
                password,
            } => format!(
                "AT {}{}",
                quote_string_literal(address),
                credentials(username, password)
            ),
        }
    }

    /// User and password, unless the connection object supplies them.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match self {
            ConnectionDefinition::Named { .. } => None,
            ConnectionDefinition::NamedWithCredentials {
                username, password, ..
            }
            | ConnectionDefinition::Explicit {
                username, password, ..
            } => Some((username, password)),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

pub(crate) fn credentials(username: &str, password: &str) -> String {
    format!(
        " USER {} IDENTIFIED BY {}",
        quote_string_literal(username),
        quote_string_literal(password)
    )
}

/// Check that the dialect accepts the import mode and that the connection carries what the mode
/// needs.
pub fn check_import_mode(
    mode: &ImportMode,
    dialect: &Dialect,
    connection: &ConnectionDefinition,
) -> Result<(), ConnectionDefinitionError> {
    let support = dialect.import_support();
    let unsupported = |mode| ConnectionDefinitionError::UnsupportedImportMode {
        dialect: dialect.name(),
        mode,
    };
    match mode {
        ImportMode::Jdbc => Ok(()),
        ImportMode::Local if support.local => Ok(()),
        ImportMode::Local => Err(unsupported("LOCAL")),
        ImportMode::FromExa { .. } if !support.from_exa => Err(unsupported("FROM EXA")),
        ImportMode::FromExa {
            exa_connection_string,
        } => {
            if exa_connection_string.is_empty() {
                Err(ConnectionDefinitionError::ImportRequirement {
                    source_kind: "EXA",
                    requirement: "an EXA connection string",
                })
            } else if connection.credentials().is_none() {
                Err(ConnectionDefinitionError::ImportRequirement {
                    source_kind: "EXA",
                    requirement: "a user and a password",
                })
            } else {
                Ok(())
            }
        }
        ImportMode::FromOra { .. } if !support.from_ora => Err(unsupported("FROM ORA")),
        ImportMode::FromOra {
            ora_connection_name,
        } => {
            if ora_connection_name.is_empty() {
                Err(ConnectionDefinitionError::ImportRequirement {
                    source_kind: "ORA",
                    requirement: "an ORA connection name",
                })
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::dialect::{DialectContext, DialectRegistry};
    use similar_asserts::assert_eq;

    fn information(
        name: Option<&str>,
        address: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> ConnectionInformation {
        ConnectionInformation {
            connection_name: name.map(str::to_string),
            connection_string: address.map(str::to_string),
            username: username.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn clause(information: &ConnectionInformation) -> Result<String, ConnectionDefinitionError> {
        ConnectionDefinition::from_information(information).map(|definition| definition.clause())
    }

    #[test]
    fn named_connection() {
        assert_eq!(
            clause(&information(Some("MY_CONN"), None, None, None)),
            Ok("AT MY_CONN".to_string())
        );
    }

    #[test]
    fn explicit_connection() {
        assert_eq!(
            clause(&information(
                None,
                Some("jdbc:postgresql://db/x"),
                Some("alice"),
                Some("secret")
            )),
            Ok("AT 'jdbc:postgresql://db/x' USER 'alice' IDENTIFIED BY 'secret'".to_string())
        );
    }

    #[test]
    fn named_connection_with_credentials() {
        assert_eq!(
            clause(&information(Some("MY_CONN"), None, Some("bob"), Some("pw"))),
            Ok("AT MY_CONN USER 'bob' IDENTIFIED BY 'pw'".to_string())
        );
    }

    #[test]
    fn quotes_in_credentials_and_addresses_are_doubled() {
        assert_eq!(
            clause(&information(Some("MY_CONN"), None, Some("o'brien"), Some("it's"))),
            Ok("AT MY_CONN USER 'o''brien' IDENTIFIED BY 'it''s'".to_string())
        );
        assert_eq!(
            clause(&information(None, Some("host'1"), Some("u"), Some("p"))),
            Ok("AT 'host''1' USER 'u' IDENTIFIED BY 'p'".to_string())
        );
    }

    #[test]
    fn empty_properties_count_as_missing() {
        assert_eq!(
            clause(&information(Some("MY_CONN"), Some(""), Some(""), None)),
            Ok("AT MY_CONN".to_string())
        );
    }

    #[test]
    fn conflicting_or_incomplete_properties() {
        assert_eq!(
            clause(&information(Some("MY_CONN"), Some("jdbc:x"), None, None)),
            Err(ConnectionDefinitionError::NameAndAddress)
        );
        assert_eq!(
            clause(&information(Some("MY_CONN"), None, Some("bob"), None)),
            Err(ConnectionDefinitionError::PartialCredentialOverride)
        );
        assert_eq!(
            clause(&information(None, Some("jdbc:x"), Some("bob"), None)),
            Err(ConnectionDefinitionError::Incomplete)
        );
        assert_eq!(
            clause(&information(None, None, None, None)),
            Err(ConnectionDefinitionError::Incomplete)
        );
    }

    #[test]
    fn import_modes_are_checked_against_the_dialect() {
        let registry = DialectRegistry::with_builtin_dialects();
        let exasol = registry.resolve("EXASOL", &DialectContext::default()).unwrap();
        let oracle = registry.resolve("ORACLE", &DialectContext::default()).unwrap();
        let named = ConnectionDefinition::Named {
            name: "C".to_string(),
        };
        let explicit = ConnectionDefinition::Explicit {
            address: "host:8563".to_string(),
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let from_exa = ImportMode::FromExa {
            exa_connection_string: "host:8563".to_string(),
        };
        let from_ora = ImportMode::FromOra {
            ora_connection_name: "ORA_CONN".to_string(),
        };

        assert_eq!(check_import_mode(&ImportMode::Jdbc, &oracle, &named), Ok(()));
        assert_eq!(check_import_mode(&ImportMode::Local, &exasol, &named), Ok(()));
        assert_eq!(
            check_import_mode(&ImportMode::Local, &oracle, &named),
            Err(ConnectionDefinitionError::UnsupportedImportMode {
                dialect: "ORACLE",
                mode: "LOCAL",
            })
        );
        assert_eq!(check_import_mode(&from_exa, &exasol, &explicit), Ok(()));
        assert_eq!(
            check_import_mode(&from_exa, &exasol, &named),
            Err(ConnectionDefinitionError::ImportRequirement {
                source_kind: "EXA",
                requirement: "a user and a password",
            })
        );
        assert_eq!(check_import_mode(&from_ora, &oracle, &named), Ok(()));
        assert_eq!(
            check_import_mode(&from_ora, &exasol, &named),
            Err(ConnectionDefinitionError::UnsupportedImportMode {
                dialect: "EXASOL",
                mode: "FROM ORA",
            })
        );
    }
}

//! The connection values of the configuration file and their resolved form.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Secret;
use crate::connection_settings::ConnectionSettings;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;

/// A connection value that may be kept out of the configuration file.
pub trait SecretSetting {
    /// The configuration key, as reported when the value cannot be resolved.
    const SETTING: &'static str;

    fn secret(&self) -> &Secret;

    fn resolve(
        &self,
        environment: &impl Environment,
    ) -> Result<String, MakeRuntimeConfigurationError> {
        match self.secret() {
            Secret::Plain(value) => Ok(value.clone()),
            Secret::FromEnvironment { variable } => {
                environment.read(variable).map_err(|error| {
                    MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                        setting: Self::SETTING.to_string(),
                        message: format!("{variable}: {error}"),
                    }
                })
            }
        }
    }
}

macro_rules! secret_setting {
    ($(#[$meta:meta])* $name:ident => $setting:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
        pub struct $name(pub Secret);

        impl SecretSetting for $name {
            const SETTING: &'static str = $setting;

            fn secret(&self) -> &Secret {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value.into())
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }
    };
}

secret_setting! {
    /// Address of the remote database as used inside an `AT '<address>'` clause.
    ConnectionString => "connectionString"
}

secret_setting! {
    /// Password of the remote user named in the import statement.
    Password => "password"
}

secret_setting! {
    /// Connection URL the adapter itself uses to probe and scan the remote database.
    DatabaseUrl => "databaseUrl"
}

/// Connection properties with every secret resolved.
///
/// These are the four inputs of the connection clause of an import statement. Which
/// combinations are valid is decided when a session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionInformation {
    pub connection_name: Option<String>,
    pub connection_string: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ConnectionInformation {
    /// Resolve the secrets among the connection settings. The database URL is left out, since it
    /// never reaches a generated statement.
    pub fn resolve(
        settings: &ConnectionSettings,
        environment: &impl Environment,
    ) -> Result<Self, MakeRuntimeConfigurationError> {
        Ok(ConnectionInformation {
            connection_name: settings.connection_name.clone(),
            connection_string: settings
                .connection_string
                .as_ref()
                .map(|value| value.resolve(environment))
                .transpose()?,
            username: settings.username.clone(),
            password: settings
                .password
                .as_ref()
                .map(|value| value.resolve(environment))
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{EmptyEnvironment, FixedEnvironment};
    use similar_asserts::assert_eq;

    #[test]
    fn named_connections_need_no_environment() {
        let settings = ConnectionSettings {
            connection_name: Some("REMOTE_PG".into()),
            username: Some("scott".into()),
            password: Some("tiger".into()),
            ..ConnectionSettings::empty()
        };
        assert_eq!(
            ConnectionInformation::resolve(&settings, &EmptyEnvironment).unwrap(),
            ConnectionInformation {
                connection_name: Some("REMOTE_PG".into()),
                connection_string: None,
                username: Some("scott".into()),
                password: Some("tiger".into()),
            }
        );
    }

    #[test]
    fn addresses_and_passwords_come_from_the_environment() {
        let settings = ConnectionSettings {
            connection_string: Some(ConnectionString(Secret::FromEnvironment {
                variable: "REMOTE_ADDRESS".into(),
            })),
            username: Some("scott".into()),
            password: Some(Password(Secret::FromEnvironment {
                variable: "REMOTE_PASSWORD".into(),
            })),
            ..ConnectionSettings::empty()
        };
        let environment = FixedEnvironment::from([
            ("REMOTE_ADDRESS".into(), "jdbc:postgresql://pg:5432/db".into()),
            ("REMOTE_PASSWORD".into(), "tiger".into()),
        ]);
        let information = ConnectionInformation::resolve(&settings, &environment).unwrap();
        assert_eq!(
            information.connection_string.as_deref(),
            Some("jdbc:postgresql://pg:5432/db")
        );
        assert_eq!(information.password.as_deref(), Some("tiger"));
    }

    #[test]
    fn unresolved_secrets_name_their_setting() {
        let settings = ConnectionSettings {
            connection_string: Some(ConnectionString(Secret::FromEnvironment {
                variable: "REMOTE_ADDRESS".into(),
            })),
            ..ConnectionSettings::empty()
        };
        let error = ConnectionInformation::resolve(&settings, &EmptyEnvironment).unwrap_err();
        assert!(matches!(
            error,
            MakeRuntimeConfigurationError::MissingEnvironmentVariable { ref setting, ref message }
                if setting == "connectionString" && message.starts_with("REMOTE_ADDRESS")
        ));
        let url = DatabaseUrl::from("postgres://remote");
        assert_eq!(url.resolve(&EmptyEnvironment).unwrap(), "postgres://remote");
    }
}

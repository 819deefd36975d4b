//! Where secrets are resolved from.

use std::collections::HashMap;

/// A source of environment variables.
pub trait Environment {
    fn read(&self, variable: &str) -> Result<String, std::env::VarError>;
}

/// The environment of the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &str) -> Result<String, std::env::VarError> {
        std::env::var(variable)
    }
}

/// A fixed set of variables, for tests and for callers that resolve secrets themselves.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<String, String>);

impl<const N: usize> From<[(String, String); N]> for FixedEnvironment {
    fn from(variables: [(String, String); N]) -> Self {
        Self(HashMap::from(variables))
    }
}

impl Environment for FixedEnvironment {
    fn read(&self, variable: &str) -> Result<String, std::env::VarError> {
        self.0
            .get(variable)
            .cloned()
            .ok_or(std::env::VarError::NotPresent)
    }
}

/// An empty environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, _variable: &str) -> Result<String, std::env::VarError> {
        Err(std::env::VarError::NotPresent)
    }
}

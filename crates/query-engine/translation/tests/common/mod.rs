use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use pushdown_configuration::environment::FixedEnvironment;
use pushdown_configuration::Configuration;
use query_engine_metadata::metadata::{
    RemoteAccessError, RemoteTypeDescriptor, ResultSetProbe, SchemaAdapterNotes,
};
use query_engine_sql::sql::ast::Select;
use query_engine_translation::translation::dialect::DialectRegistry;
use query_engine_translation::translation::session::AdapterSession;

/// Translate the request of a golden file directory with its configuration.
pub async fn test_translation(testname: &str) -> anyhow::Result<String> {
    let (session, request) = load(testname).await?;
    Ok(session.generate(&request)?)
}

/// Rewrite the request of a golden file directory. The probe answers with `columns`.
pub async fn test_rewrite(
    testname: &str,
    columns: Vec<RemoteTypeDescriptor>,
) -> anyhow::Result<String> {
    let (session, request) = load(testname).await?;
    let probe = FixedProbe { columns };
    Ok(session.rewrite(&request, &probe).await?)
}

async fn load(testname: &str) -> anyhow::Result<(AdapterSession, Select)> {
    let directory = PathBuf::from("tests/goldenfiles").join(testname);

    let parsed_configuration = pushdown_configuration::parse_configuration(&directory).await?;
    let configuration: Configuration = pushdown_configuration::make_runtime_configuration(
        parsed_configuration,
        FixedEnvironment::from([(
            "PUSHDOWN_DATABASE_URL".into(),
            "the translation tests do not rely on a database connection".into(),
        )]),
    )?;

    let session = AdapterSession::new(
        &configuration,
        &DialectRegistry::with_builtin_dialects(),
        SchemaAdapterNotes::default(),
    )?;

    let request = serde_json::from_str(&fs::read_to_string(directory.join("request.json"))?)?;
    Ok((session, request))
}

/// Answers every probe with the same columns.
pub struct FixedProbe {
    pub columns: Vec<RemoteTypeDescriptor>,
}

#[async_trait]
impl ResultSetProbe for FixedProbe {
    async fn describe(&self, _query: &str) -> Result<Vec<RemoteTypeDescriptor>, RemoteAccessError> {
        Ok(self.columns.clone())
    }
}

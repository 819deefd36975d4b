use std::fs;
use std::path::Path;

use pushdown_cli::{run, Command, Context, CONFIGURATION_JSONSCHEMA_FILENAME};
use pushdown_configuration::environment::EmptyEnvironment;
use pushdown_configuration::CONFIGURATION_FILENAME;
use similar_asserts::assert_eq;

const EXASOL_CONFIGURATION: &str = r#"{
  "version": 1,
  "dialect": "EXASOL",
  "schemaName": "RETAIL",
  "connection": {
    "connectionName": "EXA_CONN",
    "databaseUrl": "postgres://localhost/retail"
  },
  "excludedCapabilities": "LIMIT, FN_AGG_SUM"
}
"#;

const REQUEST: &str = r#"{
  "select_list": {
    "type": "expressions",
    "expressions": [
      {"node": "column", "id": 0, "metadata": {"name": "REGION", "dataType": {"type": "date"}}}
    ]
  },
  "from": {
    "type": "table",
    "name": "SALES",
    "metadata": {
      "name": "SALES",
      "columns": [{"name": "REGION", "dataType": {"type": "date"}}]
    }
  }
}
"#;

fn context(path: &Path) -> Context<EmptyEnvironment> {
    Context {
        context_path: path.to_path_buf(),
        environment: EmptyEnvironment,
    }
}

#[tokio::test]
async fn initialize_writes_configuration_and_schema() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;

    run(
        Command::Initialize {
            dialect: "oracle".to_string(),
        },
        context(directory.path()),
    )
    .await?;

    let parsed = pushdown_configuration::parse_configuration(directory.path()).await?;
    assert_eq!(parsed.dialect, "ORACLE");
    assert!(directory
        .path()
        .join(CONFIGURATION_JSONSCHEMA_FILENAME)
        .exists());
    Ok(())
}

#[tokio::test]
async fn initialize_keeps_an_existing_configuration() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;
    fs::write(directory.path().join(CONFIGURATION_FILENAME), EXASOL_CONFIGURATION)?;

    let result = run(
        Command::Initialize {
            dialect: "GENERIC".to_string(),
        },
        context(directory.path()),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(
        fs::read_to_string(directory.path().join(CONFIGURATION_FILENAME))?,
        EXASOL_CONFIGURATION
    );
    Ok(())
}

#[tokio::test]
async fn initialize_rejects_unknown_dialects() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;
    let error = run(
        Command::Initialize {
            dialect: "dbase".to_string(),
        },
        context(directory.path()),
    )
    .await
    .unwrap_err();
    assert_eq!(error.to_string(), "unknown dialect DBASE");
    Ok(())
}

#[tokio::test]
async fn generate_prints_the_remote_sql() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;
    fs::write(directory.path().join(CONFIGURATION_FILENAME), EXASOL_CONFIGURATION)?;
    let request = directory.path().join("request.json");
    fs::write(&request, REQUEST)?;

    let sql = run(
        Command::Generate {
            request,
            schema_metadata: None,
            pretty: false,
        },
        context(directory.path()),
    )
    .await?;

    assert_eq!(sql, r#"SELECT "REGION" FROM "RETAIL"."SALES""#);
    Ok(())
}

#[tokio::test]
async fn capabilities_leave_out_the_excluded_ones() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;
    fs::write(directory.path().join(CONFIGURATION_FILENAME), EXASOL_CONFIGURATION)?;

    let output = run(Command::Capabilities, context(directory.path())).await?;

    let capabilities: serde_json::Value = serde_json::from_str(&output)?;
    let main = capabilities["main"].as_array().unwrap();
    assert!(main.contains(&serde_json::json!("LIMIT_WITH_OFFSET")));
    assert!(!main.contains(&serde_json::json!("LIMIT")));
    let aggregates = capabilities["aggregate_functions"].as_array().unwrap();
    assert!(!aggregates.contains(&serde_json::json!("SUM")));
    assert!(aggregates.contains(&serde_json::json!("AVG")));
    Ok(())
}

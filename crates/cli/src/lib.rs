//! The commands of the push-down command line tool.
//!
//! Every command reads `configuration.json` from the context directory, except `initialize`,
//! which writes it.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;
use pushdown_configuration::environment::Environment;
use pushdown_configuration::version1::DEFAULT_DIALECT;
use pushdown_configuration::{
    generate_json_schema, make_runtime_configuration, parse_configuration,
    write_parsed_configuration, Configuration, ParsedConfiguration, CONFIGURATION_FILENAME,
};
use query_engine_execution::PostgresRemote;
use query_engine_metadata::metadata::{SchemaAdapterNotes, SchemaMetadata};
use query_engine_sql::sql::ast::Select;
use query_engine_translation::translation::dialect::DialectRegistry;
use query_engine_translation::translation::session::AdapterSession;
use tokio::fs;

pub const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write an initial configuration and its JSON schema to the context directory.
    Initialize {
        #[arg(long, env = "PUSHDOWN_DIALECT", default_value = DEFAULT_DIALECT)]
        dialect: String,
    },
    /// Print the capabilities of the configured dialect, without the excluded ones.
    Capabilities,
    /// Print the SQL the remote database runs for a serialized query tree.
    Generate {
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
        /// Schema metadata written by `refresh`, for the remote identifier properties.
        #[arg(long, value_name = "FILE")]
        schema_metadata: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the statement the local database runs for a serialized query tree.
    Rewrite {
        #[arg(long, value_name = "FILE")]
        request: PathBuf,
        #[arg(long, value_name = "FILE")]
        schema_metadata: Option<PathBuf>,
    },
    /// Scan the remote schema and print its metadata.
    Refresh {
        /// Only scan these tables.
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
    },
}

/// Where the configuration lives and how its secrets are resolved.
pub struct Context<Env: Environment> {
    pub context_path: PathBuf,
    pub environment: Env,
}

/// Run a command and return what it prints.
pub async fn run(command: Command, context: Context<impl Environment>) -> anyhow::Result<String> {
    match command {
        Command::Initialize { dialect } => initialize(&context.context_path, &dialect).await,
        Command::Capabilities => {
            let (_, session) = open_session(context, None).await?;
            Ok(serde_json::to_string_pretty(session.capabilities())?)
        }
        Command::Generate {
            request,
            schema_metadata,
            pretty,
        } => {
            let (_, session) = open_session(context, schema_metadata.as_deref()).await?;
            let sql = session.generate(&read_request(&request).await?)?;
            if pretty {
                Ok(sqlformat::format(
                    &sql,
                    &sqlformat::QueryParams::None,
                    sqlformat::FormatOptions::default(),
                ))
            } else {
                Ok(sql)
            }
        }
        Command::Rewrite {
            request,
            schema_metadata,
        } => {
            let (configuration, session) =
                open_session(context, schema_metadata.as_deref()).await?;
            let select = read_request(&request).await?;
            let remote = connect(&configuration).await?;
            Ok(session.rewrite(&select, &remote).await?)
        }
        Command::Refresh { tables } => {
            let (configuration, session) = open_session(context, None).await?;
            let remote = connect(&configuration).await?;
            let schema = session.refresh(&remote, tables.as_deref()).await?;
            Ok(serde_json::to_string_pretty(&schema)?)
        }
    }
}

async fn initialize(context_path: &Path, dialect: &str) -> anyhow::Result<String> {
    let configuration_file = context_path.join(CONFIGURATION_FILENAME);
    if fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "a configuration already exists at {}",
            configuration_file.display()
        );
    }
    let dialect = dialect.to_uppercase();
    if !DialectRegistry::with_builtin_dialects()
        .names()
        .any(|name| name == dialect)
    {
        anyhow::bail!("unknown dialect {dialect}");
    }

    let mut parsed = ParsedConfiguration::initial();
    parsed.dialect = dialect;
    write_parsed_configuration(parsed, context_path).await?;
    fs::write(
        context_path.join(CONFIGURATION_JSONSCHEMA_FILENAME),
        serde_json::to_string_pretty(&generate_json_schema())? + "\n",
    )
    .await?;

    tracing::info!(path = %configuration_file.display(), "Wrote initial configuration");
    Ok(format!("Wrote {}", configuration_file.display()))
}

async fn open_session(
    context: Context<impl Environment>,
    schema_metadata: Option<&Path>,
) -> anyhow::Result<(Configuration, AdapterSession)> {
    let parsed = parse_configuration(&context.context_path).await?;
    let configuration = make_runtime_configuration(parsed, context.environment)?;
    let notes = match schema_metadata {
        Some(path) => {
            let schema: SchemaMetadata = serde_json::from_str(
                &fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?,
            )?;
            AdapterSession::stored_adapter_notes(&schema)?
        }
        None => SchemaAdapterNotes::default(),
    };
    let session = AdapterSession::new(
        &configuration,
        &DialectRegistry::with_builtin_dialects(),
        notes,
    )?;
    Ok((configuration, session))
}

async fn read_request(path: &Path) -> anyhow::Result<Select> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

async fn connect(configuration: &Configuration) -> anyhow::Result<PostgresRemote> {
    let database_url = configuration
        .database_url
        .as_deref()
        .context("no databaseUrl is configured")?;
    Ok(PostgresRemote::connect(database_url).await?)
}

mod logging;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fakeapi_core::{Error as CoreError, FieldDefinition, FieldType, Plan, validate_fields};
use fakeapi_generate::{GenerationEngine, PageRequest, RandomSource};
use fakeapi_server::{AppState, ServerLimits};
use fakeapi_store::{InMemorySchemaStore, JsonFileSchemaStore, SchemaStore, StoreError};
use logging::{LogTarget, init_logging};
use settings::{Settings, SettingsError, load_or_create_settings};
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "fakeapi", version, about = "Fake data REST API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Print one page of generated records.
    Sample(SampleArgs),
    /// List the field type tags with a dedicated generator.
    Types,
    /// Set the plan of an owner in a JSON file store.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Settings file, created with defaults when missing.
    #[arg(long, default_value = "fakeapi.toml")]
    config: PathBuf,
    /// Listen address, overrides `bind`.
    #[arg(long)]
    bind: Option<String>,
    /// Seed for reproducible output, overrides `seed`.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file for schemas, overrides `store_path`.
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Field as `name:type`, repeatable.
    #[arg(long = "field", value_name = "NAME:TYPE", value_parser = parse_field_spec)]
    fields: Vec<FieldDefinition>,
    #[arg(long, default_value_t = 10)]
    count: i64,
    #[arg(long, default_value_t = 1)]
    page: i64,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long)]
    owner: String,
    #[arg(long, value_enum)]
    plan: PlanArg,
    /// JSON file holding schemas and plans.
    #[arg(long)]
    store: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PlanArg {
    Free,
    Pro,
}

impl From<PlanArg> for Plan {
    fn from(value: PlanArg) -> Self {
        match value {
            PlanArg::Free => Plan::Free,
            PlanArg::Pro => Plan::Pro,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => run_serve(args).await,
        Command::Sample(args) => run_sample(args),
        Command::Types => run_types(),
        Command::Plan(args) => run_plan(args).await,
    }
}

async fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let mut settings = load_or_create_settings(&args.config)?;
    apply_overrides(&mut settings, &args);

    let target = match &settings.log_file {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Stdout,
    };
    init_logging(settings.log_format, target)?;
    tracing::info!(event = "settings_loaded", path = %args.config.display());

    if settings.max_page_size == 0 {
        return Err(CliError::InvalidConfig(
            "max_page_size must be at least 1".to_string(),
        ));
    }

    let store: Arc<dyn SchemaStore> = match &settings.store_path {
        Some(path) => Arc::new(JsonFileSchemaStore::open(path)?),
        None => Arc::new(InMemorySchemaStore::new()),
    };
    let random = RandomSource::from_seed(settings.seed);
    tracing::info!(
        event = "runtime_ready",
        store = store.backend(),
        seeded = random.is_seeded(),
        free_tier_limit = settings.free_tier_limit,
        max_page_size = settings.max_page_size
    );

    let limits = ServerLimits {
        free_tier_limit: settings.free_tier_limit,
        max_page_size: settings.max_page_size,
    };
    let state = AppState::new(store, Arc::new(GenerationEngine::new(random)), limits);

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    fakeapi_server::serve(listener, state).await?;
    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: &ServeArgs) {
    if let Some(bind) = &args.bind {
        settings.bind = bind.clone();
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(store) = &args.store {
        settings.store_path = Some(store.clone());
    }
}

fn run_sample(args: SampleArgs) -> Result<(), CliError> {
    init_logging(settings::LogFormat::Text, LogTarget::Stderr)?;
    validate_fields(&args.fields)?;

    let engine = GenerationEngine::new(RandomSource::from_seed(args.seed));
    let request = PageRequest::new(args.page, args.count, fakeapi_generate::MAX_PAGE_SIZE);
    let page = engine.generate_page(&args.fields, request);

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

fn run_types() -> Result<(), CliError> {
    for field_type in FieldType::KNOWN {
        println!("{field_type}");
    }
    Ok(())
}

async fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    init_logging(settings::LogFormat::Text, LogTarget::Stderr)?;
    let owner = args.owner.trim();
    if owner.is_empty() {
        return Err(CliError::InvalidConfig("owner must not be empty".to_string()));
    }

    let store = JsonFileSchemaStore::open(&args.store)?;
    let plan = Plan::from(args.plan);
    store.set_plan(owner, plan).await?;
    tracing::info!(event = "plan_updated", owner = %owner, plan = ?plan);
    Ok(())
}

/// Parse `name:type`. The type tag is free-form; unknown tags generate strings.
fn parse_field_spec(raw: &str) -> Result<FieldDefinition, String> {
    let (name, tag) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:TYPE, got `{raw}`"))?;
    let name = name.trim();
    let tag = tag.trim();
    if name.is_empty() {
        return Err(format!("missing field name in `{raw}`"));
    }
    if tag.is_empty() {
        return Err(format!("missing field type in `{raw}`"));
    }
    Ok(FieldDefinition::new(name, FieldType::from_tag(tag)))
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use stockroom::config::Config;
use stockroom::error::format_error;
use stockroom::lookup::{NameKind, NameResolver};
use stockroom::model::*;
use stockroom::query::ResourceQueries;
use stockroom::resource::{get_all_resource_keys, get_resource, Operation, Sort};
use stockroom::{forms, table, Services};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Version injected at compile time via STOCKROOM_VERSION env var,
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("STOCKROOM_VERSION") {
    Some(v) => v,
    None => "dev",
};

/// Command-line client for the stockroom inventory API
#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about, long_about = None)]
struct Args {
    /// API origin, e.g. http://localhost:8080/
    #[arg(long, global = true, env = "STOCKROOM_BASE_URL")]
    base_url: Option<String>,

    /// Rows per page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Log level for debugging
    #[arg(long, global = true, value_enum, default_value = "off")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resources this client knows
    Resources,

    /// Show or change the saved configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Resolve an id to its display name
    Name {
        /// SUPPLIER, WAREHOUSE, VEHICLE, PRODUCT, CUSTOMER or EMPLOYEE
        kind: NameKind,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Create an employee through the endpoint of their role
    EmployeeCreate {
        #[arg(long)]
        name: String,
        /// office-worker, truck-driver, supplier or warehouse-worker
        #[arg(long)]
        role: EmployeeRole,
    },

    /// `<resource> <action>`, e.g. `product list --query cyl`
    #[command(external_subcommand)]
    Resource(Vec<String>),
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    SetBaseUrl { url: String },
    SetPageSize { size: u32 },
}

/// Actions available on every resource
#[derive(Parser, Debug)]
struct ResourceCommand {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// One page of records; --query searches instead
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value = "")]
        query: String,
        /// Sort column
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
    Get { id: String },
    /// Every record, unpaged
    All,
    /// Create from a JSON document
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update from a JSON document carrying the id
    Update {
        #[arg(long)]
        json: String,
    },
    Delete { id: String },
    /// Check whether a value is already taken
    Exists { value: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Logging disabled, cannot open {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("stockroom {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("stockroom").join("stockroom.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".stockroom").join("stockroom.log");
    }
    PathBuf::from("stockroom.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("{:#}", err);
        match err.downcast_ref::<stockroom::Error>() {
            Some(api_err) => eprintln!("Error: {}", format_error(api_err)),
            None => eprintln!("Error: {err:#}"),
        }
        drop(log_guard);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();
    if let Some(url) = args.base_url {
        config.base_url = Some(url);
    }
    if let Some(size) = args.page_size.filter(|s| *s > 0) {
        config.page_size = size;
    }

    match args.command {
        Command::Resources => {
            for key in get_all_resource_keys() {
                if let Some(def) = get_resource(key) {
                    let ops: Vec<&str> = def.operations.iter().map(|op| op.as_str()).collect();
                    println!("{:<20} {:<32} {}", key, def.endpoint, ops.join(","));
                }
            }
            Ok(())
        }
        Command::Config { action } => run_config(action, &config),
        Command::Name { kind, ids } => {
            let services = Services::from_config(config)?;
            let resolver = NameResolver::new(&services);
            if let [id] = ids.as_slice() {
                println!("{}", resolver.name(kind, id).await?);
            } else {
                for (id, name) in ids.iter().zip(resolver.names(kind, &ids).await) {
                    println!("{}\t{}", id, name);
                }
            }
            Ok(())
        }
        Command::EmployeeCreate { name, role } => {
            let services = Services::from_config(config)?;
            let employee = services.employees.create_with_role(&name, role).await;
            print_toast(&services);
            print_json(&employee?)
        }
        Command::Resource(argv) => {
            let Some(resource) = argv.first().cloned() else {
                anyhow::bail!("missing resource name");
            };
            let command = ResourceCommand::try_parse_from(&argv).unwrap_or_else(|e| e.exit());
            let services = Services::from_config(config)?;
            dispatch(&services, &resource, command.action).await
        }
    }
}

fn run_config(action: ConfigAction, effective: &Config) -> Result<()> {
    match action {
        ConfigAction::Show => {
            if let Some(path) = Config::config_path() {
                println!("# {}", path.display());
            }
            println!("{}", serde_json::to_string_pretty(effective)?);
            println!("# effective base URL: {}", effective.effective_base_url());
            Ok(())
        }
        ConfigAction::SetBaseUrl { url } => {
            let mut saved = Config::load();
            saved.set_base_url(&url).context("Failed to save base URL")?;
            println!("Base URL set to {}", url);
            Ok(())
        }
        ConfigAction::SetPageSize { size } => {
            let mut saved = Config::load();
            saved.set_page_size(size).context("Failed to save page size")?;
            println!("Page size set to {}", size);
            Ok(())
        }
    }
}

/// Map a resource key to its record type
async fn dispatch(services: &Services, resource: &str, action: Action) -> Result<()> {
    match resource {
        "product" => run_action::<Product>(services, action).await,
        "vehicle" => run_action::<Vehicle>(services, action).await,
        "warehouse" => run_action::<Warehouse>(services, action).await,
        "location" => run_action::<Location>(services, action).await,
        "customer" => run_action::<Customer>(services, action).await,
        "employee" => run_action::<Employee>(services, action).await,
        "supplier" => run_action::<Supplier>(services, action).await,
        "office-worker" => run_action::<OfficeWorker>(services, action).await,
        "truck-driver" => run_action::<TruckDriver>(services, action).await,
        "warehouse-worker" => run_action::<WarehouseWorker>(services, action).await,
        "sale" => run_action::<Sale>(services, action).await,
        "opening-stock" => run_action::<OpeningStock>(services, action).await,
        "take-stock" => run_action::<TakeStock>(services, action).await,
        "give-stock" => run_action::<GiveStock>(services, action).await,
        "warehouse-load-in" => run_action::<WarehouseLoadIn>(services, action).await,
        "warehouse-load-out" => run_action::<WarehouseLoadOut>(services, action).await,
        "sale-return" => run_action::<SaleReturn>(services, action).await,
        "replace-defective" => run_action::<ReplaceDefective>(services, action).await,
        other => Err(stockroom::Error::UnknownResource(other.to_string()).into()),
    }
}

async fn run_action<T: Entity>(services: &Services, action: Action) -> Result<()> {
    let queries: ResourceQueries<T> = services.queries()?;
    let def = queries.client().definition();

    match action {
        Action::List { page, query, sort, desc } => {
            let column = sort.unwrap_or_else(|| def.default_sort.clone());
            let sort = if desc { Sort::desc(column) } else { Sort::asc(column) };
            let result = queries.list(page.max(1), &query, &sort).await?;
            let rows = (*result).clone().map(|record| serde_json::to_value(record).unwrap_or(Value::Null));
            print!("{}", table::render_page(def, &rows, page.max(1)));
        }
        Action::Get { id } => {
            let record = queries.by_id(&id).await?;
            print_json(&*record)?;
        }
        Action::All => {
            let records = queries.all().await?;
            let rows = records
                .iter()
                .map(serde_json::to_value)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            print!("{}", table::render_rows(def, &rows));
        }
        Action::Create { json } => {
            let draft: T = serde_json::from_str(&json).context("Invalid record JSON")?;
            let created = forms::submit(&queries, &draft, None).await;
            print_toast(services);
            print_json(&created?)?;
        }
        Action::Update { json } => {
            let draft: T = serde_json::from_str(&json).context("Invalid record JSON")?;
            let original = if draft.has_id() && def.supports(Operation::Get) {
                Some(queries.by_id(draft.id()).await?)
            } else {
                None
            };
            let updated = match original.as_deref() {
                Some(original) => forms::submit(&queries, &draft, Some(original)).await,
                None => queries.update(&draft).await,
            };
            print_toast(services);
            print_json(&updated?)?;
        }
        Action::Delete { id } => {
            let result = queries.remove(&id).await;
            print_toast(services);
            result?;
        }
        Action::Exists { value } => {
            println!("{}", queries.exists(&value).await?);
        }
    }
    Ok(())
}

fn print_json<S: serde::Serialize>(value: &S) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_toast(services: &Services) {
    if let Some(toast) = services.current_toast() {
        eprintln!("{}", toast);
    }
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use zsquery::config::Config;
use zsquery::datasource::{describe_read_error, read_data_sources, DataSourceConfig};
use zsquery::resource::{get_all_data_source_keys, get_data_source};
use zsquery::zstack::client::ZStackClient;

/// Read ZStack data sources
#[derive(Parser, Debug)]
#[command(name = "zsquery", version = zsquery::VERSION, about, long_about = None)]
struct Args {
    /// Data sources to read (e.g. zstack_clusters)
    data_sources: Vec<String>,

    /// Server-side condition on a logical attribute, as key=value
    #[arg(short, long = "query", value_parser = parse_key_value)]
    query: Vec<(String, String)>,

    /// Client-side filter on a logical attribute, as key=value
    #[arg(short, long = "filter", value_parser = parse_key_value)]
    filter: Vec<(String, String)>,

    /// ZStack management server host
    #[arg(long)]
    host: Option<String>,

    /// ZStack management server API port
    #[arg(long)]
    port: Option<u16>,

    /// Session UUID to authenticate with
    #[arg(long)]
    session: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// List registered data sources and exit
    #[arg(long)]
    list: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
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

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("zsquery started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("zsquery").join("zsquery.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".zsquery").join("zsquery.log");
    }
    PathBuf::from("zsquery.log")
}

fn print_data_sources() {
    for key in get_all_data_source_keys() {
        if let Some(def) = get_data_source(key) {
            println!("{:<28} {}", key, def.display_name);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    if args.list {
        print_data_sources();
        return Ok(());
    }

    let mut config = Config::load();
    if args.host.is_some() {
        config.host = args.host.clone();
    }
    if args.port.is_some() {
        config.port = args.port;
    }
    if args.session.is_some() {
        config.session_uuid = args.session.clone();
    }

    let keys = if args.data_sources.is_empty() {
        match config.last_data_source.clone() {
            Some(last) => vec![last],
            None => anyhow::bail!("No data source given. Use --list to see the available ones"),
        }
    } else {
        args.data_sources.clone()
    };

    tracing::info!(
        "Using ZStack endpoint {}:{}",
        config.effective_host(),
        config.effective_port()
    );

    let client = ZStackClient::from_config(&config)?;
    let ds_config = DataSourceConfig {
        query: args.query.into_iter().collect(),
        filter: args.filter.into_iter().collect(),
    };

    let states = match read_data_sources(&client, &keys, &ds_config).await {
        Ok(states) => states,
        Err(e) => {
            tracing::error!("Read failed: {:?}", e);
            eprintln!("Error: {}", describe_read_error(&e));
            std::process::exit(1);
        }
    };

    for state in &states {
        match args.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(state)?),
        }
    }

    // Reload so that CLI overrides (session included) are not persisted
    if let Some(last) = keys.last() {
        if let Err(e) = Config::load().set_last_data_source(last) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    Ok(())
}

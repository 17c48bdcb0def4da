use clap::Parser;
use fern::{
    colors::{Color, ColoredLevelConfig},
    Dispatch,
};
use hawaii_climate_core::{
    find_config_file, load_config, ConfigSource, DEFAULT_API_PORT, DEFAULT_DATABASE_PATH,
};
use log::LevelFilter;
use std::env;
use time::{format_description::well_known::Iso8601, OffsetDateTime};

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "Hawaii Climate API - read-only REST API over historical weather measurements"
)]
pub struct Cli {
    /// Path to config file (TOML format)
    /// Searched in order: this flag, $CLIMATE_API_CONFIG, ./climate.toml,
    /// $XDG_CONFIG_HOME/hawaii-climate/climate.toml, /etc/hawaii-climate/climate.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "CLIMATE_API_LEVEL")]
    pub level: Option<String>,

    /// Host to listen on (use 0.0.0.0 for all interfaces)
    #[arg(short, long, env = "CLIMATE_API_HOST")]
    #[serde(alias = "host")]
    pub domain: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLIMATE_API_PORT")]
    pub port: Option<String>,

    /// SQLite file holding the station and measurement tables
    #[arg(long, env = "CLIMATE_API_DATABASE")]
    #[serde(alias = "database_path")]
    pub database: Option<String>,
}

impl Cli {
    /// Get the effective configuration value with defaults
    pub fn host(&self) -> String {
        self.domain
            .clone()
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| DEFAULT_API_PORT.to_string())
    }

    pub fn database(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
    }

    /// Fill anything not given on the command line from the config file
    pub fn merge(self, file_config: Cli) -> Cli {
        Cli {
            config: self.config,
            level: self.level.or(file_config.level),
            domain: self.domain.or(file_config.domain),
            port: self.port.or(file_config.port),
            database: self.database.or(file_config.database),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> anyhow::Result<Cli> {
    resolve_config(Cli::parse())
}

/// Merge parsed CLI args over the config file they point at, or the one found
/// in the standard locations. A config file that exists but cannot be read or
/// parsed is an error, as is a `--config` path that does not exist.
pub fn resolve_config(cli_args: Cli) -> anyhow::Result<Cli> {
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("CLIMATE_API_CONFIG", "climate.toml")
    };

    let file_config: Cli = load_config(&source)?;

    // CLI args override file config (env vars are handled by clap)
    Ok(cli_args.merge(file_config))
}

pub fn get_log_level(cli: &Cli) -> LevelFilter {
    let level_str = cli
        .level
        .clone()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    match level_str.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logger() -> Dispatch {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let now = OffsetDateTime::now_utc()
                .format(&Iso8601::DEFAULT)
                .unwrap_or_default();
            out.finish(format_args!(
                "[{} {}] {}: {}",
                now,
                colors.color(record.level()),
                record.target(),
                message
            ));
        })
        .chain(std::io::stdout())
}

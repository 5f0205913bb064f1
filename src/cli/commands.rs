//! CLI command implementations
//!
//! Boot sequence shared by every command that touches data:
//! 1. Configuration load (file, then `PORT`, then `--port`)
//! 2. Logging
//! 3. Schema load and compile
//! 4. Store open (a failed load is logged and starts empty)
//! 5. Service / HTTP activation

use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::http_server::config::PORT_ENV;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::{self, Event};
use crate::present::export_csv;
use crate::query::SortOrder;
use crate::schema::{CompiledSchema, SchemaLoader, SchemaValidator};
use crate::storage::{JsonFileBackend, SubmissionStore};
use crate::submissions::SubmissionService;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_object, write_error, write_response, write_text};

/// Config path used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./dynaform.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `submissions.json` (default "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// JSON FormSchema file; the built-in onboarding form when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_path: Option<String>,

    /// Log filter directive (default "info"); `RUST_LOG` wins
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            schema_path: None,
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Like `load`, but a missing file at the default path yields defaults
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validate configuration
    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if EnvFilter::try_new(&self.log_level).is_err() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'",
                self.log_level
            )));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if let Some(schema) = &self.schema_path {
            if schema.trim().is_empty() {
                return Err(CliError::config_error("schema_path must not be empty"));
            }
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Get the schema file, if one is configured
    pub fn schema_file(&self) -> Option<&Path> {
        self.schema_path.as_deref().map(Path::new)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Validate { config, values } => validate(&config, &values),
        Command::Export {
            config,
            output,
            sort_order,
            q,
        } => export(&config, output.as_deref(), sort_order, q),
    }
}

/// Loads and compiles the configured form schema
pub fn load_schema(config: &Config) -> CliResult<CompiledSchema> {
    let loader = SchemaLoader::from_config(config.schema_file());
    let compiled = loader.load(Local::now().date_naive())?;

    tracing::info!(
        event = %Event::SchemaLoaded,
        title = %compiled.schema().title,
        fields = compiled.fields().len(),
        "form schema loaded"
    );

    Ok(compiled)
}

/// Schema, store and service for a loaded config
pub fn boot(config: &Config) -> CliResult<Arc<SubmissionService>> {
    let compiled = load_schema(config)?;
    let backend = JsonFileBackend::in_dir(config.data_path());
    let store = SubmissionStore::open(Box::new(backend));

    Ok(Arc::new(SubmissionService::new(Arc::new(compiled), store)))
}

/// Create the data directory, an empty store and a default config.
///
/// An existing config is kept; an existing store is left untouched.
pub fn init(config_path: &Path) -> CliResult<()> {
    let created_config = !config_path.exists();
    let config = if created_config {
        let config = Config::default();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(config_path, serde_json::to_string_pretty(&config)?)
            .map_err(|e| CliError::config_error(format!("Failed to write config: {}", e)))?;
        config
    } else {
        Config::load(config_path)?
    };

    let backend = JsonFileBackend::in_dir(config.data_path());
    backend.ensure()?;

    write_response(json!({
        "initialized": true,
        "config": config_path.display().to_string(),
        "config_created": created_config,
        "store": backend.path().display().to_string(),
    }))?;

    Ok(())
}

/// Resolves the listener settings: config, then `PORT`, then `--port`
pub fn resolve_http(config: &Config, env_port: Option<&str>, port: Option<u16>) -> HttpServerConfig {
    let mut http = config.http.clone();
    http.apply_port_override(env_port);
    if let Some(port) = port {
        http.port = port;
    }
    http
}

/// Start the HTTP server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    observability::init(&config.log_level);
    tracing::info!(event = %Event::BootStart, "booting");
    tracing::info!(
        event = %Event::ConfigLoaded,
        path = %config_path.display(),
        data_dir = %config.data_dir,
        "configuration loaded"
    );

    let service = boot(&config)?;
    let env_port = std::env::var(PORT_ENV).ok();
    let http = resolve_http(&config, env_port.as_deref(), port);
    let server = HttpServer::with_config(http, service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Validate a values file; prints field errors and fails when invalid
pub fn validate(config_path: &Path, values_path: &Path) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    observability::init(&config.log_level);

    let compiled = load_schema(&config)?;
    let values = read_object(values_path)?;
    let errors = SchemaValidator::new(&compiled).validate(&values);

    if errors.is_empty() {
        write_response(json!({ "valid": true }))?;
        return Ok(());
    }

    let err = CliError::invalid_values(errors.len());
    write_error(err.code_str(), err.message(), serde_json::to_value(&errors)?)?;
    Err(err)
}

/// Export matching submissions as CSV
pub fn export(
    config_path: &Path,
    output: Option<&Path>,
    order: SortOrder,
    search: Option<String>,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    observability::init(&config.log_level);

    let service = boot(&config)?;
    let submissions = service.matching(search.as_deref(), order);
    let csv = export_csv(service.schema(), &submissions)?;

    write_text(output, &csv)
}

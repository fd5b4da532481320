//! apikey-auth CLI application.
//!
//! This is the main entry point for the apikey-auth binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use apikey_auth::auth::API_KEY_SCHEME;
use apikey_auth::config::LoggingConfig;
use apikey_auth::utils::logging::init_logging;
use apikey_auth::{parse_authorization, AuthServer, Config};

/// apikey-auth CLI
#[derive(Parser)]
#[command(name = "apikey-auth")]
#[command(about = "Extract `Authorization: ApiKey <token>` credentials")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log level
    #[arg(long)]
    log_level: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the demo server
    Start {
        /// HTTP bind address
        #[arg(long)]
        bind: Option<String>,

        /// HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Parse an Authorization header value and print the API key
    Check {
        /// Raw header value, e.g. "ApiKey my-key"
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Generate a default configuration file
    Config {
        /// Output file path
        #[arg(short, long, default_value = "apikey-auth.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Configuration file to validate
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show build information
    Info,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_ref())?;

    // Initialize logging
    init_logging(&logging_config(&config.logging, cli.log_level, cli.verbose))?;

    match cli.command {
        Some(Commands::Start { bind, port }) => {
            if let Some(bind) = bind {
                config.server.bind_address = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            start_server(config).await?;
        }
        Some(Commands::Check { value }) => {
            if !check_header(&value) {
                std::process::exit(1);
            }
        }
        Some(Commands::Config { output, force }) => {
            generate_config(output, force)?;
        }
        Some(Commands::Validate { file }) => {
            validate_config(file)?;
        }
        Some(Commands::Info) => {
            show_info();
        }
        None => {
            // Default to starting the server
            start_server(config).await?;
        }
    }

    Ok(())
}

/// Load the configuration file, or defaults when none is given
fn load_config(path: Option<&PathBuf>) -> apikey_auth::Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

/// Apply CLI logging overrides on top of the configured values
fn logging_config(base: &LoggingConfig, level: Option<String>, verbose: bool) -> LoggingConfig {
    let mut logging = base.clone();
    if let Some(level) = level {
        logging.level = level;
    }
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}

/// Start the demo server
async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let server = AuthServer::new(config)?;

    info!("Server configuration:");
    info!("  Name: {}", server.config().server.name);
    info!("  Address: {}", server.config().server.bind_addr());

    server.run().await?;
    Ok(())
}

/// Print the key extracted from `value` to stdout, or the error to stderr;
/// returns false on failure
fn check_header(value: &str) -> bool {
    match parse_authorization(value) {
        Ok(key) => {
            println!("{}", key.as_str());
            true
        }
        Err(err) => {
            eprintln!("error: {} ({})", err, err.kind());
            false
        }
    }
}

/// Generate a default configuration file
fn generate_config(output: PathBuf, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if output.exists() && !force {
        error!("Configuration file already exists: {}", output.display());
        error!("Use --force to overwrite");
        std::process::exit(1);
    }

    let config = Config::default();
    config.to_file(&output)?;

    info!("Generated configuration file: {}", output.display());
    Ok(())
}

/// Validate a configuration file
fn validate_config(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    info!("Validating configuration file: {}", file.display());

    let config = Config::from_file(&file)?;
    config.validate()?;

    info!("Configuration file is valid");
    Ok(())
}

/// Show build information
fn show_info() {
    info!("apikey-auth");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    info!("--------------------------------");
    info!("Header format: Authorization: {} <token>", API_KEY_SCHEME);
    info!("Routes:");
    info!("  GET /healthz     health check");
    info!("  GET /v1/whoami   requires an API key");
    info!("--------------------------------");
    info!("Repository: {}", env!("CARGO_PKG_REPOSITORY"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["apikey-auth", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["apikey-auth", "start", "--port", "9090"]).unwrap();
        if let Some(Commands::Start { bind, port }) = cli.command {
            assert_eq!(bind, None);
            assert_eq!(port, Some(9090));
        } else {
            panic!("Expected Start command");
        }

        let cli = Cli::try_parse_from(["apikey-auth", "check", "ApiKey abc"]).unwrap();
        if let Some(Commands::Check { value }) = cli.command {
            assert_eq!(value, "ApiKey abc");
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_check_header() {
        assert!(check_header("ApiKey test-api-key"));
        assert!(!check_header("Bearer test-api-key"));
        assert!(!check_header(""));
    }

    #[test]
    fn test_logging_overrides() {
        let base = LoggingConfig::default();

        let logging = logging_config(&base, Some("warn".to_string()), false);
        assert_eq!(logging.level, "warn");

        let logging = logging_config(&base, Some("warn".to_string()), true);
        assert_eq!(logging.level, "debug");

        let logging = logging_config(&base, None, false);
        assert_eq!(logging, base);
    }

    #[test]
    fn test_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test-config.toml");

        // Generate config
        assert!(generate_config(config_path.clone(), false).is_ok());
        assert!(config_path.exists());

        // Validate generated config
        assert!(validate_config(config_path.clone()).is_ok());
        assert_eq!(load_config(Some(&config_path)).unwrap(), Config::default());
    }
}

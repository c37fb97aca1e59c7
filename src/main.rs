//! MCP Server Entry Point
//!
//! Initializes logging, opens the prompt library, and serves it over the
//! configured transport until the transport stops or Ctrl-C arrives.

use anyhow::Result;
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_library_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(&config.logging.level, config.logging.with_timestamps);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::open(config).await?;
    let library = server.library().clone();

    info!("Server initialized");

    tokio::select! {
        result = transport.run(server) => {
            if let Err(e) = &result {
                error!("Transport stopped: {}", e);
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received");
        }
    }

    if library.snapshot_path().is_some() {
        library.save().await?;
        info!("Library saved");
    }

    info!("Server shutting down");
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr; stdout belongs to the STDIO transport.
/// `RUST_LOG` directives are layered on top of the configured level.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}

mod grpc_service;
mod server_config;
mod session_manager;

use clap::Parser;
use tonic::transport::Server;

use common::config::{ConfigManager, ConfigSource, FileContentConfigProvider, Validate};
use common::games::connect_four::ConnectFourSession;
use common::{four_lines_service_server::FourLinesServiceServer, log, logger};
use grpc_service::GrpcService;
use server_config::{DEFAULT_CONFIG_PATH, ServerConfig};
use session_manager::SessionManager;

#[derive(Parser)]
#[command(name = "four_lines_server", version, about = "Two-player Connect-Four session server")]
struct Args {
    /// YAML configuration file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Board dimension, overrides the configuration file.
    #[arg(long)]
    dimension: Option<u32>,

    /// Socket address to listen on, overrides the configuration file.
    #[arg(long)]
    listen_address: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let (config, source) = config_manager.load()?;
    match source {
        ConfigSource::Stored(path) => log!("Loaded configuration from {}", path),
        ConfigSource::Defaults => log!("No configuration at {}, using defaults", args.config),
    }

    let config = config.with_overrides(args.listen_address, args.dimension);
    config.validate()?;
    let addr = config.socket_addr()?;

    let session = ConnectFourSession::new(config.dimension as usize);
    log!("Created {0}x{0} game session", session.dimension());

    let session_manager = SessionManager::new(session);
    let grpc_service = GrpcService::new(session_manager);

    log!("Four Lines server listening on {}", addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    Server::builder()
        .add_service(FourLinesServiceServer::new(grpc_service))
        .serve_with_shutdown(addr, shutdown_signal)
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}

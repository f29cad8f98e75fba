use clap::Parser;
use placesim_api::RestApi;
use placesim_storage::DatasetManager;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Similar-place query service for state, county and city finances
#[derive(Parser, Debug)]
#[command(name = "placesim")]
#[command(about = "Find places with similar revenue, taxes, expenditures and more", long_about = None)]
struct Args {
    /// Directory holding state.csv, county.csv and city.csv (optionally .gz)
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting placesim v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);

    let manager = DatasetManager::open(&args.data_dir)?;
    let engine = manager.engine();
    info!("Dataset loaded");

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, &host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://{}:{}/api/similar", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

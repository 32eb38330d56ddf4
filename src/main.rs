use clap::Parser;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod api;
mod config;
mod error;
mod http;
mod logger;
mod server;
mod store;

/// In-memory expense tracking HTTP server
#[derive(Parser, Debug)]
#[command(name = "expense_server")]
#[command(version)]
#[command(about = "In-memory expense tracking HTTP server", long_about = None)]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config")]
    config: String,

    /// Host to bind to, overriding the config file
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = config::Overrides {
        host: cli.host,
        port: cli.port,
    };
    let cfg = config::Config::load_from(&cli.config, &overrides)?;
    logger::init(&cfg)?;

    // Worker threads follow the config, defaulting to the CPU count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(config::AppState::new(&cfg));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&listener.local_addr()?, &cfg);

    server::start_server_loop(listener, state, active_connections, signals).await?;
    Ok(())
}

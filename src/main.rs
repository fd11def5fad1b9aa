use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from("devserve")?;

    // Build the Tokio runtime, sizing the thread pool from configuration
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    // Serve the app sitting next to the binary: enter the serving root so
    // every relative path resolves against it
    let root = cfg.resolve_root()?;
    std::env::set_current_dir(&root)?;
    let root = root.canonicalize()?;

    let addr = cfg.get_socket_addr()?;

    // Bind before spawning anything; a port conflict should abort startup
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &root, &cfg);

    let state = Arc::new(config::AppState::new(cfg, root));
    let active_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&signals));

    // LocalSet for spawn_local support in connection handling
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_accept_loop(
            listener,
            state,
            active_connections,
            Arc::clone(&signals.shutdown),
        ))
        .await;

    logger::log_server_stopped();
    Ok(())
}

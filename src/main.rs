use schedule_server::{config, logger, server};
use std::sync::Arc;
use tokio::sync::Notify;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path_from_args(std::env::args().skip(1))?;
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("[CONFIG] Using {workers} worker threads"));
    } else {
        logger::log_info("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

/// Accepts `--config <path>` / `-c <path>`; defaults to `config.toml` in the working directory
fn config_path_from_args(mut args: impl Iterator<Item = String>) -> Result<String, String> {
    let mut path = config::DEFAULT_CONFIG_PATH.to_string();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                path = args
                    .next()
                    .ok_or_else(|| format!("Missing value for {arg}"))?;
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(path)
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_reusable_listener(addr, cfg.server.backlog)?;

    logger::log_server_start(&addr, &cfg);
    logger::log_info(&format!(
        "  - GET  http://{addr}{}{{numerator|denominator}}",
        cfg.routes.schedule_prefix
    ));
    logger::log_info(&format!("  - GET  http://{addr}{}", cfg.routes.groups_path));
    if cfg.routes.health.enabled {
        logger::log_info(&format!(
            "  - GET  http://{addr}{}",
            cfg.routes.health.liveness_path
        ));
    }

    let data_dir = std::path::Path::new(&cfg.schedule.data_dir);
    if !data_dir.is_dir() {
        logger::log_warning(&format!(
            "Schedule data directory '{}' does not exist; every schedule request will return 404",
            data_dir.display()
        ));
    }

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown))?;

    let state = Arc::new(config::AppState::new(cfg));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_server(listener, state, shutdown))
        .await?;

    logger::log_info("Server stopped");
    Ok(())
}

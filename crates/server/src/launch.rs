//! Process entry shared by the `counter` and `albums` binaries.

use std::process::ExitCode;

use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use crate::startup::{self, Service};

fn init_logging(service: Service) {
    // load .env first so RUST_LOG / LOG_FORMAT from it take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = service.name(), event = "logger_init", "tracing subscriber initialized");
}

/// Build the runtime, run `service` and translate the outcome into an exit code.
/// Any startup failure (missing `DB_DSN`, unreachable database, bind error) is fatal.
pub fn launch(service: Service) -> ExitCode {
    init_logging(service);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    let name = service.name();

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = name,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    // config.toml, then TOKIO_WORKER_THREADS (resolved by configs); an invalid
    // config fails in startup::run, the runtime only has to exist to report it
    let worker_threads = match configs::AppConfig::load_and_validate(service.default_port()) {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var(configs::WORKER_THREADS_ENV).ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads.filter(|w| *w > 0) { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = name, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = name,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "service starting"
    );

    match rt.block_on(startup::run(service)) {
        Ok(()) => {
            info!(service = name, event = "stop", %service_id, pid, "service stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = name, event = "run_failed", error = %e, "service failed");
            ExitCode::FAILURE
        }
    }
}

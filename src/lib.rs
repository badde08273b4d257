pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use crate::infrastructure::config::ConfigService;
use crate::interfaces::http::{add_log, start_server, HttpState};
use actix_web::web;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = match ConfigService::new().load() {
        Ok(config) => config,
        Err(err) => {
            let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
            error!(error = %err, "Failed to load dashboard config");
            return Err(std::io::Error::other(err));
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .try_init();

    let logs = Arc::new(Mutex::new(Vec::new()));
    let state = web::Data::new(HttpState::from_config(&config, logs.clone()));

    // Load once up front so the first request does not pay for file I/O
    let warm = state.clone();
    match tokio::task::spawn_blocking(move || warm.cache.session()).await {
        Ok(Ok(session)) => {
            info!(
                file = %session.file_name,
                encoding = %session.encoding,
                rows = session.dataset.row_count(),
                "Dataset ready"
            );
            add_log(
                &logs,
                "INFO",
                "Loader",
                &format!(
                    "Using file {} ({}, {} rows)",
                    session.file_name,
                    session.encoding,
                    session.dataset.row_count()
                ),
            );
        }
        Ok(Err(err)) => {
            error!(error = %err, "No usable data file; dashboard endpoints will report the error");
            add_log(&logs, "ERROR", "Loader", &err.to_string());
        }
        Err(err) => {
            error!(error = %err, "Dataset load task failed");
        }
    }

    info!(host = %config.host, port = config.port, "Starting dashboard server");
    start_server(state, &config.host, config.port)?.await
}

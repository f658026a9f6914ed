//! Blog API server entry point.
//!
//! # Responsibility
//! - Load configuration from the environment and start logging.
//! - Verify the database is reachable and migrated before accepting traffic.
//! - Serve the three blog endpoints over HTTP.

mod server;

use blog_core::db::{open_database, DatabaseUrl};
use blog_core::{core_version, init_logging, BlogConfig};
use log::{error, info, warn};
use server::BlogServer;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match BlogConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("blog_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("blog_server: {err}");
        return ExitCode::FAILURE;
    }

    let db = match config.database() {
        Ok(db) => db,
        Err(err) => {
            error!("event=server_start module=server status=error error_code=config_invalid error={err}");
            return ExitCode::FAILURE;
        }
    };
    if db == DatabaseUrl::Memory {
        warn!("event=server_start module=server status=warn reason=memory_database_not_shared_between_requests");
    }
    // Fail fast on an unreachable or too-new database; the connection is
    // closed right away.
    if let Err(err) = open_database(&db) {
        error!("event=server_start module=server status=error error_code=db_unavailable error={err}");
        return ExitCode::FAILURE;
    }

    info!(
        "event=server_start module=server status=start addr={} database={} version={}",
        config.socket_addr(),
        db,
        core_version()
    );

    match BlogServer::new(&config, db).start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_stop module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

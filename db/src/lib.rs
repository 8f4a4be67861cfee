pub mod catalog;
pub mod models;
pub mod test_utils;


use common::config;
use sea_orm::{Database, DatabaseConnection, DbErr};
use std::path::Path;
use tracing::warn;

/// Connect to the configured database. `DATABASE_PATH` may be a full DSN or a SQLite file path.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    Database::connect(&sqlite_url(&config::database_path())).await
}

/// Turn a file path into a SQLite DSN, creating its directory. DSNs pass through unchanged.
pub fn sqlite_url(path_or_url: &str) -> String {
    if path_or_url.starts_with("sqlite:") {
        return path_or_url.to_string();
    }

    // SQLite won't create intermediate directories.
    if let Some(parent) = Path::new(path_or_url).parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %err, "failed to create database directory");
        }
    }
    format!("sqlite://{path_or_url}?mode=rwc")
}

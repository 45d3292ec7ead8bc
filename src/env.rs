use log::{info, warn};
use std::{
    env as stdenv,
    path::{Path, PathBuf},
};

/// Reads `.env` from the working directory (or a parent) into the process
/// environment. Silent, so it can run before a logger exists; pass the
/// result to [`report_env_file`] once one does.
pub fn load_env_file() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn report_env_file(loaded: Option<&Path>) {
    match loaded {
        Some(path) => info!(".env loaded from: {}", path.display()),
        None => {
            let current_dir = stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
            warn!(".env file not found. Expected it at: {}", current_dir.join(".env").display());
        }
    }
}

pub fn load_env_var(key: &str, default: &str) -> String {
    stdenv::var(key).unwrap_or_else(|_| default.to_string())
}

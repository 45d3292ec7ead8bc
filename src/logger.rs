use crate::env::{load_env_file, report_env_file};
use chrono::Local;
use colored::*;
use env_logger::{Builder, Env, Target};
use log::{debug, SetLoggerError};
use std::{env as stdenv, io::Write, path::Path};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs the coloured `env_logger` format on stderr, filtered by
/// `RUST_LOG` (default `info`). `.env` is loaded first so it can set
/// `RUST_LOG`; whether it was found is logged once the logger is up.
///
/// Errors if a logger is already installed in this process.
pub fn setup_logger() -> Result<(), SetLoggerError> {
    setup_logger_to(Target::Stderr)
}

/// Same as [`setup_logger`], writing to `target`.
pub fn setup_logger_to(target: Target) -> Result<(), SetLoggerError> {
    let env_file = load_env_file();
    let this_script_name = Path::new(&stdenv::args().next().unwrap_or_default())
        .file_name()
        .unwrap_or_default()
        .to_str()
        .unwrap_or_default()
        .to_owned();
    let trace_mode = matches!(stdenv::var("RUST_LOG"), Ok(val) if val.to_lowercase() == "trace");
    let prefix = format!("{}_{}", this_script_name, VERSION);

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(target)
        .format(move |buf, record| {
            let level = match record.level() {
                log::Level::Error => format!("{}", record.level()).red(),
                log::Level::Warn => format!(" {}", record.level()).yellow(),
                log::Level::Info => format!(" {}", record.level()).green(),
                log::Level::Debug => format!("{}", record.level()).blue(),
                log::Level::Trace => format!("{}", record.level()).purple(),
            };
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);

            if trace_mode {
                writeln!(buf, "{}:{} {}: {}", file, line, level, record.args())
            } else {
                writeln!(
                    buf,
                    "{}:{} [{} {}]{}: {}",
                    file,
                    line,
                    prefix.dimmed(),
                    Local::now().format("%Y%m%d %H:%M:%S").to_string().purple(),
                    level,
                    record.args()
                )
            }
        })
        .try_init()?;
    report_env_file(env_file.as_deref());
    debug!("Logger initialized");
    Ok(())
}

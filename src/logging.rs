//! Simple tracing subscriber setup for binaries embedding the crate.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        SubscriberBuilder, fmt,
        format::{DefaultFields, Format, Full},
        time::ChronoLocal,
        writer::MakeWriterExt,
    },
};

use crate::error::AppError;

/// Guard to ensure buffered logs are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

type Builder = SubscriberBuilder<DefaultFields, Format<Full, ChronoLocal>, EnvFilter>;

fn builder(env_filter: EnvFilter) -> Builder {
    fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(true)
        .with_level(true)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = builder(env_filter);

    let res = if let Ok(dir) = env::var("LOG_DIR") {
        let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
        let writer = stdout.and(init_file_writer(&dir)?);

        builder.with_writer(writer).try_init()
    } else {
        builder.try_init()
    };
    res.map_err(|e| AppError::Config(format!("logger: {e}")))?;

    tracing::info!("logger initialized");
    Ok(())
}

fn init_file_writer(dir: &str) -> Result<NonBlocking, AppError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("rankwarden.log");

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder
        .build(dir)
        .map_err(|e| AppError::Config(format!("failed to create log file in {dir}: {e}")))?;

    let (file_writer, guard) = non_blocking(file_appender);

    if LOG_GUARD.set(guard).is_err() {
        return Err(AppError::Config("logger already initialized".into()));
    }

    Ok(file_writer)
}

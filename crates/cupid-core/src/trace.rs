//! Tracing subscriber configured by the `[tracing]` table.
//!
//! ```toml
//! [tracing]
//! log-dir = "logs"
//! log-rotation = "daily"
//! format = "json"
//! level = "info"
//! filter = "info,cupid_core=debug"
//! ```
use crate::{extension::TomlTableExt, state::State};
use std::{fs, io, path::PathBuf, sync::OnceLock};
use tracing::Level;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{filter::LevelFilter, fmt::writer::MakeWriterExt, layer::SubscriberExt};

#[cfg(feature = "env-filter")]
use tracing_subscriber::filter::EnvFilter;

/// Initializes the tracing subscriber with the config of the state.
///
/// Subsequent calls log a warning and return.
pub fn init(state: &State) {
    if TRACING_APPENDER_GUARD.get().is_some() {
        tracing::warn!("tracing subscriber has already been initialized");
        return;
    }

    let app_env = state.env();
    let in_dev_mode = app_env.is_dev();
    let mut event_format = if in_dev_mode { "pretty" } else { "json" };
    let mut level_filter = if in_dev_mode {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let mut stdout_max_level = if in_dev_mode {
        Level::DEBUG
    } else {
        Level::WARN
    };
    #[cfg(feature = "env-filter")]
    let mut env_filter = if in_dev_mode {
        "info,cupid_core=debug,cupid_form=debug"
    } else {
        "warn,cupid_core=info,cupid_form=info"
    };

    let mut log_dir = "logs";
    let mut log_rotation = "daily";
    let mut ansi_terminal = true;
    let mut display_target = true;
    let mut display_filename = false;
    let mut display_line_number = false;
    if let Some(config) = state.config().get_table("tracing") {
        if let Some(dir) = config.get_str("log-dir") {
            log_dir = dir;
        }
        if let Some(rotation) = config.get_str("log-rotation") {
            log_rotation = rotation;
        }
        if let Some(format) = config.get_str("format") {
            event_format = format;
        }
        if let Some(level) = config.get_str("level") {
            match (level.parse::<Level>(), level.parse::<LevelFilter>()) {
                (Ok(max_level), Ok(filter)) => {
                    stdout_max_level = max_level;
                    level_filter = filter;
                }
                _ => tracing::warn!("invalid tracing level `{level}`"),
            }
        }
        #[cfg(feature = "env-filter")]
        if let Some(filter) = config.get_str("filter") {
            env_filter = filter;
        }
        ansi_terminal = config.get_bool("ansi").unwrap_or(true);
        display_target = config.get_bool("display-target").unwrap_or(true);
        display_filename = config.get_bool("display-filename").unwrap_or(in_dev_mode);
        display_line_number = config
            .get_bool("display-line-number")
            .unwrap_or(in_dev_mode);
    }

    let log_dir = PathBuf::from(log_dir);
    if let Err(err) = fs::create_dir_all(&log_dir) {
        let log_dir = log_dir.display();
        tracing::error!("fail to create the log directory `{log_dir}`: {err}");
        return;
    }

    let rotation = match log_rotation {
        "minutely" => Rotation::MINUTELY,
        "hourly" => Rotation::HOURLY,
        "daily" => Rotation::DAILY,
        _ => Rotation::NEVER,
    };
    let file_appender = match RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(format!("cupid.{app_env}"))
        .filename_suffix("log")
        .build(&log_dir)
    {
        Ok(appender) => appender,
        Err(err) => {
            tracing::error!("fail to initialize the rolling file appender: {err}");
            return;
        }
    };
    let (non_blocking_appender, worker_guard) = tracing_appender::non_blocking(file_appender);

    // Format layer
    let stdout = io::stdout.with_max_level(stdout_max_level);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(ansi_terminal)
        .with_target(display_target)
        .with_file(display_filename)
        .with_line_number(display_line_number)
        .with_writer(stdout.and(non_blocking_appender));

    #[cfg(feature = "env-filter")]
    let env_filter_layer = match EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .parse(env_filter)
    {
        Ok(layer) => layer,
        Err(err) => {
            tracing::error!("fail to parse the env filter `{env_filter}`: {err}");
            return;
        }
    };

    let subscriber = tracing_subscriber::registry();
    #[cfg(feature = "env-filter")]
    let subscriber = subscriber.with(env_filter_layer);
    #[cfg(not(feature = "env-filter"))]
    let subscriber = subscriber.with(level_filter);
    let result = match event_format {
        "compact" => tracing::subscriber::set_global_default(subscriber.with(fmt_layer.compact())),
        "json" => tracing::subscriber::set_global_default(
            subscriber.with(fmt_layer.json().with_current_span(true)),
        ),
        "pretty" => tracing::subscriber::set_global_default(subscriber.with(fmt_layer.pretty())),
        _ => tracing::subscriber::set_global_default(subscriber.with(fmt_layer)),
    };
    if let Err(err) = result {
        tracing::warn!("fail to set the default subscriber with the `{event_format}` format: {err}");
        return;
    }
    if TRACING_APPENDER_GUARD.set(worker_guard).is_err() {
        tracing::warn!("fail to set the worker guard for the tracing appender");
    }
}

/// Tracing appender guard.
static TRACING_APPENDER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

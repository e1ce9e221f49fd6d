use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file, in which case `RUST_LOG` may override the level.
///
/// With `log_file` set, events are appended to that file instead of stderr,
/// since release builds on Windows run without a console. Calling this more
/// than once keeps the first subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // When debug logging is disabled we force `info` level regardless of the
    // `RUST_LOG` environment variable.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let appender = log_file.and_then(|path| match file_appender(&path) {
        Ok(appender) => Some(appender),
        Err(err) => {
            eprintln!("cannot log to {}: {err}", path.display());
            None
        }
    });

    let _ = match appender {
        Some(appender) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(appender)
            .try_init(),
        None => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
}

fn file_appender(path: &std::path::Path) -> anyhow::Result<RollingFileAppender> {
    let dir = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("log path has no parent folder"))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("log path has no file name"))?;
    std::fs::create_dir_all(dir)?;
    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)?)
}

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize logging with console and optional file output
///
/// `RUST_LOG` wins over `logging.level`. File output goes to a daily rolling
/// file under `MATCHDAY_LOG_DIR` when that directory is writable.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},matchday=debug,sqlx=warn", config.level))
    });

    let file_layer = std::env::var("MATCHDAY_LOG_DIR")
        .ok()
        .and_then(|log_dir| {
            // rolling::daily panics if it cannot create the first file
            if let Err(e) = std::fs::create_dir_all(&log_dir) {
                eprintln!(
                    "Warning: Could not create log directory {} ({}), file logging disabled",
                    log_dir, e
                );
                return None;
            }
            let test_path = std::path::Path::new(&log_dir).join(".matchday_write_test");
            match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&test_path)
            {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_path);
                    let file_appender = tracing_appender::rolling::daily(&log_dir, "matchday.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                    // Lives for the whole process
                    Box::leak(Box::new(guard));

                    Some(
                        tracing_subscriber::fmt::layer()
                            .with_writer(non_blocking)
                            .with_ansi(false)
                            .with_target(true),
                    )
                }
                Err(e) => {
                    eprintln!(
                        "Warning: Could not write to log directory {} ({}), file logging disabled",
                        log_dir, e
                    );
                    None
                }
            }
        });

    let (plain_layer, json_layer) = if config.json {
        (None, Some(tracing_subscriber::fmt::layer().json().with_target(true)))
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            ),
            None,
        )
    };

    let file_logging_enabled = file_layer.is_some();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(plain_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init();

    if file_logging_enabled {
        tracing::info!("File logging enabled");
    }
}

/// Minimal logging for one-shot commands
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

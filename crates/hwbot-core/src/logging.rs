use std::{fs::File, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Result;

/// Initialize logging for the bot.
///
/// Lines go to stdout and, when `log_file` is given, to that file (truncated on start).
/// The filter defaults to info for our crates and can be overridden with `RUST_LOG`.
pub fn init(service_name: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,hwbot_core=info,hwbot_practicum=info,hwbot_telegram=info,{service_name}=info"
        ))
    });

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

use std::{path::Path, process::ExitCode, sync::Arc};

use hwbot_core::{
    config::{self, Config},
    domain::Cursor,
    messaging::notifier::Notifier,
    poller::Poller,
    Result,
};
use hwbot_practicum::PracticumClient;
use hwbot_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> ExitCode {
    config::load_dotenv_if_present(Path::new(".env"));

    if let Err(e) = hwbot_core::logging::init("hwbot", config::log_file().as_deref()) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let poller = match startup(config::env_var) {
        Ok(poller) => poller,
        Err(e) => {
            tracing::error!(kind = ?e.kind(), "fatal: {e}");
            return ExitCode::FAILURE;
        }
    };

    poller.run().await;
    ExitCode::SUCCESS
}

/// Validate configuration and wire the adapters. No poller exists unless this succeeds.
fn startup(lookup: impl Fn(&str) -> Option<String>) -> Result<Poller> {
    let cfg = Config::from_lookup(lookup)?;

    let source = Arc::new(PracticumClient::new(
        cfg.endpoint.clone(),
        cfg.credentials.practicum_token.clone(),
        cfg.http_timeout,
    )?);

    let messenger = Arc::new(TelegramMessenger::from_token(
        cfg.credentials.telegram_token.clone(),
    ));

    tracing::info!(
        endpoint = %source.endpoint(),
        chat_id = %cfg.chat_id,
        interval_secs = cfg.retry_period.as_secs(),
        "hwbot started"
    );

    let notifier = Notifier::new(messenger, cfg.chat_id);
    Ok(Poller::new(source, notifier, cfg.retry_period, Cursor::now()))
}

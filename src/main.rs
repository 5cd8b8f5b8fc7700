use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, Level};

use homework_bot::checkpoint::CheckpointStore;
use homework_bot::config::Config;
use homework_bot::poller::Poller;
use homework_bot::practicum::PracticumClient;
use homework_bot::telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{:#}; the program has been forcibly stopped", err);
            std::process::exit(1);
        }
    };

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed to build HTTP client")?;

    let practicum = PracticumClient::new(
        http.clone(),
        config.endpoint.clone(),
        config.practicum_token.clone(),
    );
    let telegram = TelegramClient::new(
        http,
        config.telegram_token.clone(),
        config.telegram_chat_id.clone(),
    );
    let checkpoint = CheckpointStore::new(config.state_file.clone());

    let poller = Poller::new(practicum, telegram, checkpoint, config.poll_interval)
        .context("failed to restore poller state")?;

    poller.run().await;

    Ok(())
}

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info};

use crate::checkpoint::CheckpointStore;
use crate::error::PollError;
use crate::notifier::ErrorNotifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramClient;
use crate::verdict;

/// The polling loop: fetch homework statuses since the checkpoint,
/// translate and deliver them, advance the checkpoint, sleep, repeat.
pub struct Poller {
    practicum: PracticumClient,
    telegram: TelegramClient,
    checkpoint: CheckpointStore,
    notifier: ErrorNotifier,
    poll_interval: Duration,
    /// Start of the unseen-submissions window for the next fetch.
    from_date: i64,
}

impl Poller {
    /// Restore the checkpoint and assemble the loop state.
    pub fn new(
        practicum: PracticumClient,
        telegram: TelegramClient,
        checkpoint: CheckpointStore,
        poll_interval: Duration,
    ) -> Result<Self, PollError> {
        let from_date = checkpoint.load()?;

        Ok(Self {
            practicum,
            telegram,
            checkpoint,
            notifier: ErrorNotifier::new(),
            poll_interval,
            from_date,
        })
    }

    /// Run forever.
    ///
    /// A failed cycle is logged, reported to the operator through the
    /// notifier, and retried after the usual interval; only process
    /// termination stops the loop.
    pub async fn run(mut self) {
        info!(
            "Polling homework statuses every {}s, starting from {}",
            self.poll_interval.as_secs(),
            self.from_date
        );

        loop {
            if let Err(err) = self.run_cycle().await {
                let text = format!("Program malfunction: {}", err);
                error!("{}", text);
                self.notifier.report(&self.telegram, &text).await;
            }

            sleep(self.poll_interval).await;
        }
    }

    /// Run a single poll cycle.
    ///
    /// Status messages are delivered as records are interpreted, so an
    /// error on a later record aborts only the remaining processing. A
    /// delivery failure alone is logged and does not abort the cycle. The
    /// checkpoint advances only after the cycle fully succeeds, including
    /// the state-file write: on any failure the next fetch re-queries the
    /// same window.
    async fn run_cycle(&mut self) -> Result<(), PollError> {
        let now = Utc::now().timestamp();

        let response = self.practicum.get_homework_statuses(self.from_date).await?;
        let homeworks = verdict::check_response(&response)?;

        for record in homeworks {
            let message = verdict::parse_status(record)?;
            if let Err(err) = self.telegram.send_message(&message).await {
                error!("Failed to send status notification \"{}\": {}", message, err);
            }
        }

        self.checkpoint.store(now)?;
        self.from_date = now;

        Ok(())
    }
}

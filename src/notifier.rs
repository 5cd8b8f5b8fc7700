//! Error notifications for the operator, deduplicated against the last
//! text that was actually delivered.
//!
//! This is an explicit object owned by the poller rather than a filter
//! hooked into the global log sink: the poller hands it every cycle
//! failure, and it remembers the last text it managed to send. Its own
//! delivery failures are logged and swallowed, never fed back into itself,
//! so a dead bot connection cannot trigger runaway notification attempts.

use tracing::{debug, error};

use crate::telegram::TelegramClient;

#[derive(Default)]
pub struct ErrorNotifier {
    /// Text of the most recently delivered error notification. Lives for
    /// the process lifetime; reset only by restart.
    last_error: Option<String>,
}

impl ErrorNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send `text` to the chat unless it is the same error that was
    /// already reported on a previous cycle.
    pub async fn report(&mut self, telegram: &TelegramClient, text: &str) {
        if !self.should_send(text) {
            debug!("Suppressing repeated error notification: {}", text);
            return;
        }

        match telegram.send_message(text).await {
            Ok(()) => self.last_error = Some(text.to_string()),
            Err(err) => {
                // Logged locally only; reporting this through `report`
                // again would recurse on a dead connection.
                error!("Failed to deliver error notification \"{}\": {}", text, err);
            }
        }
    }

    /// Dedup predicate, separated from delivery so the state machine is
    /// testable without a live chat.
    fn should_send(&self, text: &str) -> bool {
        self.last_error.as_deref() != Some(text)
    }
}

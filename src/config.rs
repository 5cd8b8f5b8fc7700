use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_STATE_FILE: &str = ".last_success";

/// Environment variables without which the bot cannot run at all.
pub const REQUIRED_VARS: [&str; 3] = ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"];

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Homework-statuses endpoint; overridable for staging environments.
    pub endpoint: String,
    pub poll_interval: Duration,
    /// Where the last-successful-cycle timestamp is persisted.
    pub state_file: PathBuf,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// All missing required variables are collected and named together, so
    /// a single failed start reports the full list instead of one variable
    /// per restart.
    pub fn from_env() -> Result<Self> {
        let missing = missing_required(|name| env::var(name).ok());
        if !missing.is_empty() {
            bail!(
                "required environment variables are not set: {}",
                missing.join(", ")
            );
        }

        let practicum_token = env::var("PRACTICUM_TOKEN")
            .context("PRACTICUM_TOKEN environment variable is required")?;

        let telegram_token = env::var("TELEGRAM_TOKEN")
            .context("TELEGRAM_TOKEN environment variable is required")?;

        let telegram_chat_id = env::var("TELEGRAM_CHAT_ID")
            .context("TELEGRAM_CHAT_ID environment variable is required")?;

        let endpoint =
            env::var("PRACTICUM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let poll_interval = env::var("POLL_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_POLL_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("POLL_INTERVAL_SECS must be a valid number of seconds")?;

        let state_file = env::var("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE));

        Ok(Config {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
            state_file,
        })
    }
}

/// Names of required variables that `lookup` reports unset or blank.
///
/// A value that is empty or whitespace-only counts as missing.
pub fn missing_required(lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
    REQUIRED_VARS
        .iter()
        .copied()
        .filter(|name| lookup(name).map_or(true, |value| value.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| (*value).to_string())
    }

    #[test]
    fn test_missing_required_all_present() {
        let lookup = lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]);
        assert!(missing_required(lookup).is_empty());
    }

    #[test]
    fn test_missing_required_names_every_absent_variable() {
        let lookup = lookup_from(&[("TELEGRAM_TOKEN", "t-token")]);
        assert_eq!(
            missing_required(lookup),
            vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]
        );
    }

    #[test]
    fn test_missing_required_empty_value_counts_as_missing() {
        let lookup = lookup_from(&[
            ("PRACTICUM_TOKEN", ""),
            ("TELEGRAM_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]);
        assert_eq!(
            missing_required(lookup),
            vec!["PRACTICUM_TOKEN", "TELEGRAM_TOKEN"]
        );
    }

    #[test]
    fn test_missing_required_nothing_set() {
        assert_eq!(missing_required(|_| None), REQUIRED_VARS.to_vec());
    }
}

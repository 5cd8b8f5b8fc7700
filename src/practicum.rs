use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::PollError;

/// Client for the Practicum homework-statuses endpoint.
///
/// Authentication is a static OAuth token passed on every request; the
/// underlying `reqwest::Client` is shared with the Telegram client and
/// carries the process-wide request timeout.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(client: Client, endpoint: String, token: String) -> Self {
        Self {
            client,
            endpoint,
            token,
        }
    }

    /// Fetch every homework whose review status changed at or after
    /// `from_date`.
    ///
    /// Returns the parsed JSON body verbatim; shape checks happen in
    /// [`crate::verdict::check_response`]. Transport failures and non-200
    /// replies always surface as errors; the caller never sees a
    /// half-fetched response.
    pub async fn get_homework_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        debug!("Requesting homework statuses since {}", from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let headers = format!("{:?}", response.headers());
            let body = response.text().await.unwrap_or_default();
            error!(
                "Homework endpoint unreachable: status {}, headers {}, body {}",
                status, headers, body
            );
            return Err(PollError::UnreachableEndpoint { status });
        }

        let body: Value = response.json().await?;
        debug!("Homework statuses received");

        Ok(body)
    }
}

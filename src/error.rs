use reqwest::StatusCode;
use thiserror::Error;

/// Everything a poll cycle can fail with.
///
/// The poller catches these at the cycle boundary, logs them, and forwards
/// the text to the error notifier. `Delivery` is the one kind that must
/// never be fed back into the notifier: a failing bot connection would
/// otherwise notify about its own failures forever.
#[derive(Debug, Error)]
pub enum PollError {
    /// Transport-level failure talking to the homework API, with the
    /// original cause chained.
    #[error("error requesting homework statuses")]
    Request {
        #[from]
        source: reqwest::Error,
    },

    /// The homework endpoint answered with a non-200 status.
    #[error("homework endpoint unreachable, status {status}")]
    UnreachableEndpoint { status: StatusCode },

    /// The API reported an application-level error code in the body.
    #[error("{0}")]
    Api(String),

    /// The response body did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(&'static str),

    /// A homework record is missing a required field.
    #[error("malformed homework record: missing field `{field}`")]
    MalformedReply { field: &'static str },

    /// A homework record carried a status outside the known enumeration.
    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),

    /// A Telegram message could not be delivered.
    #[error("failed to deliver telegram message: {reason}")]
    Delivery { reason: String },

    /// The checkpoint file could not be read or written.
    #[error("checkpoint file {path}")]
    Checkpoint {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

//! Interpretation of homework-statuses responses: shape validation of the
//! raw JSON body and translation of each record into the notification
//! sentence.

use serde_json::Value;
use tracing::debug;

use crate::error::PollError;

/// Review status of a homework submission, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse the wire value. A status outside the known set is an error,
    /// not a silent skip.
    pub fn from_wire(value: &str) -> Result<Self, PollError> {
        match value {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(PollError::UnknownStatus(other.to_string())),
        }
    }

    /// The fixed human-readable verdict sentence for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось.",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Check the overall shape of an API response and hand back the homework
/// records.
///
/// The fetch layer returns the body verbatim; everything the cycle relies
/// on is checked here. An empty record list is not an error, just nothing
/// to report this cycle.
pub fn check_response(response: &Value) -> Result<&Vec<Value>, PollError> {
    let Some(object) = response.as_object() else {
        return Err(PollError::UnexpectedShape("response is not a JSON object"));
    };

    let Some(homeworks) = object.get("homeworks").and_then(Value::as_array) else {
        return Err(PollError::UnexpectedShape(
            "`homeworks` is missing or not an array",
        ));
    };

    if let Some(code) = object.get("code").and_then(Value::as_str) {
        match code {
            "not_authenticated" => {
                return Err(PollError::Api(
                    "authentication with the homework API failed".to_string(),
                ));
            }
            "UnknownError" => {
                return Err(PollError::Api(
                    "the homework API reported an unknown error".to_string(),
                ));
            }
            _ => {}
        }
    }

    if homeworks.is_empty() {
        debug!("Homework list is empty, nothing new to report");
    }

    Ok(homeworks)
}

/// Turn one homework record into its notification sentence.
///
/// Both `status` and `homework_name` are required; the status must be in
/// the known enumeration.
pub fn parse_status(record: &Value) -> Result<String, PollError> {
    let Some(status) = record.get("status") else {
        return Err(PollError::MalformedReply { field: "status" });
    };
    let Some(name) = record.get("homework_name") else {
        return Err(PollError::MalformedReply {
            field: "homework_name",
        });
    };

    let status = status
        .as_str()
        .ok_or_else(|| PollError::UnknownStatus(status.to_string()))?;
    let status = HomeworkStatus::from_wire(status)?;

    let Some(name) = name.as_str() else {
        return Err(PollError::MalformedReply {
            field: "homework_name",
        });
    };

    Ok(format!(
        "Changed review status of work \"{}\". {}",
        name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_status_covers_every_known_status() {
        // Every status in the enumeration must produce its exact sentence
        // with the homework name substituted.
        let cases = [
            (
                "approved",
                "Changed review status of work \"hw1\". Работа проверена: ревьюеру всё понравилось.",
            ),
            (
                "reviewing",
                "Changed review status of work \"hw1\". Работа взята на проверку ревьюером.",
            ),
            (
                "rejected",
                "Changed review status of work \"hw1\". Работа проверена: у ревьюера есть замечания.",
            ),
        ];

        for (status, expected) in cases {
            let record = json!({"homework_name": "hw1", "status": status});
            assert_eq!(parse_status(&record).unwrap(), expected);
        }
    }

    #[test]
    fn test_parse_status_missing_status() {
        let record = json!({"homework_name": "hw1"});
        let err = parse_status(&record).unwrap_err();
        assert!(matches!(err, PollError::MalformedReply { field: "status" }));
    }

    #[test]
    fn test_parse_status_missing_homework_name() {
        let record = json!({"status": "approved"});
        let err = parse_status(&record).unwrap_err();
        assert!(matches!(
            err,
            PollError::MalformedReply {
                field: "homework_name"
            }
        ));
    }

    #[test]
    fn test_parse_status_unknown_status() {
        let record = json!({"homework_name": "hw1", "status": "lost"});
        let err = parse_status(&record).unwrap_err();
        match err {
            PollError::UnknownStatus(status) => assert_eq!(status, "lost"),
            other => panic!("expected UnknownStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_status_non_string_status() {
        let record = json!({"homework_name": "hw1", "status": 5});
        assert!(matches!(
            parse_status(&record).unwrap_err(),
            PollError::UnknownStatus(_)
        ));
    }

    #[test]
    fn test_check_response_top_level_not_an_object() {
        for response in [json!([]), json!("homeworks"), json!(42)] {
            assert!(matches!(
                check_response(&response).unwrap_err(),
                PollError::UnexpectedShape(_)
            ));
        }
    }

    #[test]
    fn test_check_response_homeworks_not_a_sequence() {
        // A string or a number where the array should be means no records
        // get processed at all.
        for homeworks in [json!("approved"), json!(7)] {
            let response = json!({"homeworks": homeworks});
            assert!(matches!(
                check_response(&response).unwrap_err(),
                PollError::UnexpectedShape(_)
            ));
        }
    }

    #[test]
    fn test_check_response_homeworks_missing() {
        let response = json!({"current_date": 1700000000});
        assert!(matches!(
            check_response(&response).unwrap_err(),
            PollError::UnexpectedShape(_)
        ));
    }

    #[test]
    fn test_check_response_not_authenticated_code() {
        let response = json!({"homeworks": [], "code": "not_authenticated"});
        let err = check_response(&response).unwrap_err();
        match err {
            PollError::Api(message) => assert!(message.contains("authentication")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_response_unknown_error_code() {
        let response = json!({"homeworks": [], "code": "UnknownError"});
        assert!(matches!(
            check_response(&response).unwrap_err(),
            PollError::Api(_)
        ));
    }

    #[test]
    fn test_check_response_unrelated_code_is_ignored() {
        let response = json!({"homeworks": [], "code": "whatever"});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_check_response_empty_list_is_fine() {
        let response = json!({"homeworks": []});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_response_with_one_approved_homework_yields_one_message() {
        // The full interpretation path for the common case: one record in,
        // exactly one notification text out.
        let response = json!({
            "homeworks": [{"homework_name": "hw1", "status": "approved"}],
            "current_date": 1700000000,
        });

        let messages: Vec<String> = check_response(&response)
            .unwrap()
            .iter()
            .map(|record| parse_status(record).unwrap())
            .collect();

        assert_eq!(
            messages,
            vec![
                "Changed review status of work \"hw1\". Работа проверена: ревьюеру всё понравилось."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_records_are_interpreted_in_response_order() {
        let response = json!({
            "homeworks": [
                {"homework_name": "first", "status": "reviewing"},
                {"homework_name": "second", "status": "rejected"},
            ],
        });

        let messages: Vec<String> = check_response(&response)
            .unwrap()
            .iter()
            .map(|record| parse_status(record).unwrap())
            .collect();

        assert!(messages[0].contains("\"first\""));
        assert!(messages[1].contains("\"second\""));
    }
}

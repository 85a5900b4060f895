//! Status code -> human readable verdict.

use serde_json::Value;

use crate::{domain::HomeworkRecord, Error, Result};

/// Fixed verdict phrases, keyed by the API status code.
pub const VERDICTS: [(&str, &str); 3] = [
    (
        "approved",
        "The work has been reviewed: the reviewer liked everything. Hooray!",
    ),
    ("reviewing", "The work has been taken for review by the reviewer."),
    (
        "rejected",
        "The work has been reviewed: the reviewer has comments.",
    ),
];

pub fn verdict_for(status: &str) -> Option<&'static str> {
    VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, text)| *text)
}

/// Render the notification text for a single record.
pub fn format(record: &HomeworkRecord) -> Result<String> {
    let Some(name) = record.name() else {
        return Err(Error::Format("homework record has no name".to_string()));
    };

    let verdict = match record.status() {
        Some(Value::String(s)) => {
            verdict_for(s).ok_or_else(|| Error::UnknownStatus(format!("\"{s}\"")))?
        }
        Some(other) => return Err(Error::UnknownStatus(other.to_string())),
        None => return Err(Error::UnknownStatus("<missing>".to_string())),
    };

    Ok(format!("Status changed for \"{name}\". {verdict}"))
}

//! Structural checks on the raw status API payload.

use serde_json::Value;

use crate::{
    domain::{HomeworkRecord, StatusBatch},
    Error, Result,
};

/// Check the payload shape and pull out the records plus the next cursor.
///
/// Records are returned in the API's own order and are not inspected here.
pub fn validate(raw: &Value) -> Result<StatusBatch> {
    let Some(obj) = raw.as_object() else {
        return Err(Error::Shape(format!(
            "expected a JSON object, got {}",
            json_type(raw)
        )));
    };

    let Some(homeworks) = obj.get("homeworks") else {
        return Err(Error::Format("missing key \"homeworks\"".to_string()));
    };
    let Some(items) = homeworks.as_array() else {
        return Err(Error::Shape(format!(
            "\"homeworks\" must be an array, got {}",
            json_type(homeworks)
        )));
    };

    let Some(current_date) = obj.get("current_date") else {
        return Err(Error::Format("missing key \"current_date\"".to_string()));
    };
    let Some(next_cursor) = current_date.as_i64() else {
        return Err(Error::Shape(format!(
            "\"current_date\" must be an integer, got {}",
            json_type(current_date)
        )));
    };

    Ok(StatusBatch {
        records: items.iter().cloned().map(HomeworkRecord).collect(),
        next_cursor,
    })
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn empty_object_is_missing_homeworks() {
        let err = validate(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("homeworks"));
    }

    #[test]
    fn non_object_payload_is_shape_error() {
        let err = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn homeworks_must_be_an_array() {
        let err = validate(&json!({"homeworks": {"a": 1}, "current_date": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert!(err.to_string().contains("homeworks"));
    }

    #[test]
    fn current_date_is_required_and_integer() {
        let err = validate(&json!({"homeworks": []})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("current_date"));

        let err = validate(&json!({"homeworks": [], "current_date": "soon"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);

        let err = validate(&json!({"homeworks": [], "current_date": 1.5})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn keeps_record_order_and_cursor() {
        let raw = json!({
            "homeworks": [
                {"homework_name": "b", "status": "approved"},
                {"homework_name": "a", "status": "rejected"},
                "not even an object"
            ],
            "current_date": 1_700_000_000
        });
        let batch = validate(&raw).unwrap();
        assert_eq!(batch.next_cursor, 1_700_000_000);
        assert_eq!(batch.records.len(), 3);
        assert_eq!(batch.records[0].name(), Some("b"));
        assert_eq!(batch.records[1].name(), Some("a"));
        assert_eq!(batch.records[2].name(), None);
    }
}

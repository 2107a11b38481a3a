//! Method names and the single call path every operation goes through.

use jsonrpc::{Client, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::UntisError;

/// Discovery directory lookup.
pub(crate) const SEARCH_SCHOOL: &str = "searchSchool";
/// Session login.
pub(crate) const AUTHENTICATE: &str = "authenticate";
/// Session logout.
pub(crate) const LOGOUT: &str = "logout";
pub(crate) const GET_TEACHERS: &str = "getTeachers";
pub(crate) const GET_SUBJECTS: &str = "getSubjects";

/// Sends `request` and returns the untyped result, tagging failures with the
/// request's method name.
pub(crate) async fn call(
    client: &Client,
    operation: &'static str,
    request: &Request,
) -> Result<Value, UntisError> {
    let response = client
        .send(request)
        .await
        .map_err(|source| UntisError::Transport { operation, source })?;

    response.content().map_err(|error| {
        warn!(operation, code = error.code, message = %error.message, "Server returned an error");
        UntisError::Protocol { operation, error }
    })
}

/// Decodes `value` into `T`, reporting any mismatch as a response-shape error.
pub(crate) fn decode<T: DeserializeOwned>(operation: &'static str, value: Value) -> Result<T, UntisError> {
    serde_json::from_value(value).map_err(|e| UntisError::shape(operation, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Pair {
        #[allow(dead_code)]
        left: i64,
    }

    #[test]
    fn decode_reports_missing_field_as_shape_error() {
        let err = decode::<Pair>("getPair", json!({ "right": 1 })).unwrap_err();
        match err {
            UntisError::ResponseShape { operation, message } => {
                assert_eq!(operation, "getPair");
                assert!(message.contains("left"), "{message}");
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn decode_reports_wrong_type_as_shape_error() {
        let err = decode::<Pair>("getPair", json!({ "left": "one" })).unwrap_err();
        assert!(matches!(err, UntisError::ResponseShape { .. }));
    }
}

//! JSON operations using sonic-rs.

use crate::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Deserialize a response body fetched from `source`.
///
/// Syntax errors and shape mismatches (missing or mistyped fields) both
/// surface as [`Error::DecodeFailed`] naming the source.
///
/// # Errors
/// Returns error if the body is not valid JSON for `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], source: &str) -> Result<T> {
    sonic_rs::from_slice(bytes).map_err(|e| Error::decode(source, e.to_string()))
}

/// Deserialize JSON string.
///
/// # Errors
/// Returns error if JSON is invalid.
pub fn from_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    sonic_rs::from_str(s).map_err(Error::from)
}

/// Serialize to pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    sonic_rs::to_string_pretty(value).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Member {
        name: String,
        roles: Vec<String>,
    }

    #[test]
    fn decode_valid_body() {
        let member: Member = decode(br#"{"name":"g1","roles":["viewer"]}"#, "test").unwrap();
        assert_eq!(member.name, "g1");
        assert_eq!(member.roles, vec!["viewer"]);
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode::<Member>(b"<html>maintenance</html>", "https://rt.example/x")
            .unwrap_err();
        match err {
            Error::DecodeFailed { url, .. } => assert_eq!(url, "https://rt.example/x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn decode_rejects_missing_field() {
        let err = decode::<Member>(br#"{"name":"g1"}"#, "test").unwrap_err();
        assert!(matches!(err, Error::DecodeFailed { .. }));
    }

    #[test]
    fn pretty_output_is_multiline() {
        let value: sonic_rs::Value = from_json(r#"{"a":1,"b":[1,2]}"#).unwrap();
        assert!(to_json_pretty(&value).unwrap().contains('\n'));
    }
}

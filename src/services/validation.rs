//! Request body validation for channel create and update.
//!
//! Bodies arrive as raw JSON so that "missing", "null" and "wrong type" can be
//! told apart. Fields are checked in declaration order and the first failure
//! is reported; unknown keys are ignored.

use serde_json::{Map, Value};

use crate::config::defaults::DEFAULT_CATEGORY;
use crate::errors::{AppError, AppResult};
use crate::models::{ChannelPatch, NewChannel};

const MSG_REQUIRED: &str = "Required";
const MSG_EMPTY_STRING: &str = "String must contain at least 1 character(s)";
const MSG_LINE_BREAK: &str = "String must not contain line breaks";

/// What a single field looked like in the body
enum Field<T> {
    Missing,
    Null,
    Present(T),
}

/// Validate a full channel body, applying defaults for omitted optional fields
pub fn validate_new_channel(body: &Value) -> AppResult<NewChannel> {
    let object = as_object(body)?;

    let name = required_string(object, "name")?;
    let url = required_string(object, "url")?;
    let logo = nullable_string(object, "logo")?;
    let category = nullable_string(object, "category")?;
    let user_agent = nullable_string(object, "userAgent")?;
    let is_favorite = boolean(object, "isFavorite")?;

    Ok(NewChannel {
        name,
        url,
        logo: logo.unwrap_or(None),
        category: category.unwrap_or_else(|| Some(DEFAULT_CATEGORY.to_string())),
        user_agent: user_agent.unwrap_or(None),
        is_favorite: is_favorite.unwrap_or(false),
    })
}

/// Validate a partial channel body; every field is optional but present
/// fields obey the same rules as on create
pub fn validate_channel_patch(body: &Value) -> AppResult<ChannelPatch> {
    let object = as_object(body)?;

    let name = match string_field(object, "name")? {
        Field::Missing => None,
        Field::Null => return Err(type_error("name", "string", &Value::Null)),
        Field::Present(value) => Some(value),
    };
    let url = match string_field(object, "url")? {
        Field::Missing => None,
        Field::Null => return Err(type_error("url", "string", &Value::Null)),
        Field::Present(value) => Some(value),
    };

    Ok(ChannelPatch {
        name,
        url,
        logo: nullable_string(object, "logo")?,
        category: nullable_string(object, "category")?,
        user_agent: nullable_string(object, "userAgent")?,
        is_favorite: boolean(object, "isFavorite")?,
    })
}

fn as_object(body: &Value) -> AppResult<&Map<String, Value>> {
    body.as_object().ok_or_else(|| {
        AppError::invalid_body(format!(
            "Expected object, received {}",
            json_type_name(body)
        ))
    })
}

fn string_field(object: &Map<String, Value>, field: &str) -> AppResult<Field<String>> {
    match object.get(field) {
        None => Ok(Field::Missing),
        Some(Value::Null) => Ok(Field::Null),
        Some(Value::String(s)) if s.is_empty() => Err(AppError::validation(field, MSG_EMPTY_STRING)),
        Some(Value::String(s)) => Ok(Field::Present(single_line(field, s)?)),
        Some(other) => Err(type_error(field, "string", other)),
    }
}

fn required_string(object: &Map<String, Value>, field: &str) -> AppResult<String> {
    match string_field(object, field)? {
        Field::Missing => Err(AppError::validation(field, MSG_REQUIRED)),
        Field::Null => Err(type_error(field, "string", &Value::Null)),
        Field::Present(value) => Ok(value),
    }
}

/// `None` when omitted, `Some(None)` for an explicit null.
///
/// Empty strings are accepted here; the M3U export treats them as absent.
fn nullable_string(object: &Map<String, Value>, field: &str) -> AppResult<Option<Option<String>>> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(single_line(field, s)?))),
        Some(other) => Err(type_error(field, "string", other)),
    }
}

/// Every string field ends up on one playlist line or in one header value
fn single_line(field: &str, value: &str) -> AppResult<String> {
    if value.contains(['\r', '\n']) {
        return Err(AppError::validation(field, MSG_LINE_BREAK));
    }
    Ok(value.to_string())
}

fn boolean(object: &Map<String, Value>, field: &str) -> AppResult<Option<bool>> {
    match object.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(type_error(field, "boolean", other)),
    }
}

fn type_error(field: &str, expected: &str, received: &Value) -> AppError {
    AppError::validation(
        field,
        format!("Expected {}, received {}", expected, json_type_name(received)),
    )
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn field_and_message(err: AppError) -> (Option<String>, String) {
        match err {
            AppError::Validation { field, message } => (field, message),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_body_gets_defaults() {
        let channel = validate_new_channel(&json!({"name": "RTSH 1", "url": "http://x/y.m3u8"})).unwrap();
        assert_eq!(channel, NewChannel::new("RTSH 1", "http://x/y.m3u8"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let channel = validate_new_channel(&json!({
            "id": 77,
            "name": "TV Klan",
            "url": "http://x",
            "extra": [1, 2, 3]
        }))
        .unwrap();
        assert_eq!(channel.name, "TV Klan");
    }

    #[test]
    fn test_explicit_values_kept() {
        let channel = validate_new_channel(&json!({
            "name": "News 24",
            "url": "http://x/news",
            "logo": "http://x/logo.png",
            "category": null,
            "userAgent": "VLC/3.0",
            "isFavorite": true
        }))
        .unwrap();
        assert_eq!(channel.logo.as_deref(), Some("http://x/logo.png"));
        assert_eq!(channel.category, None);
        assert_eq!(channel.user_agent.as_deref(), Some("VLC/3.0"));
        assert!(channel.is_favorite);
    }

    #[rstest]
    #[case(json!({"name": "", "url": "http://x"}), "name", MSG_EMPTY_STRING)]
    #[case(json!({"url": "http://x"}), "name", MSG_REQUIRED)]
    #[case(json!({"name": "A"}), "url", MSG_REQUIRED)]
    #[case(json!({"name": 5, "url": "http://x"}), "name", "Expected string, received number")]
    #[case(json!({"name": null, "url": "http://x"}), "name", "Expected string, received null")]
    #[case(json!({"name": "A", "url": ""}), "url", MSG_EMPTY_STRING)]
    #[case(json!({"name": "A", "url": "http://x", "logo": 1}), "logo", "Expected string, received number")]
    #[case(json!({"name": "A", "url": "http://x", "isFavorite": "yes"}), "isFavorite", "Expected boolean, received string")]
    #[case(json!({"name": "A", "url": "http://x", "isFavorite": null}), "isFavorite", "Expected boolean, received null")]
    #[case(json!({"name": "", "url": ""}), "name", MSG_EMPTY_STRING)]
    #[case(json!({"name": "A\n#EXTINF:-1,Injected", "url": "http://x/a"}), "name", MSG_LINE_BREAK)]
    #[case(json!({"name": "A", "url": "http://x/a\r\nhttp://evil/b"}), "url", MSG_LINE_BREAK)]
    #[case(json!({"name": "A", "url": "http://x", "logo": "http://x/l.png\n"}), "logo", MSG_LINE_BREAK)]
    #[case(json!({"name": "A", "url": "http://x", "category": "News\rSport"}), "category", MSG_LINE_BREAK)]
    fn test_create_rejections(#[case] body: Value, #[case] field: &str, #[case] message: &str) {
        let (got_field, got_message) = field_and_message(validate_new_channel(&body).unwrap_err());
        assert_eq!(got_field.as_deref(), Some(field));
        assert_eq!(got_message, message);
    }

    #[test]
    fn test_non_object_body_rejected_without_field() {
        let (field, message) = field_and_message(validate_new_channel(&json!([1])).unwrap_err());
        assert_eq!(field, None);
        assert_eq!(message, "Expected object, received array");
    }

    #[test]
    fn test_empty_patch() {
        assert!(validate_channel_patch(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing() {
        let patch = validate_channel_patch(&json!({"logo": null, "isFavorite": true})).unwrap();
        assert_eq!(patch.logo, Some(None));
        assert_eq!(patch.category, None);
        assert_eq!(patch.is_favorite, Some(true));
    }

    #[rstest]
    #[case(json!({"name": ""}), "name", MSG_EMPTY_STRING)]
    #[case(json!({"url": null}), "url", "Expected string, received null")]
    #[case(json!({"category": false}), "category", "Expected string, received boolean")]
    #[case(json!({"userAgent": {}}), "userAgent", "Expected string, received object")]
    #[case(json!({"name": "Top\nChannel"}), "name", MSG_LINE_BREAK)]
    #[case(json!({"category": "\n"}), "category", MSG_LINE_BREAK)]
    fn test_patch_rejections(#[case] body: Value, #[case] field: &str, #[case] message: &str) {
        let (got_field, got_message) = field_and_message(validate_channel_patch(&body).unwrap_err());
        assert_eq!(got_field.as_deref(), Some(field));
        assert_eq!(got_message, message);
    }
}

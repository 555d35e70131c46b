//! Chat request validation and message anonymization

use crate::adapters::Anonymizer;
use crate::domain::{AnonymizationError, ScrubError};
use serde_json::{Map, Value};

/// Parse and validate a raw chat request body
///
/// The body must be a non-empty JSON object. If it carries `messages`, that
/// field must be an array of objects; any other shape is refused rather
/// than forwarded unexamined.
pub fn parse_chat_request(raw_body: &[u8]) -> crate::domain::Result<Map<String, Value>> {
    let invalid = ScrubError::InvalidRequest;

    let value: Value = serde_json::from_slice(raw_body)
        .map_err(|e| invalid(format!("Body is not valid JSON: {e}")))?;

    let Value::Object(body) = value else {
        return Err(invalid("Body must be a JSON object".to_string()));
    };
    if body.is_empty() {
        return Err(invalid("Body must not be empty".to_string()));
    }

    match body.get("messages") {
        None => {}
        Some(Value::Array(messages)) => {
            if let Some(index) = messages.iter().position(|m| !m.is_object()) {
                return Err(invalid(format!("messages[{index}] must be an object")));
            }
        }
        Some(_) => return Err(invalid("'messages' must be an array".to_string())),
    }

    Ok(body)
}

/// Replace every non-empty string `content` with its anonymized form
///
/// Messages are processed in order, one call at a time. The first failure
/// is returned immediately and later messages are not sent. Returns the
/// number of messages that were anonymized.
pub async fn anonymize_messages(
    body: &mut Map<String, Value>,
    anonymizer: &dyn Anonymizer,
) -> Result<usize, AnonymizationError> {
    let Some(Value::Array(messages)) = body.get_mut("messages") else {
        return Ok(0);
    };

    let mut anonymized = 0;
    for message in messages.iter_mut() {
        let Some(content) = message.get_mut("content") else {
            continue;
        };
        let Value::String(text) = &mut *content else {
            // Multi-modal or null content passes through untouched
            continue;
        };
        if text.is_empty() {
            continue;
        }

        let redacted = anonymizer.anonymize(text).await?;
        *content = Value::String(redacted);
        anonymized += 1;
    }

    Ok(anonymized)
}

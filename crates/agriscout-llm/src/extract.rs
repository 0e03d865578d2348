use serde_json::Value;

/// Fields probed for reply text, in order
const REPLY_FIELDS: [&str; 5] = ["text", "output", "result", "response", "message"];

/// Pull the reply text out of an assistant response body.
///
/// A bare string is returned as-is. Objects are probed for a non-empty
/// string in `text`, `output`, `result`, `response`, `message`, then in
/// `body` and `data`. Anything else is returned as compact JSON.
pub fn extract_reply(body: &Value) -> String {
    if let Value::String(text) = body {
        return text.clone();
    }

    let probe = |field: &str| match body.get(field) {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    };

    REPLY_FIELDS
        .iter()
        .chain(["body", "data"].iter())
        .find_map(|field| probe(*field))
        .unwrap_or_else(|| body.to_string())
}

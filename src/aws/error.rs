//! AWS error body parsing
//!
//! JSON protocols report failures as
//!
//! ```json
//! {
//!   "__type": "com.amazonaws.transcribe#BadRequestException",
//!   "message": "The requested job couldn't be found."
//! }
//! ```
//!
//! with `code`/`Code` and `Message` as alternative spellings.

use crate::error::Error;
use serde_json::Value;

/// Turn a non-success HTTP response into an [`Error::Service`]
pub fn parse_error_body(service: &str, status: u16, body: &str) -> Error {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            format!("HTTP {status} from {service}")
        } else {
            trimmed.to_string()
        };
        return Error::service(service, fallback_code(status), message, status);
    };

    let code = ["__type", "code", "Code"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map_or_else(|| fallback_code(status).to_string(), normalize_code);

    let message = ["message", "Message", "errorMessage"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .unwrap_or("Unknown error")
        .to_string();

    Error::service(service, code, message, status)
}

/// Strip the shape namespace (`ns#Code`) and any URI suffix (`Code:http://...`)
fn normalize_code(raw: &str) -> String {
    let code = raw.rsplit('#').next().unwrap_or(raw);
    code.split(':').next().unwrap_or(code).to_string()
}

fn fallback_code(status: u16) -> &'static str {
    match status {
        400 => "BadRequest",
        403 => "AccessDenied",
        404 => "NotFound",
        500..=599 => "InternalFailure",
        _ => "UnknownError",
    }
}

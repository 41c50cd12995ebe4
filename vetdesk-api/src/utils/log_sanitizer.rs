//! Log sanitization utilities
//!
//! Request and response bodies are logged at debug level. Login payloads carry
//! passwords and list payloads can be large, so everything goes through here
//! first.

use serde_json::Value;

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 512;

/// Keys whose values are never written to logs.
const SECRET_KEYS: &[&str] = &["password", "token", "accessToken", "refreshToken"];

/// Placeholder written instead of a secret value.
const REDACTED: &str = "***";

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the
/// longest prefix that ends on a char boundary plus a suffix with the total
/// length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Replace secret values (at any depth) with a placeholder.
pub fn redact_secrets(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    if SECRET_KEYS.contains(&k.as_str()) {
                        (k.clone(), Value::String(REDACTED.to_string()))
                    } else {
                        (k.clone(), redact_secrets(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_secrets).collect()),
        other => other.clone(),
    }
}

/// Render a request body for the debug log: secrets redacted, then truncated.
pub fn body_for_log(value: &Value) -> String {
    truncate_for_log(&redact_secrets(value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn short_string_unchanged() {
        assert_eq!(truncate_for_log("{\"total\":0}"), "{\"total\":0}");
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
        assert!(result.ends_with(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        // 'ç' is 2 bytes; the cut must land on a boundary
        let s = "ç".repeat(TRUNCATE_LIMIT);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn password_is_redacted() {
        let body = json!({"email": "vet@clinic.com", "password": "hunter2"});
        let logged = body_for_log(&body);
        assert!(logged.contains("vet@clinic.com"));
        assert!(!logged.contains("hunter2"));
        assert!(logged.contains(REDACTED));
    }

    #[test]
    fn nested_tokens_are_redacted() {
        let body = json!({"data": [{"token": "abc"}]});
        assert_eq!(redact_secrets(&body), json!({"data": [{"token": "***"}]}));
    }
}

use crate::server::response::ApiError;

const MAX_NAME_LEN: usize = 100;
const MAX_KEY_LEN: usize = 200;
const MAX_CODE_LEN: usize = 64;
const MAX_TEXT_LEN: usize = 10_000;

/// Trims `value` and rejects it when empty or longer than `max_len` characters.
fn required(value: &str, field: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("{field} cannot exceed {max_len} characters"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_domain_name(name: &str) -> Result<String, String> {
    required(name, "Domain name", MAX_NAME_LEN)
}

pub fn validate_language_name(name: &str) -> Result<String, String> {
    required(name, "Language name", MAX_NAME_LEN)
}

/// Language codes are matched verbatim by lookups, e.g. `fr`, `pt-BR` or `sr@latin`.
pub fn validate_language_code(code: &str) -> Result<String, String> {
    required(code, "Language code", MAX_CODE_LEN)
}

pub fn validate_source_key(key: &str) -> Result<String, String> {
    required(key, "Source key", MAX_KEY_LEN)
}

pub fn validate_text(text: &str, field: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(format!("{field} cannot exceed {MAX_TEXT_LEN} characters"));
    }
    Ok(text.to_string())
}

pub fn validate_id(id: &str, field: &str) -> Result<String, ApiError> {
    required(id, field, MAX_KEY_LEN).map_err(ApiError::bad_request)
}

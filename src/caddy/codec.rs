//! JSON encoding of route identifiers.
//!
//! # Responsibilities
//! - Render the reserved `"@id"` field with proper string escaping
//! - Render arbitrary values as quoted JSON string literals
//!
//! # Design Decisions
//! - Escaping is delegated to serde_json, never hand-rolled
//! - Pure functions, no allocation beyond the returned string

/// Reserved key Caddy uses to address objects through `/id/...`.
pub const ID_FIELD: &str = "@id";

/// Returns `"@id":"<id>"` with `id` escaped for JSON.
///
/// Encoding a `&str` cannot fail; an empty string is returned if it ever does.
pub fn encode_id_field(id: &str) -> String {
    match serde_json::to_string(id) {
        Ok(literal) => format!("\"{}\":{}", ID_FIELD, literal),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode route identifier");
            String::new()
        }
    }
}

/// Returns `value` escaped for JSON and surrounded with quotes.
pub fn encode_json_string(value: &str) -> String {
    let field = encode_id_field(value);
    let prefix = format!("\"{}\":", ID_FIELD);
    match field.strip_prefix(&prefix) {
        Some(literal) => literal.to_string(),
        None => field,
    }
}

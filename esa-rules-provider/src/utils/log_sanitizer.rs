//! Keeps response bodies and key material out of logs in full.

/// Characters of a body kept in a log line.
const TRUNCATE_LIMIT: usize = 256;
/// Leading characters of an access key id left readable.
const VISIBLE_KEY_PREFIX: usize = 4;

/// Cut `s` to [`TRUNCATE_LIMIT`] characters, noting the original byte length.
pub fn truncate_for_log(s: &str) -> String {
    match s.char_indices().nth(TRUNCATE_LIMIT) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
    }
}

/// `LTAI5tAbc...` → `LTAI****`. Short keys are fully masked.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= VISIBLE_KEY_PREFIX * 2 {
        return "****".to_string();
    }
    let prefix: String = key.chars().take(VISIBLE_KEY_PREFIX).collect();
    format!("{prefix}****")
}

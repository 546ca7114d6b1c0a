//! Transcript normalization
//!
//! The platform delivers transcripts in several shapes: a plain string, an
//! array of role/content objects (verbose mode), or occasionally something
//! else entirely. Normalization converts all of them into one line-oriented
//! text form and never fails; unexpected shapes degrade to an empty string.

use serde_json::Value;
use std::collections::HashSet;

/// Convert a transcript value of unknown shape into canonical text.
///
/// Strings pass through unchanged. Arrays render as `"role: content"` lines
/// with system-role and empty-content entries dropped and exact duplicate
/// lines suppressed in first-occurrence order. Anything else is serialized
/// best-effort, falling back to an empty string.
pub fn normalize(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(entries) => render_entries(entries),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn render_entries(entries: &[Value]) -> String {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for entry in entries {
        let role = field_str(entry, &["role", "sender"]).unwrap_or("unknown");

        // System entries are the main source of bloat; drop them outright.
        if role.eq_ignore_ascii_case("system") {
            continue;
        }

        // Entries without usable text are platform events or metadata.
        let content = match field_str(entry, &["content", "text", "message"]) {
            Some(content) => content,
            None => continue,
        };

        let line = format!("{}: {}", role, content);
        if seen.insert(line.clone()) {
            lines.push(line);
        }
    }

    lines.join("\n")
}

/// First non-empty string value among the given keys
fn field_str<'a>(entry: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        entry
            .get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    })
}

/// Merge the payload transcript with the one fetched from the platform.
///
/// Length is used as a proxy for completeness: a verbose capture supersedes a
/// partial one. The heuristic is imperfect (a duplicate-laden transcript can
/// look longer), so it can be disabled, in which case a non-empty current
/// transcript always wins.
pub fn prefer_longer(current: String, candidate: String, prefer_longer: bool) -> String {
    if candidate.is_empty() {
        return current;
    }
    if current.is_empty() {
        return candidate;
    }
    if prefer_longer && candidate.len() > current.len() {
        candidate
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_passes_through() {
        assert_eq!(normalize(&json!("user: hello")), "user: hello");
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(normalize(&Value::Null), "");
    }

    #[test]
    fn test_array_renders_role_content_lines() {
        let raw = json!([
            {"role": "user", "content": "hello"},
            {"role": "assistant", "content": "hi there"},
            {"role": "user", "content": "bye"},
        ]);
        assert_eq!(normalize(&raw), "user: hello\nassistant: hi there\nuser: bye");
    }

    #[test]
    fn test_system_entries_dropped_case_insensitively() {
        let raw = json!([
            {"role": "System", "content": "You are a helpful agent"},
            {"role": "SYSTEM", "content": "tool output"},
            {"role": "user", "content": "hello"},
        ]);
        assert_eq!(normalize(&raw), "user: hello");
    }

    #[test]
    fn test_duplicates_suppressed_keeping_first_occurrence() {
        let raw = json!([
            {"role": "user", "content": "hello"},
            {"role": "assistant", "content": "hi"},
            {"role": "user", "content": "hello"},
        ]);
        assert_eq!(normalize(&raw), "user: hello\nassistant: hi");
    }

    #[test]
    fn test_sender_and_text_fallbacks() {
        let raw = json!([
            {"sender": "agent", "text": "welcome"},
            {"role": "user", "message": "thanks"},
        ]);
        assert_eq!(normalize(&raw), "agent: welcome\nuser: thanks");
    }

    #[test]
    fn test_missing_role_defaults_to_unknown() {
        let raw = json!([{"content": "who said this"}]);
        assert_eq!(normalize(&raw), "unknown: who said this");
    }

    #[test]
    fn test_empty_or_non_string_content_dropped() {
        let raw = json!([
            {"role": "user", "content": ""},
            {"role": "user", "content": {"nested": true}},
            {"role": "user", "content": 42},
            {"role": "user"},
            {"role": "assistant", "content": "kept"},
        ]);
        assert_eq!(normalize(&raw), "assistant: kept");
    }

    #[test]
    fn test_empty_content_falls_through_to_text() {
        let raw = json!([{"role": "user", "content": "", "text": "from text"}]);
        assert_eq!(normalize(&raw), "user: from text");
    }

    #[test]
    fn test_unexpected_shape_serializes() {
        assert_eq!(normalize(&json!({"weird": 1})), r#"{"weird":1}"#);
    }

    #[test]
    fn test_prefer_longer_heuristic() {
        let merged = prefer_longer("short".to_string(), "much longer text".to_string(), true);
        assert_eq!(merged, "much longer text");

        let merged = prefer_longer("long enough already".to_string(), "tiny".to_string(), true);
        assert_eq!(merged, "long enough already");
    }

    #[test]
    fn test_prefer_longer_disabled_keeps_current_unless_empty() {
        let merged = prefer_longer("payload".to_string(), "a longer candidate".to_string(), false);
        assert_eq!(merged, "payload");

        let merged = prefer_longer(String::new(), "candidate".to_string(), false);
        assert_eq!(merged, "candidate");
    }
}

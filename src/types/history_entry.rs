use serde::{Deserialize, Deserializer, Serialize};

/// A message as stored by the server for a session.
///
/// The server keeps whatever its model returned, so the role is free-form and
/// extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Role recorded by the server (`user`, `assistant`, ...).
    pub role: String,

    /// Message text.  Missing or null content (tool-call turns) reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_model_fields() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"role": "assistant", "content": "hi", "thinking": null, "images": null, "tool_calls": null}"#,
        )
        .unwrap();
        assert_eq!(entry.role, "assistant");
        assert_eq!(entry.content, "hi");
    }

    #[test]
    fn null_content_reads_as_empty() {
        let entry: HistoryEntry =
            serde_json::from_str(r#"{"role": "assistant", "content": null, "tool_calls": []}"#)
                .unwrap();
        assert_eq!(entry.role, "assistant");
        assert_eq!(entry.content, "");
    }

    #[test]
    fn missing_content_reads_as_empty() {
        let entry: HistoryEntry = serde_json::from_str(r#"{"role": "tool"}"#).unwrap();
        assert_eq!(entry.content, "");
    }

    #[test]
    fn history_with_null_entry_parses() {
        let history: Vec<HistoryEntry> = serde_json::from_str(
            r#"[{"role": "user", "content": "hello"}, {"role": "assistant", "content": null}]"#,
        )
        .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "");
    }
}

//! Atlassian Document Format flattening
//!
//! Jira Cloud's v3 API returns rich-text fields (issue descriptions, worklog
//! comments) as an ADF node tree. Remarks and cache documents only need the
//! plain text, so block nodes become lines and inline nodes are concatenated.

use serde_json::Value;

const BLOCK_NODES: [&str; 8] = [
    "paragraph",
    "heading",
    "listItem",
    "codeBlock",
    "blockquote",
    "tableRow",
    "panel",
    "rule",
];

/// Flatten an ADF document (or a plain string) into trimmed plain text.
///
/// Returns `None` when the field is null or contains no text.
///
/// ```
/// use daysheet_domain::flatten_adf;
/// use serde_json::json;
///
/// let doc = json!({
///     "type": "doc",
///     "content": [
///         {"type": "paragraph", "content": [{"type": "text", "text": "Fix the login"}]},
///         {"type": "paragraph", "content": [{"type": "text", "text": "redirect"}]}
///     ]
/// });
/// assert_eq!(flatten_adf(&doc).as_deref(), Some("Fix the login\nredirect"));
/// ```
pub fn flatten_adf(value: &Value) -> Option<String> {
    let mut out = String::new();
    match value {
        Value::Null => return None,
        Value::String(s) => out.push_str(s),
        other => collect(other, &mut out),
    }

    let lines: Vec<&str> =
        out.lines().map(str::trim_end).filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn collect(node: &Value, out: &mut String) {
    if let Value::Array(nodes) = node {
        for child in nodes {
            collect(child, out);
        }
        return;
    }

    let node_type = node.get("type").and_then(Value::as_str).unwrap_or_default();
    match node_type {
        "text" => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        "hardBreak" => out.push('\n'),
        "mention" | "emoji" | "status" => {
            let attrs = node.get("attrs");
            let label = attrs
                .and_then(|a| a.get("text").or_else(|| a.get("shortName")))
                .and_then(Value::as_str);
            if let Some(label) = label {
                out.push_str(label);
            }
        }
        "inlineCard" => {
            if let Some(url) = node.pointer("/attrs/url").and_then(Value::as_str) {
                out.push_str(url);
            }
        }
        _ => {
            if let Some(children) = node.get("content") {
                collect(children, out);
            }
            if BLOCK_NODES.contains(&node_type) {
                out.push('\n');
            }
        }
    }
}

//! Message templates and resume tokens
//!
//! `{token}` placeholders are substituted from the personalization map;
//! unknown tokens are left literal so a template typo never breaks a send.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

/// Render a template, substituting `{token}` placeholders
///
/// Missing keys leave the literal `{token}` in place. Never fails.
pub fn render(template: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        match after_open.find('}') {
            Some(close) => {
                let token = &after_open[..close];
                match values.get(token) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(token);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                // Unclosed brace, keep the remainder as-is
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Opaque resume-link token for a dropped-off session
///
/// The routing layer must treat this as a capability token, never parse it.
pub fn resume_token(user_id: &str, event_id: &str, timestamp_millis: i64) -> String {
    let material = format!("{}:{}:{}", user_id, event_id, timestamp_millis);
    let digest = Sha256::digest(material.as_bytes());
    hex::encode(digest)
}

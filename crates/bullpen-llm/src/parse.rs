//! Reply post-processing.
//!
//! Models wrap programs in Markdown fences more often than not. The
//! studio wants the file contents, so the first fenced block wins;
//! replies with no complete fence are taken verbatim.

/// Extract the first fenced code block from a model reply.
///
/// The fence's language tag is ignored. When the reply has no complete
/// fence, the whole trimmed reply is returned instead, which keeps
/// plain-text replies usable as file contents.
#[must_use]
pub fn extract_code_block(reply: &str) -> &str {
    fenced_block(reply).unwrap_or_else(|| reply.trim())
}

/// Find the contents of the first complete ``` fence.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_tag = open.checked_add(3).unwrap_or(open);
    // Skip the rest of the fence line ("```python" and friends)
    let start = text
        .get(after_tag..)
        .and_then(|s| s.find('\n'))
        .and_then(|nl| after_tag.checked_add(nl))
        .and_then(|pos| pos.checked_add(1))
        .unwrap_or(after_tag);
    let remaining = text.get(start..)?;
    let end = remaining.find("```")?;
    remaining.get(..end).map(str::trim)
}

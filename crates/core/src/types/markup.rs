//! Markup stripping for free-text input.
//!
//! Removes every HTML tag while keeping the text between tags. The contents of
//! `script` and `style` elements are dropped entirely and comments are removed.
//! The result is plain text again: the entities `ammonia` emits while
//! serializing are decoded, so `Tom & Jerry` stays `Tom & Jerry` in the store
//! and is escaped exactly once when rendered.

use std::collections::HashSet;
use std::sync::LazyLock;

static STRIP_ALL: LazyLock<ammonia::Builder<'static>> = LazyLock::new(|| {
    let mut builder = ammonia::Builder::empty();
    builder
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true);
    builder
});

/// Entities produced by the html5ever text serializer.
const SERIALIZER_ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", "\u{a0}"),
    // Must run last so `&amp;lt;` decodes to `&lt;` rather than `<`.
    ("&amp;", "&"),
];

/// Strip all markup from `input`, returning plain text.
///
/// The returned text may still contain `<` or `>` when the input carried them
/// as entities (for example `&lt;b&gt;`); callers that must never store angle
/// brackets check for them after stripping.
///
/// # Example
///
/// ```
/// use student_records_core::strip_markup;
///
/// assert_eq!(strip_markup("<b>Ada</b> Lovelace"), "Ada Lovelace");
/// assert_eq!(strip_markup("<script>alert(1)</script>Bob"), "Bob");
/// assert_eq!(strip_markup("Tom & Jerry"), "Tom & Jerry");
/// ```
#[must_use]
pub fn strip_markup(input: &str) -> String {
    let cleaned = STRIP_ALL.clean(input).to_string();

    SERIALIZER_ENTITIES
        .iter()
        .fold(cleaned, |text, (entity, plain)| text.replace(entity, plain))
}

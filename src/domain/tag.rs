/// Prefix conventionally put in front of version tags (`v1.2.3`)
pub const TAG_PREFIX: char = 'v';

/// Strip a single leading `v` from a tag name (e.g., "v1.2.3" -> "1.2.3").
pub fn strip_prefix(tag: &str) -> &str {
    tag.strip_prefix(TAG_PREFIX).unwrap_or(tag)
}

/// Format a version as a tag, with or without the `v` prefix.
pub fn with_prefix(version: &str, prefixed: bool) -> String {
    if prefixed {
        format!("{}{}", TAG_PREFIX, version)
    } else {
        version.to_string()
    }
}

/// Whether the tag list literally contains `v<version>`.
///
/// The prefix convention is inferred from the tags rather than configured.
/// When both `1.2.3` and `v1.2.3` exist the prefixed form wins.
pub fn has_prefixed_match(tags: &[String], version: &str) -> bool {
    let prefixed = with_prefix(version, true);
    tags.iter().any(|tag| *tag == prefixed)
}

/// Strip the conventional leading `v` from a release tag.
///
/// `"v1.2.3"` becomes `"1.2.3"`. Anything else, including the empty string
/// and tags that start with an uppercase `V`, is returned unchanged. Only one
/// character is ever removed.
pub fn normalize_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

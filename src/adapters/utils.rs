//! Small validation helpers shared by the adapters.

/// `true` if every byte is printable ASCII (`0x20..=0x7E`).
pub(crate) fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

/// `true` if `s` can be placed in a URL query value without escaping.
pub(crate) fn is_query_safe(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

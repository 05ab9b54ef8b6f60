/// Default number of characters kept from a command template.
pub const DEFAULT_FINGERPRINT_LEN: usize = 50;

/// Extract the matching fingerprint of a command template.
///
/// Lengths are counted in characters, not bytes. The result is the first line
/// of the command when that line fits in `max_chars`, otherwise the first
/// `max_chars` characters.
///
/// # Examples
///
/// ```
/// use techtest::extract::fingerprint;
///
/// assert_eq!(fingerprint("whoami", 50), "whoami");
/// assert_eq!(fingerprint("echo hi\nmore", 50), "echo hi");
/// assert_eq!(fingerprint("abcdef\nmore", 3), "abc");
/// ```
pub fn fingerprint(command: &str, max_chars: usize) -> &str {
    match command.chars().position(|c| c == '\n') {
        Some(newline) if newline <= max_chars => char_prefix(command, newline),
        Some(_) => char_prefix(command, max_chars),
        None => char_prefix(command, max_chars),
    }
}

fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte_offset, _)) => &text[..byte_offset],
        None => text,
    }
}

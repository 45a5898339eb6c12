//! Line scanners for the built-in block syntax.
//!
//! Every scanner takes the line with its indentation already removed.

use crate::strings::{is_blank, is_space_or_tab};

/// Matches an opening code fence; returns the length of the fence.
pub fn open_code_fence(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let c = *bytes.first()?;
    if c != b'`' && c != b'~' {
        return None;
    }

    let len = bytes.iter().take_while(|&&b| b == c).count();
    if len < 3 {
        return None;
    }

    // Backtick fences may not have backticks in their info string.
    if c == b'`' && bytes[len..].contains(&b'`') {
        return None;
    }

    Some(len)
}

/// Matches a closing code fence of at least `min_len` `fence_char`s, followed only by
/// whitespace.
pub fn close_code_fence(line: &str, fence_char: u8, min_len: usize) -> bool {
    let bytes = line.as_bytes();
    let len = bytes.iter().take_while(|&&b| b == fence_char).count();
    len >= min_len && is_blank(&line[len..])
}

/// Matches the start of an ATX heading; returns the level and the offset of its content.
pub fn atx_heading_start(line: &str) -> Option<(u8, usize)> {
    let bytes = line.as_bytes();
    let level = bytes.iter().take_while(|&&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    match bytes.get(level) {
        None => Some((level as u8, level)),
        Some(&c) if is_space_or_tab(c) => {
            let spaces = bytes[level..]
                .iter()
                .take_while(|&&b| is_space_or_tab(b))
                .count();
            Some((level as u8, level + spaces))
        }
        Some(_) => None,
    }
}

/// Matches a thematic break: three or more of the same `*`, `-` or `_`, with optional spaces
/// or tabs between them and nothing else.
pub fn thematic_break(line: &str) -> bool {
    let bytes = line.as_bytes();
    let c = match bytes.first() {
        Some(&c @ (b'*' | b'-' | b'_')) => c,
        _ => return false,
    };

    let mut count = 0;
    for &b in bytes {
        if b == c {
            count += 1;
        } else if !is_space_or_tab(b) {
            return false;
        }
    }
    count >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fences() {
        assert_eq!(open_code_fence("```rust"), Some(3));
        assert_eq!(open_code_fence("~~~~"), Some(4));
        assert_eq!(open_code_fence("``"), None);
        assert_eq!(open_code_fence("``` a`b"), None);
        assert!(close_code_fence("````  ", b'`', 3));
        assert!(!close_code_fence("``", b'`', 3));
        assert!(!close_code_fence("``` x", b'`', 3));
    }

    #[test]
    fn atx_headings() {
        assert_eq!(atx_heading_start("# Hi"), Some((1, 2)));
        assert_eq!(atx_heading_start("###"), Some((3, 3)));
        assert_eq!(atx_heading_start("#Hi"), None);
        assert_eq!(atx_heading_start("####### Hi"), None);
    }

    #[test]
    fn thematic_breaks() {
        assert!(thematic_break("***"));
        assert!(thematic_break("- - -"));
        assert!(!thematic_break("--"));
        assert!(!thematic_break("-*-"));
        assert!(!thematic_break("--- a"));
    }
}

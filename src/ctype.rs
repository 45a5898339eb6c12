//! ASCII character classes, as CommonMark defines them.

#[inline]
pub fn isspace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

#[inline]
pub fn ispunct(ch: u8) -> bool {
    ch.is_ascii_punctuation()
}

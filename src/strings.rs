use crate::ctype::isspace;

/// Split `s` into lines, dropping the `\n`, `\r\n` or `\r` that ends each one.
///
/// A trailing line ending does not produce an empty final line.
pub fn split_lines(s: &str) -> Vec<&str> {
    let sb = s.as_bytes();
    let end = sb.len();
    let matcher = jetscii::bytes!(b'\r', b'\n');

    let mut lines = vec![];
    let mut ix = 0;
    while ix < end {
        let eol = match matcher.find(&sb[ix..]) {
            Some(offset) => ix + offset,
            None => end,
        };
        lines.push(&s[ix..eol]);

        ix = eol;
        if ix < end && sb[ix] == b'\r' {
            ix += 1;
        }
        if ix < end && sb[ix] == b'\n' {
            ix += 1;
        }
    }
    lines
}

/// The byte offset of the first occurrence of `needle` in `haystack`.  An empty needle is
/// found at once.
pub fn find_substring(haystack: &str, needle: &str) -> Option<usize> {
    Finder::new(needle).find(haystack)
}

/// A needle prepared once for searching many haystacks.
pub struct Finder<'n> {
    substring: Option<jetscii::Substring<'n>>,
}

impl<'n> Finder<'n> {
    pub fn new(needle: &'n str) -> Self {
        Finder {
            substring: (!needle.is_empty()).then(|| jetscii::Substring::new(needle)),
        }
    }

    pub fn find(&self, haystack: &str) -> Option<usize> {
        match self.substring {
            Some(ref substring) => substring.find(haystack),
            None => Some(0),
        }
    }
}

pub fn normalize_code(v: &str) -> String {
    let mut r = String::with_capacity(v.len());
    let mut contains_nonspace = false;

    let mut chars = v.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    r.push(' ');
                }
            }
            '\n' => r.push(' '),
            c => {
                if c != ' ' {
                    contains_nonspace = true;
                }
                r.push(c);
            }
        }
    }

    if contains_nonspace && r.len() >= 2 && r.starts_with(' ') && r.ends_with(' ') {
        r.remove(0);
        r.pop();
    }

    r
}

pub fn is_space_or_tab(ch: u8) -> bool {
    matches!(ch, 9 | 32)
}

pub fn is_blank(s: &str) -> bool {
    s.bytes().all(|c| matches!(c, 9 | 10 | 13 | 32))
}

/// Count leading spaces, stopping at `limit + 1` so the caller can tell "too many" apart.
pub fn leading_spaces(s: &str, limit: usize) -> usize {
    s.bytes().take(limit + 1).take_while(|&c| c == b' ').count()
}

pub fn rtrim(line: &mut String) {
    let len = line.trim_end_matches(|c: char| c.is_ascii() && isspace(c as u8)).len();
    line.truncate(len);
}

pub fn chop_trailing_hashtags(line: &str) -> &str {
    let line = line.trim_end_matches(|c| c == ' ' || c == '\t');
    let stripped = line.trim_end_matches('#');

    if stripped.is_empty() {
        stripped
    } else if stripped.len() != line.len() && stripped.ends_with(|c| c == ' ' || c == '\t') {
        stripped.trim_end_matches(|c| c == ' ' || c == '\t')
    } else {
        line
    }
}

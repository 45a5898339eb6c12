use std::cell::{Cell, RefCell};

use typed_arena::Arena;
use unicode_categories::UnicodeCategories;

use crate::adapters::{InlineInput, InlineMatch, InlineParserAdapter};
use crate::arena_tree::Node;
use crate::ctype::ispunct;
use crate::nodes::{Ast, AstNode, NodeCode, NodeValue};
use crate::strings::{self, is_space_or_tab};

pub(crate) struct Subject<'a, 'p, 'i> {
    arena: &'a Arena<AstNode<'a>>,
    parsers: &'p [&'p dyn InlineParserAdapter],
    exhausted: Vec<Cell<Option<usize>>>,
    input: &'i str,
    pos: usize,
    line: usize,
    special_chars: [bool; 256],
    delimiters: Vec<Delimiter<'a>>,
    last_delimiter: Option<usize>,
}

#[derive(Clone, Copy)]
struct Delimiter<'a> {
    inl: &'a AstNode<'a>,
    position: usize,
    delim_char: u8,
    length: usize,
    can_open: bool,
    can_close: bool,
    prev: Option<usize>,
    next: Option<usize>,
}

trait CmarkPunctuation {
    fn is_cmark_punctuation(&self) -> bool;
}

impl CmarkPunctuation for char {
    #[inline]
    fn is_cmark_punctuation(&self) -> bool {
        self.is_punctuation() || self.is_symbol()
    }
}

impl<'a, 'p, 'i> Subject<'a, 'p, 'i> {
    pub fn new(
        arena: &'a Arena<AstNode<'a>>,
        parsers: &'p [&'p dyn InlineParserAdapter],
        input: &'i str,
        line: usize,
    ) -> Self {
        let mut special_chars = [false; 256];
        for &b in b"\r\n*_" {
            special_chars[b as usize] = true;
        }
        for parser in parsers {
            for &b in parser.triggers() {
                special_chars[b as usize] = true;
            }
        }

        Subject {
            arena,
            parsers,
            exhausted: vec![Cell::new(None); parsers.len()],
            input,
            pos: 0,
            line,
            special_chars,
            delimiters: vec![],
            last_delimiter: None,
        }
    }

    pub fn parse_inlines(&mut self, parent: &'a AstNode<'a>) {
        while self.parse_inline(parent) {}
        self.process_emphasis();
        postprocess_text_nodes(parent);
    }

    fn parse_inline(&mut self, parent: &'a AstNode<'a>) -> bool {
        let c = match self.peek_char() {
            None => return false,
            Some(&c) => c,
        };

        let new_inl = match c {
            b'\r' | b'\n' => self.handle_newline(),
            _ => match self.try_parsers(c) {
                Some(value) => self.make_inline(value),
                None if c == b'*' || c == b'_' => self.handle_delim(c),
                None => {
                    let text = self.handle_text();
                    self.make_inline(NodeValue::Text(text))
                }
            },
        };

        parent.append(new_inl);
        true
    }

    /// Offer the cursor to each recognizer triggered by `c`, in order.  The first match that
    /// consumes input wins.
    fn try_parsers(&mut self, c: u8) -> Option<NodeValue> {
        let rest = &self.input[self.pos..];
        for (parser, exhausted) in self.parsers.iter().zip(&self.exhausted) {
            if !parser.triggers().contains(&c) {
                continue;
            }

            let input = InlineInput {
                rest,
                pos: self.pos,
                exhausted,
            };
            match parser.parse(&input) {
                Some(InlineMatch { value, len })
                    if len > 0
                        && len <= rest.len()
                        && rest.is_char_boundary(len)
                        && !value.block() =>
                {
                    self.line += rest.as_bytes()[..len].iter().filter(|&&b| b == b'\n').count();
                    self.pos += len;
                    return Some(value);
                }
                Some(_) => {
                    log::debug!("ignoring invalid inline match at byte {}", self.pos);
                }
                None => (),
            }
        }
        None
    }

    fn make_inline(&self, value: NodeValue) -> &'a AstNode<'a> {
        self.arena
            .alloc(Node::new(RefCell::new(Ast::new(value, self.line))))
    }

    #[inline]
    fn peek_char(&self) -> Option<&u8> {
        self.input.as_bytes().get(self.pos)
    }

    fn skip_spaces(&mut self) {
        while self.peek_char().map_or(false, |&c| is_space_or_tab(c)) {
            self.pos += 1;
        }
    }

    fn handle_newline(&mut self) -> &'a AstNode<'a> {
        let bytes = self.input.as_bytes();
        let nlpos = self.pos;
        if bytes[self.pos] == b'\r' {
            self.pos += 1;
        }
        if self.peek_char() == Some(&b'\n') {
            self.pos += 1;
        }

        let inl = if nlpos > 1 && bytes[nlpos - 1] == b' ' && bytes[nlpos - 2] == b' ' {
            self.make_inline(NodeValue::LineBreak)
        } else {
            self.make_inline(NodeValue::SoftBreak)
        };
        self.line += 1;
        self.skip_spaces();
        inl
    }

    fn handle_text(&mut self) -> String {
        let start = self.pos;
        self.pos += self.input[start..].chars().next().map_or(1, char::len_utf8);

        let bytes = self.input.as_bytes();
        while self.pos < bytes.len()
            && !(self.special_chars[bytes[self.pos] as usize]
                && self.input.is_char_boundary(self.pos))
        {
            self.pos += 1;
        }

        let text = &self.input[start..self.pos];
        match self.peek_char() {
            Some(&(b'\r' | b'\n')) => text.trim_end_matches(' ').to_string(),
            _ => text.to_string(),
        }
    }

    fn handle_delim(&mut self, c: u8) -> &'a AstNode<'a> {
        let position = self.pos;
        let (numdelims, can_open, can_close) = self.scan_delims(c);
        let contents = self.input[position..position + numdelims].to_string();
        self.pos += numdelims;

        let inl = self.make_inline(NodeValue::Text(contents));
        if can_open || can_close {
            self.push_delimiter(Delimiter {
                inl,
                position,
                delim_char: c,
                length: numdelims,
                can_open,
                can_close,
                prev: None,
                next: None,
            });
        }
        inl
    }

    fn scan_delims(&self, c: u8) -> (usize, bool, bool) {
        let before_char = self.input[..self.pos].chars().next_back().unwrap_or('\n');
        let numdelims = self.input.as_bytes()[self.pos..]
            .iter()
            .take_while(|&&b| b == c)
            .count();
        let after_char = self.input[self.pos + numdelims..]
            .chars()
            .next()
            .unwrap_or('\n');

        let left_flanking = numdelims > 0
            && !after_char.is_whitespace()
            && !(after_char.is_cmark_punctuation()
                && !before_char.is_whitespace()
                && !before_char.is_cmark_punctuation());
        let right_flanking = numdelims > 0
            && !before_char.is_whitespace()
            && !(before_char.is_cmark_punctuation()
                && !after_char.is_whitespace()
                && !after_char.is_cmark_punctuation());

        if c == b'_' {
            (
                numdelims,
                left_flanking && (!right_flanking || before_char.is_cmark_punctuation()),
                right_flanking && (!left_flanking || after_char.is_cmark_punctuation()),
            )
        } else {
            (numdelims, left_flanking, right_flanking)
        }
    }

    fn process_emphasis(&mut self) {
        // Prevents searching down the stack for openers we've previously searched for and
        // know don't exist.
        let mut openers_bottom = [0usize; 7];

        let mut closer = if self.delimiters.is_empty() {
            None
        } else {
            Some(0)
        };

        while let Some(c) = closer {
            let cd = self.delimiters[c];
            if !cd.can_close {
                closer = cd.next;
                continue;
            }

            let ix = match cd.delim_char {
                b'_' => 0,
                _ => 1 + if cd.can_open { 3 } else { 0 } + cd.length % 3,
            };

            let mut opener = cd.prev;
            let mut opener_found = None;
            let mut mod_three_rule_invoked = false;
            while let Some(o) = opener {
                let od = self.delimiters[o];
                if od.position < openers_bottom[ix] {
                    break;
                }
                if od.can_open && od.delim_char == cd.delim_char {
                    // A run that can both open and close only pairs with another if their
                    // combined length is not a multiple of 3, unless both lengths are.
                    let odd_match = (cd.can_open || od.can_close)
                        && (od.length + cd.length) % 3 == 0
                        && !(od.length % 3 == 0 && cd.length % 3 == 0);
                    if !odd_match {
                        opener_found = Some(o);
                        break;
                    }
                    mod_three_rule_invoked = true;
                }
                opener = od.prev;
            }

            match opener_found {
                Some(o) => closer = self.insert_emph(o, c),
                None => {
                    closer = cd.next;
                    if !mod_three_rule_invoked {
                        openers_bottom[ix] = cd.position;
                    }
                    if !cd.can_open {
                        self.remove_delimiter(c);
                    }
                }
            }
        }

        self.delimiters.clear();
        self.last_delimiter = None;
    }

    fn push_delimiter(&mut self, mut delimiter: Delimiter<'a>) {
        let ix = self.delimiters.len();
        delimiter.prev = self.last_delimiter;
        delimiter.next = None;
        if let Some(last) = self.last_delimiter {
            self.delimiters[last].next = Some(ix);
        }
        self.delimiters.push(delimiter);
        self.last_delimiter = Some(ix);
    }

    fn remove_delimiter(&mut self, ix: usize) {
        let Delimiter { prev, next, .. } = self.delimiters[ix];
        match next {
            Some(next) => self.delimiters[next].prev = prev,
            None => self.last_delimiter = prev,
        }
        if let Some(prev) = prev {
            self.delimiters[prev].next = next;
        }
    }

    /// Wrap everything between the two delimiters in an emphasis node.  Returns the next closer
    /// to process.
    fn insert_emph(&mut self, opener: usize, closer: usize) -> Option<usize> {
        let opener_inl = self.delimiters[opener].inl;
        let closer_inl = self.delimiters[closer].inl;

        let opener_num_chars = text_len(opener_inl);
        let closer_num_chars = text_len(closer_inl);
        let use_delims = if closer_num_chars >= 2 && opener_num_chars >= 2 {
            2
        } else {
            1
        };
        let opener_num_chars = opener_num_chars - use_delims;
        let closer_num_chars = closer_num_chars - use_delims;

        truncate_text(opener_inl, opener_num_chars);
        truncate_text(closer_inl, closer_num_chars);

        // None of the delimiters between the pair can match any more.
        self.delimiters[opener].next = Some(closer);
        self.delimiters[closer].prev = Some(opener);

        let emph = self.make_inline(if use_delims == 1 {
            NodeValue::Emph
        } else {
            NodeValue::Strong
        });
        emph.data.borrow_mut().start_line = opener_inl.data.borrow().start_line;
        emph.data.borrow_mut().end_line = closer_inl.data.borrow().end_line;

        let mut tmp = opener_inl.next_sibling();
        while let Some(n) = tmp {
            if n.same_node(closer_inl) {
                break;
            }
            tmp = n.next_sibling();
            emph.append(n);
        }
        opener_inl.insert_after(emph);

        if opener_num_chars == 0 {
            opener_inl.detach();
            self.remove_delimiter(opener);
        }

        if closer_num_chars == 0 {
            closer_inl.detach();
            let next = self.delimiters[closer].next;
            self.remove_delimiter(closer);
            next
        } else {
            Some(closer)
        }
    }
}

fn text_len(node: &AstNode<'_>) -> usize {
    node.data.borrow().value.text().map_or(0, String::len)
}

fn truncate_text(node: &AstNode<'_>, len: usize) {
    if let Some(text) = node.data.borrow_mut().value.text_mut() {
        text.truncate(len);
    }
}

/// Merge adjacent text nodes and drop empty ones.
fn postprocess_text_nodes<'a>(node: &'a AstNode<'a>) {
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        let mut child = node.first_child();
        while let Some(n) = child {
            let mut next = n.next_sibling();

            if n.data.borrow().value.text().is_some() {
                while let Some(adjacent) = next {
                    let adjacent_text = match adjacent.data.borrow().value.text() {
                        Some(text) => text.clone(),
                        None => break,
                    };
                    if let Some(text) = n.data.borrow_mut().value.text_mut() {
                        text.push_str(&adjacent_text);
                    }
                    next = adjacent.next_sibling();
                    adjacent.detach();
                }

                if text_len(n) == 0 {
                    n.detach();
                }
            } else {
                stack.push(n);
            }

            child = next;
        }
    }
}

/// Code spans.  A backtick run with no matching closing run is literal text.
pub struct CodeSpan;

impl InlineParserAdapter for CodeSpan {
    fn triggers(&self) -> &[u8] {
        b"`"
    }

    fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch> {
        let input = input.rest();
        let bytes = input.as_bytes();
        let openticks = bytes.iter().take_while(|&&b| b == b'`').count();

        let mut pos = openticks;
        while let Some(offset) = bytes[pos..].iter().position(|&b| b == b'`') {
            let start = pos + offset;
            let run = bytes[start..].iter().take_while(|&&b| b == b'`').count();
            if run == openticks {
                return Some(InlineMatch {
                    value: NodeValue::Code(NodeCode {
                        num_backticks: openticks,
                        literal: strings::normalize_code(&input[openticks..start]),
                    }),
                    len: start + run,
                });
            }
            pos = start + run;
        }

        Some(InlineMatch {
            value: NodeValue::Text(input[..openticks].to_string()),
            len: openticks,
        })
    }
}

/// Backslash escapes of ASCII punctuation, and backslash hard line breaks.
pub struct BackslashEscape;

impl InlineParserAdapter for BackslashEscape {
    fn triggers(&self) -> &[u8] {
        b"\\"
    }

    fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch> {
        let bytes = input.rest().as_bytes();
        match bytes.get(1) {
            Some(&c) if ispunct(c) => Some(InlineMatch {
                value: NodeValue::Text((c as char).to_string()),
                len: 2,
            }),
            Some(b'\r') | Some(b'\n') => {
                let len = if bytes[1..].starts_with(b"\r\n") { 3 } else { 2 };
                Some(InlineMatch {
                    value: NodeValue::LineBreak,
                    len,
                })
            }
            _ => Some(InlineMatch {
                value: NodeValue::Text("\\".to_string()),
                len: 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse<'a>(arena: &'a Arena<AstNode<'a>>, input: &str) -> &'a AstNode<'a> {
        let parsers: [&dyn InlineParserAdapter; 2] = [&CodeSpan, &BackslashEscape];
        let root = &*arena.alloc(AstNode::from(NodeValue::Paragraph));
        Subject::new(arena, &parsers, input, 1).parse_inlines(root);
        root
    }

    fn values<'a>(node: &'a AstNode<'a>) -> Vec<NodeValue> {
        node.children()
            .map(|n| n.data.borrow().value.clone())
            .collect()
    }

    #[test]
    fn unmatched_backticks_are_text() {
        let arena = Arena::new();
        let root = parse(&arena, "``a`");
        assert_eq!(values(root), [NodeValue::Text("``a`".into())]);
    }

    #[test]
    fn code_span_keeps_backslashes() {
        let arena = Arena::new();
        let root = parse(&arena, "`\\(x\\)`");
        assert_eq!(
            values(root),
            [NodeValue::Code(NodeCode {
                num_backticks: 1,
                literal: "\\(x\\)".into(),
            })]
        );
    }

    #[test]
    fn escapes_merge_into_text() {
        let arena = Arena::new();
        let root = parse(&arena, "a\\*b\\q");
        assert_eq!(values(root), [NodeValue::Text("a*b\\q".into())]);
    }

    #[test]
    fn nested_emphasis() {
        let arena = Arena::new();
        let root = parse(&arena, "***a* b**");
        assert_eq!(values(root), [NodeValue::Strong]);
        let strong = root.first_child().unwrap();
        assert_eq!(
            values(strong),
            [NodeValue::Emph, NodeValue::Text(" b".into())]
        );
    }

    #[test]
    fn intraword_underscores_are_text() {
        let arena = Arena::new();
        let root = parse(&arena, "snake_case_name");
        assert_eq!(values(root), [NodeValue::Text("snake_case_name".into())]);
    }

    #[test]
    fn trailing_spaces_make_a_hard_break() {
        let arena = Arena::new();
        let root = parse(&arena, "a  \nb\nc");
        assert_eq!(
            values(root),
            [
                NodeValue::Text("a".into()),
                NodeValue::LineBreak,
                NodeValue::Text("b".into()),
                NodeValue::SoftBreak,
                NodeValue::Text("c".into()),
            ]
        );
    }

    #[test]
    fn inlines_carry_their_line() {
        let arena = Arena::new();
        let root = parse(&arena, "a\nb");
        let lines: Vec<_> = root
            .children()
            .map(|n| n.data.borrow().start_line)
            .collect();
        assert_eq!(lines, [1, 1, 2]);
    }
}

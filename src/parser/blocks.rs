//! The built-in block recognizers.

use crate::adapters::{BlockInput, BlockMatch, BlockParserAdapter};
use crate::nodes::{NodeCodeBlock, NodeHeading, NodeValue};
use crate::scanners;
use crate::strings::{self, leading_spaces};

/// Lines indented by more than this are never the start of a block.
const MAX_INDENT: usize = 3;

fn unindented(line: &str) -> Option<(usize, &str)> {
    let indent = leading_spaces(line, MAX_INDENT);
    if indent > MAX_INDENT {
        return None;
    }
    Some((indent, &line[indent..]))
}

pub struct CodeFence;

impl BlockParserAdapter for CodeFence {
    fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch> {
        let first = input.line(0)?;
        let (indent, rest) = unindented(first)?;
        let fence_length = scanners::open_code_fence(rest)?;
        let fence_char = rest.as_bytes()[0];

        let mut ncb = NodeCodeBlock {
            fence_char,
            fence_length,
            info: rest[fence_length..].trim().to_string(),
            literal: String::new(),
        };

        let mut n = 1;
        while let Some(line) = input.line(n) {
            if let Some((_, rest)) = unindented(line) {
                if scanners::close_code_fence(rest, fence_char, fence_length) {
                    return Some(BlockMatch::new(NodeValue::CodeBlock(ncb), n));
                }
            }

            let strip = line
                .bytes()
                .take(indent)
                .take_while(|&b| b == b' ')
                .count();
            ncb.literal.push_str(&line[strip..]);
            ncb.literal.push('\n');
            n += 1;
        }

        // An unclosed fence runs to the end of the document.
        Some(BlockMatch::new(NodeValue::CodeBlock(ncb), n - 1))
    }
}

pub struct AtxHeading;

impl BlockParserAdapter for AtxHeading {
    fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch> {
        let line = input.line(0)?;
        let (_, rest) = unindented(line)?;
        let (level, offset) = scanners::atx_heading_start(rest)?;

        let mut m = BlockMatch::new(NodeValue::Heading(NodeHeading { level }), 0);
        m.content = strings::chop_trailing_hashtags(rest[offset..].trim()).to_string();
        Some(m)
    }
}

pub struct ThematicBreak;

impl BlockParserAdapter for ThematicBreak {
    fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch> {
        let line = input.line(0)?;
        let (_, rest) = unindented(line)?;
        scanners::thematic_break(rest).then(|| BlockMatch::new(NodeValue::ThematicBreak, 0))
    }
}

use crate::adapters::{BlockInput, BlockMatch, BlockParserAdapter};
use crate::nodes::{NodeMathBlock, NodeValue};
use crate::strings::{is_blank, leading_spaces, Finder};

/// Recognizes display math: a run of lines from the block-start delimiter to the first
/// block-end delimiter after it.
///
/// The opening delimiter may be indented by up to three spaces.  Nothing is matched unless the
/// closing delimiter is found; an unterminated block is left to the rest of the parser.  The
/// block takes the whole of the line it closes on, so anything after the closing delimiter is
/// discarded.
#[derive(Debug, Clone, Copy)]
pub struct BlockMathParser<'c> {
    start: &'c str,
    end: &'c str,
}

impl<'c> BlockMathParser<'c> {
    /// A parser for blocks between `start` and `end`.  An empty `start` never matches.
    pub fn new(start: &'c str, end: &'c str) -> Self {
        BlockMathParser { start, end }
    }
}

impl BlockParserAdapter for BlockMathParser<'_> {
    fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch> {
        if self.start.is_empty() {
            return None;
        }

        let first = input.line(0)?;
        let indent = leading_spaces(first, 3);
        if indent > 3 || !first[indent..].starts_with(self.start) {
            return None;
        }

        // No end delimiter on this line or any after it.
        if input.exhausted() {
            return None;
        }

        let finder = Finder::new(self.end);
        let mut lines = vec![];
        let mut n = 0;
        let mut line = &first[indent + self.start.len()..];

        loop {
            if let Some(ix) = finder.find(line) {
                lines.push(line[..ix].to_string());
                let trailing = &line[ix + self.end.len()..];
                if !is_blank(trailing) {
                    log::trace!("text after the end of a math block dropped: {:?}", trailing);
                }
                return Some(BlockMatch::new(
                    NodeValue::MathBlock(NodeMathBlock { lines }),
                    n,
                ));
            }
            lines.push(line.to_string());

            n += 1;
            line = match input.line(n) {
                Some(line) => line,
                None => {
                    log::trace!(
                        "unterminated math block opened with {:?}, {} lines scanned",
                        self.start,
                        n
                    );
                    input.mark_exhausted(1);
                    return None;
                }
            };
        }
    }
}

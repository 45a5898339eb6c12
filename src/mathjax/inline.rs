use crate::adapters::{InlineInput, InlineMatch, InlineParserAdapter};
use crate::nodes::{NodeMath, NodeValue};
use crate::strings::find_substring;

fn first_byte(delimiter: &str) -> &[u8] {
    &delimiter.as_bytes()[..delimiter.len().min(1)]
}

/// Recognizes inline math: the inline-start delimiter, then everything up to the nearest
/// inline-end delimiter after it.
///
/// An unterminated start delimiter is claimed as plain text, so nothing after it in the run
/// reinterprets it.  Once a search for the end delimiter has failed, every later start in the
/// same text is unterminated too, and is claimed without searching again.
#[derive(Debug, Clone, Copy)]
pub struct InlineMathParser<'c> {
    start: &'c str,
    end: &'c str,
}

impl<'c> InlineMathParser<'c> {
    /// A parser for spans between `start` and `end`.
    pub fn new(start: &'c str, end: &'c str) -> Self {
        InlineMathParser { start, end }
    }
}

impl InlineParserAdapter for InlineMathParser<'_> {
    fn triggers(&self) -> &[u8] {
        first_byte(self.start)
    }

    fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch> {
        if self.start.is_empty() {
            return None;
        }
        let rest = input.rest().strip_prefix(self.start)?;

        if !input.exhausted() {
            if let Some(ix) = find_substring(rest, self.end) {
                return Some(InlineMatch {
                    value: NodeValue::Math(NodeMath {
                        literal: rest[..ix].to_string(),
                    }),
                    len: self.start.len() + ix + self.end.len(),
                });
            }
            log::trace!("unterminated inline math opened with {:?}", self.start);
            input.mark_exhausted(self.start.len());
        }

        Some(InlineMatch {
            value: NodeValue::Text(self.start.to_string()),
            len: self.start.len(),
        })
    }
}

/// Claims a delimiter as plain text wherever it appears in an inline run.
///
/// Keeps the opener of an unterminated math block, which ends up in a paragraph, from being
/// read as a backslash escape.
#[derive(Debug, Clone, Copy)]
pub struct LiteralDelimiter<'c> {
    delimiter: &'c str,
}

impl<'c> LiteralDelimiter<'c> {
    /// Claim `delimiter`.
    pub fn new(delimiter: &'c str) -> Self {
        LiteralDelimiter { delimiter }
    }
}

impl InlineParserAdapter for LiteralDelimiter<'_> {
    fn triggers(&self) -> &[u8] {
        first_byte(self.delimiter)
    }

    fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch> {
        if self.delimiter.is_empty() || !input.rest().starts_with(self.delimiter) {
            return None;
        }
        Some(InlineMatch {
            value: NodeValue::Text(self.delimiter.to_string()),
            len: self.delimiter.len(),
        })
    }
}

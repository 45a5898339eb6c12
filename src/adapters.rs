//! Adapter traits for plugins.
//!
//! Each plugin has to implement one of the traits available in this module, and is then
//! registered with [`Plugins`](crate::Plugins), usually by an [`Extension`].

use std::cell::Cell;
use std::io;

use crate::html::Context;
use crate::nodes::{AstNode, NodeValue};
use crate::parser::Plugins;

/// When a block recognizer is tried, relative to the others.
///
/// Stages are tried in declaration order.  Within a stage the built-in recognizers come first,
/// then plugins in registration order.  Paragraph text is the fallback once every stage has
/// declined a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockStage {
    /// Constructs that claim every following line until they close, such as code fences.
    Fence,

    /// Single-line constructs: ATX headings and thematic breaks.
    Leaf,
}

/// When an inline recognizer is tried, relative to the others.
///
/// Stages are tried in declaration order for the byte under the cursor.  Within a stage the
/// built-in recognizers come first, then plugins in registration order.  Emphasis delimiter
/// runs and then plain text are the fallback once every recognizer has declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStage {
    /// Code spans, which protect their contents from every later stage.
    Code,

    /// Span-level syntax.
    Span,

    /// Backslash escapes.
    Escape,
}

/// The block parser's view of the document, starting at its cursor.
#[derive(Debug, Clone, Copy)]
pub struct BlockInput<'i> {
    pub(crate) lines: &'i [&'i str],
    pub(crate) line: usize,
    pub(crate) exhausted: &'i Cell<Option<usize>>,
}

impl<'i> BlockInput<'i> {
    /// The `n`th line from the cursor, without its line ending.
    pub fn line(&self, n: usize) -> Option<&'i str> {
        self.lines.get(self.line.checked_add(n)?).copied()
    }

    /// The number of lines from the cursor to the end of the document, including line 0.
    pub fn remaining_lines(&self) -> usize {
        self.lines.len() - self.line
    }

    /// Record that what this recognizer searches for occurs nowhere from line `n` to the end
    /// of the document.  The note is kept for the rest of the parse, separately for each
    /// registered recognizer.
    pub fn mark_exhausted(&self, n: usize) {
        let from = self.line.saturating_add(n);
        if self.exhausted.get().map_or(true, |l| from < l) {
            self.exhausted.set(Some(from));
        }
    }

    /// Whether an earlier [`mark_exhausted`](Self::mark_exhausted) covers the cursor's line.
    pub fn exhausted(&self) -> bool {
        self.exhausted.get().is_some_and(|from| self.line >= from)
    }
}

/// A block recognized by a [`BlockParserAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    /// The node to insert.
    pub value: NodeValue,

    /// Inline content to parse into the node, if its type contains inlines.
    pub content: String,

    /// The line, relative to the cursor, on which the match ends.  The whole of that line
    /// belongs to the match; parsing resumes on the line after it.
    pub end_line: usize,
}

impl BlockMatch {
    /// A match of `value` ending on line `end_line`.
    pub fn new(value: NodeValue, end_line: usize) -> Self {
        BlockMatch {
            value,
            content: String::new(),
            end_line,
        }
    }
}

/// Implement this adapter to recognize a custom block-level construct.
pub trait BlockParserAdapter: Send + Sync {
    /// Inspect the input at the cursor and either describe a complete match or decline.
    ///
    /// Implementations must not assume anything is committed until they return a match: the
    /// host only inserts the node afterwards.  A match ending past the last line is ignored.
    fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch>;
}

/// The inline parser's view of a paragraph or heading's text, starting at its cursor.
#[derive(Debug, Clone, Copy)]
pub struct InlineInput<'i> {
    pub(crate) rest: &'i str,
    pub(crate) pos: usize,
    pub(crate) exhausted: &'i Cell<Option<usize>>,
}

impl<'i> InlineInput<'i> {
    /// The rest of the text from the cursor.
    pub fn rest(&self) -> &'i str {
        self.rest
    }

    /// Record that what this recognizer searches for occurs nowhere from byte `offset` of
    /// [`rest`](Self::rest) to the end of the text.  The note is kept until the text is fully
    /// parsed, separately for each registered recognizer.
    pub fn mark_exhausted(&self, offset: usize) {
        let from = self.pos.saturating_add(offset);
        if self.exhausted.get().map_or(true, |p| from < p) {
            self.exhausted.set(Some(from));
        }
    }

    /// Whether an earlier [`mark_exhausted`](Self::mark_exhausted) covers the cursor.
    pub fn exhausted(&self) -> bool {
        self.exhausted.get().is_some_and(|from| self.pos >= from)
    }
}

/// An inline recognized by an [`InlineParserAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMatch {
    /// The node to insert.
    pub value: NodeValue,

    /// The number of bytes of input consumed.
    pub len: usize,
}

/// Implement this adapter to recognize a custom inline construct.
pub trait InlineParserAdapter: Send + Sync {
    /// The bytes that may begin this construct.  The adapter is only consulted when the
    /// cursor is on one of them.
    fn triggers(&self) -> &[u8];

    /// Inspect the text from the cursor and either describe a match or decline.  A match
    /// consuming zero bytes is ignored.
    fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch>;
}

/// Implement this adapter to take over the HTML rendering of one node type.
pub trait NodeRendererAdapter: Send + Sync {
    /// Called on entering and again on leaving the node.
    fn render(
        &self,
        context: &mut Context<'_>,
        node: &AstNode<'_>,
        entering: bool,
    ) -> io::Result<()>;
}

/// A bundle of adapters that is installed as a unit.
pub trait Extension {
    /// Register this extension's adapters.  They may borrow from `self`.
    fn extend<'p>(&'p self, plugins: &mut Plugins<'p>);
}

//! The document AST.

use crate::arena_tree::Node;
use std::cell::RefCell;

/// The core AST node enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// The root of every document.  Contains **blocks**.
    Document,

    /// **Block**. A paragraph.  Contains **inlines**.
    Paragraph,

    /// **Block**. An ATX heading.  Contains **inlines**.
    ///
    /// ``` md
    /// ## Heading
    /// ```
    Heading(NodeHeading),

    /// **Block**. A fenced code block.  Contains raw text which is not parsed as Markdown,
    /// although is HTML escaped.
    CodeBlock(NodeCodeBlock),

    /// **Block**. A thematic break.  Has no children.
    ThematicBreak,

    /// **Block**. Display math delimited by the configured block delimiters.  The contents are
    /// opaque LaTeX and are never parsed as Markdown.
    ///
    /// ``` md
    /// \[
    /// a^2 + b^2 = c^2
    /// \]
    /// ```
    MathBlock(NodeMathBlock),

    /// **Inline**.  Textual content.  All text in a document will be contained in a `Text`
    /// node.
    Text(String),

    /// **Inline**.  A soft line break.  If the `hardbreaks` option is set in `Options` during
    /// formatting, it will be formatted as a `LineBreak`.
    SoftBreak,

    /// **Inline**.  A hard line break.
    LineBreak,

    /// **Inline**.  A code span.
    Code(NodeCode),

    /// **Inline**.  Emphasised text.
    Emph,

    /// **Inline**.  Strong text.
    Strong,

    /// **Inline**.  Inline math delimited by the configured inline delimiters.
    Math(NodeMath),
}

/// A fieldless mirror of [`NodeValue`], used to key per-node-type renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    CodeBlock,
    ThematicBreak,
    MathBlock,
    Text,
    SoftBreak,
    LineBreak,
    Code,
    Emph,
    Strong,
    Math,
}

/// The metadata of a heading.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHeading {
    /// The level of the heading; from 1 to 6.
    pub level: u8,
}

/// The metadata and data of a fenced code block.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeCodeBlock {
    /// The character used for the fence, `` ` `` or `~`.
    pub fence_char: u8,

    /// The length of the opening fence.
    pub fence_length: usize,

    /// The info string after the opening fence, if any.
    pub info: String,

    /// The literal contents of the code block, each line terminated by `\n`.
    pub literal: String,
}

/// An inline code span.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeCode {
    /// The number of backticks used to open and close the span.
    pub num_backticks: usize,

    /// The content of the inline code span, normalized.
    pub literal: String,
}

/// A block of display math.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeMathBlock {
    /// The source lines between the opening and closing delimiters, without line endings.
    ///
    /// The first entry is whatever followed the opening delimiter on its line, and the last is
    /// whatever preceded the closing delimiter on its line; either may be empty.
    pub lines: Vec<String>,
}

impl NodeMathBlock {
    /// The contents of the block, lines joined with `\n` and no trailing newline.
    pub fn literal(&self) -> String {
        self.lines.join("\n")
    }
}

/// An inline math span.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct NodeMath {
    /// The literal contents of the math span.
    /// As the contents are not interpreted as Markdown at all,
    /// they are contained within this structure,
    /// rather than inserted into a child inline of any kind.
    pub literal: String,
}

impl NodeValue {
    /// Indicates whether this node is a block node or inline node.
    pub fn block(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::Paragraph
                | NodeValue::Heading(..)
                | NodeValue::CodeBlock(..)
                | NodeValue::ThematicBreak
                | NodeValue::MathBlock(..)
        )
    }

    /// Whether the type the node is of can contain inline nodes.
    pub fn contains_inlines(&self) -> bool {
        matches!(*self, NodeValue::Paragraph | NodeValue::Heading(..))
    }

    /// Return a reference to the text of a `Text` inline, if this node is one.
    pub fn text(&self) -> Option<&String> {
        match *self {
            NodeValue::Text(ref t) => Some(t),
            _ => None,
        }
    }

    /// Return a mutable reference to the text of a `Text` inline, if this node is one.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match *self {
            NodeValue::Text(ref mut t) => Some(t),
            _ => None,
        }
    }

    /// The kind of this node, without its data.
    pub fn kind(&self) -> NodeKind {
        match *self {
            NodeValue::Document => NodeKind::Document,
            NodeValue::Paragraph => NodeKind::Paragraph,
            NodeValue::Heading(..) => NodeKind::Heading,
            NodeValue::CodeBlock(..) => NodeKind::CodeBlock,
            NodeValue::ThematicBreak => NodeKind::ThematicBreak,
            NodeValue::MathBlock(..) => NodeKind::MathBlock,
            NodeValue::Text(..) => NodeKind::Text,
            NodeValue::SoftBreak => NodeKind::SoftBreak,
            NodeValue::LineBreak => NodeKind::LineBreak,
            NodeValue::Code(..) => NodeKind::Code,
            NodeValue::Emph => NodeKind::Emph,
            NodeValue::Strong => NodeKind::Strong,
            NodeValue::Math(..) => NodeKind::Math,
        }
    }
}

/// A single node in the AST.
///
/// The struct contains a reference to its parent node, its previous and next siblings, and its
/// first and last children.  The data of the node is behind a `RefCell`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The 1-based line the node starts on.  Inlines carry the line of their containing block.
    pub start_line: usize,

    /// The 1-based line the node ends on.
    pub end_line: usize,

    #[doc(hidden)]
    pub content: String,
}

impl Ast {
    /// Create a new AST node with the given value, spanning the given line.
    pub fn new(value: NodeValue, start_line: usize) -> Self {
        Ast {
            value,
            start_line,
            end_line: start_line,
            content: String::new(),
        }
    }
}

/// The type of a node within the document.
///
/// It is bound by the lifetime `'a`, which corresponds to the `Arena` nodes are allocated in.
/// Child `Ast`s are wrapped in `RefCell` for interior mutability.
pub type AstNode<'a> = Node<'a, RefCell<Ast>>;

impl<'a> From<NodeValue> for AstNode<'a> {
    /// Create a new AST node with the given value, on line zero.
    fn from(value: NodeValue) -> Self {
        Node::new(RefCell::new(Ast::new(value, 0)))
    }
}

impl<'a> AstNode<'a> {
    /// Whether the node may hold a child of the given type.
    pub fn can_contain_type(&self, child: &NodeValue) -> bool {
        if let NodeValue::Document = *child {
            return false;
        }

        match self.data.borrow().value {
            NodeValue::Document => child.block(),
            NodeValue::Paragraph
            | NodeValue::Heading(..)
            | NodeValue::Emph
            | NodeValue::Strong => !child.block(),
            _ => false,
        }
    }
}

mod blocks;
mod inlines;
pub mod options;

use std::cell::{Cell, RefCell};
use std::mem;

use typed_arena::Arena;

use crate::adapters::{
    BlockInput, BlockMatch, BlockParserAdapter, BlockStage, InlineParserAdapter, InlineStage,
};
use crate::arena_tree::Node;
use crate::nodes::{Ast, AstNode, NodeValue};
use crate::strings;

use self::inlines::Subject;
pub use self::options::{Options, Parse, ParsePlugins, Plugins, Render, RenderPlugins};

/// Parse a Markdown document to an AST.
///
/// See the documentation of the crate root for an example.
pub fn parse_document<'a>(
    arena: &'a Arena<AstNode<'a>>,
    md: &str,
    options: &Options,
) -> &'a AstNode<'a> {
    parse_document_with_plugins(arena, md, options, &Plugins::default())
}

/// Parse a Markdown document to an AST, recognizing the syntax of any registered parse
/// plugins as well.
pub fn parse_document_with_plugins<'a>(
    arena: &'a Arena<AstNode<'a>>,
    md: &str,
    options: &Options,
    plugins: &Plugins,
) -> &'a AstNode<'a> {
    let root = arena.alloc(Node::new(RefCell::new(Ast::new(NodeValue::Document, 1))));
    Parser::new(arena, root, options, &plugins.parse).parse(md)
}

/// Order the built-in recognizers and the plugins' by stage.  The sort is stable, so within a
/// stage built-ins stay ahead of plugins and plugins keep their registration order.
fn ordered_block_parsers<'o>(plugins: &'o ParsePlugins<'_>) -> Vec<&'o dyn BlockParserAdapter> {
    let mut parsers: Vec<(BlockStage, &'o dyn BlockParserAdapter)> = vec![
        (BlockStage::Fence, &blocks::CodeFence as &dyn BlockParserAdapter),
        (BlockStage::Leaf, &blocks::AtxHeading),
        (BlockStage::Leaf, &blocks::ThematicBreak),
    ];
    parsers.extend(
        plugins
            .block_parsers
            .iter()
            .map(|(stage, parser)| (*stage, &**parser as &dyn BlockParserAdapter)),
    );
    parsers.sort_by_key(|(stage, _)| *stage);
    parsers.into_iter().map(|(_, parser)| parser).collect()
}

fn ordered_inline_parsers<'o>(
    plugins: &'o ParsePlugins<'_>,
) -> Vec<&'o dyn InlineParserAdapter> {
    let mut parsers: Vec<(InlineStage, &'o dyn InlineParserAdapter)> = vec![
        (InlineStage::Code, &inlines::CodeSpan as &dyn InlineParserAdapter),
        (InlineStage::Escape, &inlines::BackslashEscape),
    ];
    parsers.extend(
        plugins
            .inline_parsers
            .iter()
            .map(|(stage, parser)| (*stage, &**parser as &dyn InlineParserAdapter)),
    );
    parsers.sort_by_key(|(stage, _)| *stage);
    parsers.into_iter().map(|(_, parser)| parser).collect()
}

pub struct Parser<'a, 'o> {
    arena: &'a Arena<AstNode<'a>>,
    options: &'o Options,
    block_parsers: Vec<&'o dyn BlockParserAdapter>,
    block_exhausted: Vec<Cell<Option<usize>>>,
    inline_parsers: Vec<&'o dyn InlineParserAdapter>,
    root: &'a AstNode<'a>,
    paragraph: Option<&'a AstNode<'a>>,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn new(
        arena: &'a Arena<AstNode<'a>>,
        root: &'a AstNode<'a>,
        options: &'o Options,
        plugins: &'o ParsePlugins<'_>,
    ) -> Self {
        let block_parsers = ordered_block_parsers(plugins);
        Parser {
            arena,
            options,
            block_exhausted: vec![Cell::new(None); block_parsers.len()],
            block_parsers,
            inline_parsers: ordered_inline_parsers(plugins),
            root,
            paragraph: None,
        }
    }

    fn parse(mut self, s: &str) -> &'a AstNode<'a> {
        let lines = strings::split_lines(s);

        let mut line = 0;
        while line < lines.len() {
            let text = lines[line];
            if strings::is_blank(text) {
                self.paragraph = None;
                line += 1;
                continue;
            }

            match self.open_block(&lines, line) {
                Some((m, end_line)) => {
                    self.paragraph = None;
                    self.add_block(m, line + 1, end_line + 1);
                    line = end_line + 1;
                }
                None => {
                    self.add_paragraph_line(text, line + 1);
                    line += 1;
                }
            }
        }

        self.paragraph = None;
        self.process_inlines();
        self.root
    }

    /// Offer the line to each recognizer in order.  Returns the first match that ends within
    /// the document, with its absolute end line.
    fn open_block(&self, lines: &[&str], line: usize) -> Option<(BlockMatch, usize)> {
        for (parser, exhausted) in self.block_parsers.iter().zip(&self.block_exhausted) {
            let input = BlockInput {
                lines,
                line,
                exhausted,
            };
            let Some(m) = parser.open(&input) else {
                continue;
            };

            match line.checked_add(m.end_line) {
                Some(end_line) if end_line < lines.len() => return Some((m, end_line)),
                _ => log::debug!(
                    "ignoring block match past the end of the document at line {}",
                    line + 1
                ),
            }
        }
        None
    }

    fn add_block(&mut self, m: BlockMatch, start_line: usize, end_line: usize) {
        let BlockMatch {
            mut value, content, ..
        } = m;

        if let NodeValue::CodeBlock(ref mut ncb) = value {
            if ncb.info.is_empty() {
                if let Some(info) = &self.options.parse.default_info_string {
                    ncb.info = info.clone();
                }
            }
        }

        let node = self.add_child(value, start_line);
        let mut ast = node.data.borrow_mut();
        ast.end_line = end_line;
        ast.content = content;
    }

    fn add_paragraph_line(&mut self, text: &str, line: usize) {
        let text = text.trim_start_matches(|c| c == ' ' || c == '\t');
        let paragraph = match self.paragraph {
            Some(paragraph) => paragraph,
            None => {
                let paragraph = self.add_child(NodeValue::Paragraph, line);
                self.paragraph = Some(paragraph);
                paragraph
            }
        };

        let mut ast = paragraph.data.borrow_mut();
        if !ast.content.is_empty() {
            ast.content.push('\n');
        }
        ast.content.push_str(text);
        ast.end_line = line;
    }

    fn add_child(&mut self, value: NodeValue, start_line: usize) -> &'a AstNode<'a> {
        debug_assert!(self.root.can_contain_type(&value));
        let node = self
            .arena
            .alloc(Node::new(RefCell::new(Ast::new(value, start_line))));
        self.root.append(node);
        node
    }

    fn process_inlines(&self) {
        for node in self.root.descendants() {
            if node.data.borrow().value.contains_inlines() {
                self.parse_inlines(node);
            }
        }
    }

    fn parse_inlines(&self, node: &'a AstNode<'a>) {
        let (mut content, line) = {
            let mut ast = node.data.borrow_mut();
            (mem::take(&mut ast.content), ast.start_line)
        };
        strings::rtrim(&mut content);

        let mut subj = Subject::new(self.arena, &self.inline_parsers, &content, line);
        subj.parse_inlines(node);
    }
}

use std::io::{self, Write};

use crate::adapters::NodeRendererAdapter;
use crate::html::Context;
use crate::nodes::{AstNode, NodeValue};

/// Writes block math between its render delimiters, on a line of its own:
///
/// ```html
/// <p><span class="math display">\[...\]</span></p>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MathBlockRenderer<'c> {
    start: &'c str,
    end: &'c str,
}

impl<'c> MathBlockRenderer<'c> {
    /// A renderer writing `start` and `end` around the contents.
    pub fn new(start: &'c str, end: &'c str) -> Self {
        MathBlockRenderer { start, end }
    }
}

impl NodeRendererAdapter for MathBlockRenderer<'_> {
    fn render(
        &self,
        context: &mut Context<'_>,
        node: &AstNode<'_>,
        entering: bool,
    ) -> io::Result<()> {
        if !entering {
            return Ok(());
        }
        let ast = node.data.borrow();
        let NodeValue::MathBlock(ref nmb) = ast.value else {
            return Ok(());
        };

        context.cr()?;
        context.write_all(b"<p><span class=\"math display\">")?;
        context.write_all(self.start.as_bytes())?;
        for (i, line) in nmb.lines.iter().enumerate() {
            if i > 0 {
                context.write_all(b"\n")?;
            }
            context.write_all(line.as_bytes())?;
        }
        context.write_all(self.end.as_bytes())?;
        context.write_all(b"</span></p>\n")
    }
}

/// Writes inline math between its render delimiters:
///
/// ```html
/// <span class="math inline">\(...\)</span>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InlineMathRenderer<'c> {
    start: &'c str,
    end: &'c str,
}

impl<'c> InlineMathRenderer<'c> {
    /// A renderer writing `start` and `end` around the contents.
    pub fn new(start: &'c str, end: &'c str) -> Self {
        InlineMathRenderer { start, end }
    }
}

impl NodeRendererAdapter for InlineMathRenderer<'_> {
    fn render(
        &self,
        context: &mut Context<'_>,
        node: &AstNode<'_>,
        entering: bool,
    ) -> io::Result<()> {
        if !entering {
            return Ok(());
        }
        let ast = node.data.borrow();
        let NodeValue::Math(ref nm) = ast.value else {
            return Ok(());
        };

        context.write_all(b"<span class=\"math inline\">")?;
        context.write_all(self.start.as_bytes())?;
        context.write_all(nm.literal.as_bytes())?;
        context.write_all(self.end.as_bytes())?;
        context.write_all(b"</span>")
    }
}

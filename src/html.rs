//! The HTML renderer for the AST.

mod context;

use std::io::{self, Write};

use crate::arena_tree::NodeEdge;
use crate::nodes::{AstNode, NodeValue};
use crate::{Options, Plugins};

pub use self::context::Context;

/// Formats an AST as HTML, modified by the given options.
pub fn format_document<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
) -> io::Result<()> {
    format_document_with_plugins(root, options, output, &Plugins::default())
}

/// Formats an AST as HTML, modified by the given options.  Nodes with a renderer registered in
/// `plugins` are handed to it instead of the built-in formatting.
pub fn format_document_with_plugins<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
    output: &mut dyn Write,
    plugins: &Plugins,
) -> io::Result<()> {
    let mut context = Context::new(output, options);

    for edge in root.traverse() {
        let (node, entering) = match edge {
            NodeEdge::Start(node) => (node, true),
            NodeEdge::End(node) => (node, false),
        };

        let kind = node.data.borrow().value.kind();
        match plugins.render.node_renderer(kind) {
            Some(renderer) => renderer.render(&mut context, node, entering)?,
            None => format_node(&mut context, node, entering)?,
        }
    }

    context.flush()
}

fn format_node<'a>(
    context: &mut Context<'_>,
    node: &'a AstNode<'a>,
    entering: bool,
) -> io::Result<()> {
    match node.data.borrow().value {
        NodeValue::Document => (),
        NodeValue::Paragraph => {
            if entering {
                context.cr()?;
                context.write_all(b"<p>")?;
            } else {
                context.write_all(b"</p>\n")?;
            }
        }
        NodeValue::Heading(ref nh) => {
            if entering {
                context.cr()?;
                write!(context, "<h{}>", nh.level)?;
            } else {
                writeln!(context, "</h{}>", nh.level)?;
            }
        }
        NodeValue::CodeBlock(ref ncb) => {
            if entering {
                context.cr()?;
                context.write_all(b"<pre><code")?;
                if let Some(lang) = ncb.info.split_whitespace().next() {
                    context.write_all(b" class=\"language-")?;
                    context.escape(lang.as_bytes())?;
                    context.write_all(b"\"")?;
                }
                context.write_all(b">")?;
                context.escape(ncb.literal.as_bytes())?;
                context.write_all(b"</code></pre>\n")?;
            }
        }
        NodeValue::ThematicBreak => {
            if entering {
                context.cr()?;
                context.write_all(b"<hr />\n")?;
            }
        }
        NodeValue::MathBlock(ref nmb) => {
            // Without a renderer the contents are ordinary text.
            if entering {
                context.cr()?;
                context.write_all(b"<p>")?;
                context.escape(nmb.literal().as_bytes())?;
                context.write_all(b"</p>\n")?;
            }
        }
        NodeValue::Text(ref literal) => {
            if entering {
                context.escape(literal.as_bytes())?;
            }
        }
        NodeValue::SoftBreak => {
            if entering {
                if context.options.render.hardbreaks {
                    context.write_all(b"<br />\n")?;
                } else {
                    context.write_all(b"\n")?;
                }
            }
        }
        NodeValue::LineBreak => {
            if entering {
                context.write_all(b"<br />\n")?;
            }
        }
        NodeValue::Code(ref nc) => {
            if entering {
                context.write_all(b"<code>")?;
                context.escape(nc.literal.as_bytes())?;
                context.write_all(b"</code>")?;
            }
        }
        NodeValue::Emph => {
            if entering {
                context.write_all(b"<em>")?;
            } else {
                context.write_all(b"</em>")?;
            }
        }
        NodeValue::Strong => {
            if entering {
                context.write_all(b"<strong>")?;
            } else {
                context.write_all(b"</strong>")?;
            }
        }
        NodeValue::Math(ref nm) => {
            if entering {
                context.escape(nm.literal.as_bytes())?;
            }
        }
    }
    Ok(())
}

const HTML_UNSAFE: [bool; 256] = {
    let mut a = [false; 256];
    a[b'"' as usize] = true;
    a[b'&' as usize] = true;
    a[b'<' as usize] = true;
    a[b'>' as usize] = true;
    a
};

/// Writes buffer to output, escaping anything that could be interpreted as an HTML tag.
///
/// Namely:
///
/// * U+0022 QUOTATION MARK " is rendered as &quot;
/// * U+0026 AMPERSAND & is rendered as &amp;
/// * U+003C LESS-THAN SIGN < is rendered as &lt;
/// * U+003E GREATER-THAN SIGN > is rendered as &gt;
/// * Everything else is passed through unchanged.
pub fn escape(output: &mut dyn Write, buffer: &[u8]) -> io::Result<()> {
    let mut offset = 0;
    for (i, &byte) in buffer.iter().enumerate() {
        if HTML_UNSAFE[byte as usize] {
            let esc: &[u8] = match byte {
                b'"' => b"&quot;",
                b'&' => b"&amp;",
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                _ => unreachable!(),
            };
            output.write_all(&buffer[offset..i])?;
            output.write_all(esc)?;
            offset = i + 1;
        }
    }
    output.write_all(&buffer[offset..])?;
    Ok(())
}

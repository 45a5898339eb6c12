//! A small CommonMark-flavoured Markdown parser that passes MathJax math through to its HTML
//! output untouched.
//!
//! Math between MathJax delimiters (`\(...\)` inline, `\[...\]` as a block, both configurable)
//! is never read as Markdown: it is kept verbatim in the tree and written back out between
//! delimiters, for a MathJax script in the browser to typeset.  The math support is an
//! [`Extension`](adapters::Extension) like any other, installed into [`Plugins`]:
//!
//! ```
//! use mdjax::{markdown_to_html_with_plugins, mathjax::MathJax, Options, Plugins};
//!
//! let mathjax = MathJax::default();
//! let mut plugins = Plugins::default();
//! plugins.extend(&mathjax);
//!
//! assert_eq!(
//!     markdown_to_html_with_plugins("*Area* is \\(\\pi r^2\\).\n", &Options::default(), &plugins),
//!     "<p><em>Area</em> is <span class=\"math inline\">\\(\\pi r^2\\)</span>.</p>\n"
//! );
//! ```
//!
//! You can also work with the AST directly:
//!
//! ```
//! use mdjax::nodes::NodeValue;
//! use mdjax::{format_html_with_plugins, mathjax::MathJax, parse_document_with_plugins, Arena, Options, Plugins};
//!
//! let arena = Arena::new();
//! let options = Options::default();
//! let mathjax = MathJax::default();
//! let mut plugins = Plugins::default();
//! plugins.extend(&mathjax);
//!
//! let root = parse_document_with_plugins(&arena, "\\[\nx = 1\n\\]\n", &options, &plugins);
//!
//! for node in root.descendants() {
//!     if let NodeValue::MathBlock(ref mut math) = node.data.borrow_mut().value {
//!         math.lines[1] = "x = 2".to_string();
//!     }
//! }
//!
//! let mut html = vec![];
//! format_html_with_plugins(root, &options, &mut html, &plugins).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(html).unwrap(),
//!     "<p><span class=\"math display\">\\[\nx = 2\n\\]</span></p>\n"
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![allow(clippy::new_without_default, clippy::type_complexity)]

pub mod adapters;
pub mod arena_tree;
mod ctype;
pub mod html;
pub mod mathjax;
pub mod nodes;
mod parser;
mod scanners;
mod strings;
#[cfg(test)]
mod tests;

pub use html::format_document as format_html;
pub use html::format_document_with_plugins as format_html_with_plugins;
pub use parser::{
    parse_document, parse_document_with_plugins, Options, Parse, ParsePlugins, Plugins, Render,
    RenderPlugins,
};
pub use typed_arena::Arena;

/// Render Markdown to HTML.
///
/// See the documentation of the crate root for an example.
pub fn markdown_to_html(md: &str, options: &Options) -> String {
    markdown_to_html_with_plugins(md, options, &Plugins::default())
}

/// Render Markdown to HTML using plugins.
///
/// See the documentation of the crate root for an example.
pub fn markdown_to_html_with_plugins(md: &str, options: &Options, plugins: &Plugins) -> String {
    let arena = Arena::new();
    let root = parse_document_with_plugins(&arena, md, options, plugins);
    let mut bw = Vec::new();
    format_html_with_plugins(root, options, &mut bw, plugins).unwrap();
    String::from_utf8(bw).unwrap()
}

//! Configuration for the parser and renderer, and the plugin registry.

#[cfg(feature = "bon")]
use bon::Builder;
use rustc_hash::FxHashMap;
use std::fmt::{self, Debug, Formatter};

use crate::adapters::{
    BlockParserAdapter, BlockStage, Extension, InlineParserAdapter, InlineStage,
    NodeRendererAdapter,
};
use crate::nodes::NodeKind;

#[derive(Default, Debug, Clone)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Umbrella options struct.
pub struct Options {
    /// Configure parse-time options.
    #[cfg_attr(feature = "bon", builder(default))]
    pub parse: Parse,

    /// Configure render-time options.
    #[cfg_attr(feature = "bon", builder(default))]
    pub render: Render,
}

#[derive(Default, Clone, Debug)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Options for parser functions.
pub struct Parse {
    /// The default info string for fenced code blocks.
    ///
    /// ```rust
    /// # use mdjax::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// assert_eq!(markdown_to_html("```\nfn hello();\n```\n", &options),
    ///            "<pre><code>fn hello();\n</code></pre>\n");
    ///
    /// options.parse.default_info_string = Some("rust".into());
    /// assert_eq!(markdown_to_html("```\nfn hello();\n```\n", &options),
    ///            "<pre><code class=\"language-rust\">fn hello();\n</code></pre>\n");
    /// ```
    pub default_info_string: Option<String>,
}

#[derive(Default, Debug, Clone, Copy)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
/// Options for formatter functions.
pub struct Render {
    /// Soft line breaks in the input translate into hard line breaks in the output.
    ///
    /// ```rust
    /// # use mdjax::{markdown_to_html, Options};
    /// let mut options = Options::default();
    /// assert_eq!(markdown_to_html("Hello.\nWorld.\n", &options),
    ///            "<p>Hello.\nWorld.</p>\n");
    ///
    /// options.render.hardbreaks = true;
    /// assert_eq!(markdown_to_html("Hello.\nWorld.\n", &options),
    ///            "<p>Hello.<br />\nWorld.</p>\n");
    /// ```
    #[cfg_attr(feature = "bon", builder(default))]
    pub hardbreaks: bool,
}

#[derive(Default, Debug)]
/// Umbrella plugins struct.
pub struct Plugins<'p> {
    /// Configure parse-time plugins.
    pub parse: ParsePlugins<'p>,

    /// Configure render-time plugins.
    pub render: RenderPlugins<'p>,
}

impl<'p> Plugins<'p> {
    /// Install every adapter of `extension`.
    ///
    /// ```rust
    /// # use mdjax::{markdown_to_html_with_plugins, mathjax::MathJax, Options, Plugins};
    /// let mathjax = MathJax::default();
    /// let mut plugins = Plugins::default();
    /// plugins.extend(&mathjax);
    ///
    /// assert_eq!(markdown_to_html_with_plugins("\\(x\\)\n", &Options::default(), &plugins),
    ///            "<p><span class=\"math inline\">\\(x\\)</span></p>\n");
    /// ```
    pub fn extend<E: Extension + ?Sized>(&mut self, extension: &'p E) {
        extension.extend(self);
    }
}

#[derive(Default)]
/// Plugins for recognizing additional syntax.
pub struct ParsePlugins<'p> {
    pub(crate) block_parsers: Vec<(BlockStage, Box<dyn BlockParserAdapter + 'p>)>,
    pub(crate) inline_parsers: Vec<(InlineStage, Box<dyn InlineParserAdapter + 'p>)>,
}

impl<'p> ParsePlugins<'p> {
    /// Add a block recognizer at the given stage, after any already registered there.
    pub fn add_block_parser<P>(&mut self, stage: BlockStage, parser: P)
    where
        P: BlockParserAdapter + 'p,
    {
        log::trace!("registering block parser at {:?}", stage);
        self.block_parsers.push((stage, Box::new(parser)));
    }

    /// Add an inline recognizer at the given stage, after any already registered there.
    pub fn add_inline_parser<P>(&mut self, stage: InlineStage, parser: P)
    where
        P: InlineParserAdapter + 'p,
    {
        log::trace!("registering inline parser at {:?}", stage);
        self.inline_parsers.push((stage, Box::new(parser)));
    }
}

impl Debug for ParsePlugins<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsePlugins")
            .field(
                "block_parsers",
                &self.block_parsers.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            )
            .field(
                "inline_parsers",
                &self.inline_parsers.iter().map(|(s, _)| s).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Default)]
/// Plugins for alternative rendering, keyed by node type.
pub struct RenderPlugins<'p> {
    node_renderers: FxHashMap<NodeKind, Box<dyn NodeRendererAdapter + 'p>>,
}

impl<'p> RenderPlugins<'p> {
    /// Render every node of type `kind` with `renderer`, replacing any earlier one.
    pub fn set_node_renderer<R>(&mut self, kind: NodeKind, renderer: R)
    where
        R: NodeRendererAdapter + 'p,
    {
        log::trace!("registering renderer for {:?}", kind);
        self.node_renderers.insert(kind, Box::new(renderer));
    }

    /// The renderer registered for `kind`, if any.
    pub fn node_renderer(&self, kind: NodeKind) -> Option<&dyn NodeRendererAdapter> {
        self.node_renderers
            .get(&kind)
            .map(|r| &**r as &dyn NodeRendererAdapter)
    }
}

impl Debug for RenderPlugins<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderPlugins")
            .field(
                "node_renderers",
                &self.node_renderers.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

//! MathJax delimiter passthrough.
//!
//! Recognizes math written between MathJax delimiters, `\(x\)` inline and `\[x\]` as a block by
//! default, and writes it back out untouched inside `<span class="math ...">` wrappers so a
//! MathJax script in the browser can typeset it.  The contents are never interpreted as
//! Markdown, validated or escaped.
//!
//! ```rust
//! # use mdjax::{markdown_to_html_with_plugins, mathjax::MathJax, Options, Plugins};
//! let mathjax = MathJax::default();
//! let mut plugins = Plugins::default();
//! plugins.extend(&mathjax);
//!
//! assert_eq!(
//!     markdown_to_html_with_plugins("Euler: \\(e^{i\\pi} + 1 = 0\\)\n\n\\[\nx^2\n\\]\n", &Options::default(), &plugins),
//!     "<p>Euler: <span class=\"math inline\">\\(e^{i\\pi} + 1 = 0\\)</span></p>\n\
//!      <p><span class=\"math display\">\\[\nx^2\n\\]</span></p>\n"
//! );
//! ```

mod block;
mod inline;
mod render;

#[cfg(feature = "bon")]
use bon::Builder;

use crate::adapters::{BlockStage, Extension, InlineStage};
use crate::nodes::NodeKind;
use crate::parser::Plugins;

pub use self::block::BlockMathParser;
pub use self::inline::{InlineMathParser, LiteralDelimiter};
pub use self::render::{InlineMathRenderer, MathBlockRenderer};

/// The default start of inline math.
pub const DEFAULT_INLINE_START: &str = "\\(";
/// The default end of inline math.
pub const DEFAULT_INLINE_END: &str = "\\)";
/// The default start of block math.
pub const DEFAULT_BLOCK_START: &str = "\\[";
/// The default end of block math.
pub const DEFAULT_BLOCK_END: &str = "\\]";

/// A pair of start and end delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Delimiters {
    /// Opens the math region.
    pub start: String,

    /// Closes the math region.
    pub end: String,
}

impl Delimiters {
    /// A pair of delimiters.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Delimiters {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Delimiter configuration for [`MathJax`].
///
/// ```rust
/// # use mdjax::{markdown_to_html_with_plugins, mathjax::{MathJax, MathJaxOptions}, Options, Plugins};
/// let mathjax = MathJax::new(
///     MathJaxOptions::default()
///         .with_inline_delims("$", "$")
///         .with_block_delims("$$", "$$"),
/// );
/// let mut plugins = Plugins::default();
/// plugins.extend(&mathjax);
///
/// assert_eq!(
///     markdown_to_html_with_plugins("$x$\n", &Options::default(), &plugins),
///     "<p><span class=\"math inline\">$x$</span></p>\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "bon", derive(Builder))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct MathJaxOptions {
    /// Opens inline math.  An empty string means the default, `\(`.
    #[cfg_attr(feature = "bon", builder(into, default = DEFAULT_INLINE_START.to_string()))]
    pub inline_start: String,

    /// Closes inline math.  An empty string means the default, `\)`.
    #[cfg_attr(feature = "bon", builder(into, default = DEFAULT_INLINE_END.to_string()))]
    pub inline_end: String,

    /// Don't recognize inline math at all.  Inline delimiters are left to the rest of the
    /// parser, so the default `\(` is read as an escaped `(`.
    #[cfg_attr(feature = "bon", builder(default))]
    pub disable_inline_math: bool,

    /// Opens block math.  Used as given: an empty string turns block math off.
    #[cfg_attr(feature = "bon", builder(into, default = DEFAULT_BLOCK_START.to_string()))]
    pub block_start: String,

    /// Closes block math.  Used as given.
    #[cfg_attr(feature = "bon", builder(into, default = DEFAULT_BLOCK_END.to_string()))]
    pub block_end: String,

    /// Delimiters to write around inline math, if not the ones it was parsed with.
    ///
    /// ```rust
    /// # use mdjax::{markdown_to_html_with_plugins, mathjax::{MathJax, MathJaxOptions}, Options, Plugins};
    /// let mathjax = MathJax::new(MathJaxOptions::default().with_render_inline_delims("$", "$"));
    /// let mut plugins = Plugins::default();
    /// plugins.extend(&mathjax);
    ///
    /// assert_eq!(
    ///     markdown_to_html_with_plugins("\\(x\\)\n", &Options::default(), &plugins),
    ///     "<p><span class=\"math inline\">$x$</span></p>\n"
    /// );
    /// ```
    pub render_inline: Option<Delimiters>,

    /// Delimiters to write around block math, if not the ones it was parsed with.
    pub render_block: Option<Delimiters>,
}

impl Default for MathJaxOptions {
    fn default() -> Self {
        MathJaxOptions {
            inline_start: DEFAULT_INLINE_START.to_string(),
            inline_end: DEFAULT_INLINE_END.to_string(),
            disable_inline_math: false,
            block_start: DEFAULT_BLOCK_START.to_string(),
            block_end: DEFAULT_BLOCK_END.to_string(),
            render_inline: None,
            render_block: None,
        }
    }
}

impl MathJaxOptions {
    /// Use `start` and `end` for inline math, and turn inline math on.  Empty strings keep the
    /// defaults.
    pub fn with_inline_delims(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.inline_start = start.into();
        self.inline_end = end.into();
        self.disable_inline_math = false;
        self.normalized()
    }

    /// Turn inline math off.
    pub fn with_inline_math_disabled(mut self) -> Self {
        self.disable_inline_math = true;
        self
    }

    /// Use `start` and `end` for block math, exactly as given.
    pub fn with_block_delims(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.block_start = start.into();
        self.block_end = end.into();
        self
    }

    /// Write inline math between `start` and `end` instead of its parse delimiters.
    pub fn with_render_inline_delims(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.render_inline = Some(Delimiters::new(start, end));
        self
    }

    /// Write block math between `start` and `end` instead of its parse delimiters.
    pub fn with_render_block_delims(
        mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.render_block = Some(Delimiters::new(start, end));
        self
    }

    fn normalized(mut self) -> Self {
        if self.inline_start.is_empty() {
            self.inline_start = DEFAULT_INLINE_START.to_string();
        }
        if self.inline_end.is_empty() {
            self.inline_end = DEFAULT_INLINE_END.to_string();
        }
        self
    }

    fn inline_render_delimiters(&self) -> (&str, &str) {
        match self.render_inline {
            Some(ref d) => (d.start.as_str(), d.end.as_str()),
            None => (self.inline_start.as_str(), self.inline_end.as_str()),
        }
    }

    fn block_render_delimiters(&self) -> (&str, &str) {
        match self.render_block {
            Some(ref d) => (d.start.as_str(), d.end.as_str()),
            None => (self.block_start.as_str(), self.block_end.as_str()),
        }
    }
}

/// The MathJax extension.  Install it with [`Plugins::extend`].
#[derive(Debug, Clone, Default)]
pub struct MathJax {
    options: MathJaxOptions,
}

impl MathJax {
    /// An extension recognizing the delimiters in `options`.
    pub fn new(options: MathJaxOptions) -> Self {
        MathJax {
            options: options.normalized(),
        }
    }

    /// The configuration in use, with empty inline delimiters replaced by the defaults.
    pub fn options(&self) -> &MathJaxOptions {
        &self.options
    }
}

impl Extension for MathJax {
    fn extend<'p>(&'p self, plugins: &mut Plugins<'p>) {
        let options = &self.options;
        log::debug!(
            "mathjax: block {:?} {:?}, inline {:?} {:?}{}",
            options.block_start,
            options.block_end,
            options.inline_start,
            options.inline_end,
            if options.disable_inline_math {
                " (disabled)"
            } else {
                ""
            }
        );

        plugins.parse.add_block_parser(
            BlockStage::Fence,
            BlockMathParser::new(&options.block_start, &options.block_end),
        );
        if !options.disable_inline_math {
            plugins.parse.add_inline_parser(
                InlineStage::Span,
                InlineMathParser::new(&options.inline_start, &options.inline_end),
            );
        }
        // Block delimiters left in running text stay as written.
        if !options.block_start.is_empty() {
            plugins
                .parse
                .add_inline_parser(InlineStage::Span, LiteralDelimiter::new(&options.block_start));
            if !options.block_end.is_empty() && options.block_end != options.block_start {
                plugins
                    .parse
                    .add_inline_parser(InlineStage::Span, LiteralDelimiter::new(&options.block_end));
            }
        }

        let (start, end) = options.block_render_delimiters();
        plugins
            .render
            .set_node_renderer(NodeKind::MathBlock, MathBlockRenderer::new(start, end));
        if !options.disable_inline_math {
            let (start, end) = options.inline_render_delimiters();
            plugins
                .render
                .set_node_renderer(NodeKind::Math, InlineMathRenderer::new(start, end));
        }
    }
}

use std::io::{self, Write};

use crate::adapters::{
    BlockInput, BlockMatch, BlockParserAdapter, BlockStage, Extension, InlineInput, InlineMatch,
    InlineParserAdapter, InlineStage, NodeRendererAdapter,
};
use crate::html::Context;
use crate::mathjax::{
    BlockMathParser, Delimiters, InlineMathParser, InlineMathRenderer, LiteralDelimiter,
    MathBlockRenderer,
};
use crate::nodes::{self, NodeKind};

use super::*;

#[test]
fn exercise_full_api() {
    let arena = Arena::new();
    let default_options = Options::default();
    let default_plugins = Plugins::default();
    let node = parse_document(&arena, "# My document\n", &default_options);
    let mut buffer = vec![];

    // Use every member of the exposed API without any defaults.
    // Not looking for specific outputs, just want to know if the API changes shape.

    let _: std::io::Result<()> = format_html(node, &default_options, &mut buffer);

    let _: std::io::Result<()> =
        format_html_with_plugins(node, &default_options, &mut buffer, &default_plugins);

    let _: std::io::Result<()> = html::escape(&mut buffer, b"<>");

    let _: &AstNode = parse_document(&arena, "document", &default_options);

    let _: &AstNode =
        parse_document_with_plugins(&arena, "document", &default_options, &default_plugins);

    let _: String = markdown_to_html("# Yes", &default_options);

    let _: String = markdown_to_html_with_plugins("# Yes", &default_options, &default_plugins);

    let parse = Parse {
        default_info_string: Some("abc".to_string()),
    };
    let render = Render { hardbreaks: false };
    let _ = Options { parse, render };

    let mathjax_options = MathJaxOptions {
        inline_start: "\\(".to_string(),
        inline_end: "\\)".to_string(),
        disable_inline_math: false,
        block_start: "\\[".to_string(),
        block_end: "\\]".to_string(),
        render_inline: Some(Delimiters::new("$", "$")),
        render_block: Some(Delimiters {
            start: "$$".to_string(),
            end: "$$".to_string(),
        }),
    };
    let _: MathJaxOptions = MathJaxOptions::default()
        .with_inline_delims("$", "$")
        .with_inline_math_disabled()
        .with_block_delims("$$", "$$")
        .with_render_inline_delims("\\(", "\\)")
        .with_render_block_delims("\\[", "\\]");
    let mathjax = MathJax::new(mathjax_options);
    let _: &MathJaxOptions = mathjax.options();

    let mut plugins = Plugins::default();
    plugins.extend(&mathjax);
    let _: () = mathjax.extend(&mut plugins);

    plugins
        .parse
        .add_block_parser(BlockStage::Fence, BlockMathParser::new("$$", "$$"));
    plugins
        .parse
        .add_block_parser(BlockStage::Leaf, BlockMathParser::new("\\[", "\\]"));
    plugins
        .parse
        .add_inline_parser(InlineStage::Code, InlineMathParser::new("$", "$"));
    plugins
        .parse
        .add_inline_parser(InlineStage::Span, LiteralDelimiter::new("$$"));
    plugins
        .parse
        .add_inline_parser(InlineStage::Escape, LiteralDelimiter::new("\\]"));
    plugins
        .render
        .set_node_renderer(NodeKind::MathBlock, MathBlockRenderer::new("$$", "$$"));
    plugins
        .render
        .set_node_renderer(NodeKind::Math, InlineMathRenderer::new("$", "$"));
    let _: Option<&dyn NodeRendererAdapter> = plugins.render.node_renderer(NodeKind::Text);

    pub struct MockAdapter {}

    impl BlockParserAdapter for MockAdapter {
        fn open(&self, input: &BlockInput<'_>) -> Option<BlockMatch> {
            let _: Option<&str> = input.line(0);
            let _: usize = input.remaining_lines();
            let _: bool = input.exhausted();
            input.mark_exhausted(1);
            None
        }
    }

    impl InlineParserAdapter for MockAdapter {
        fn triggers(&self) -> &[u8] {
            b""
        }

        fn parse(&self, input: &InlineInput<'_>) -> Option<InlineMatch> {
            let _: &str = input.rest();
            let _: bool = input.exhausted();
            input.mark_exhausted(0);
            None
        }
    }

    impl NodeRendererAdapter for MockAdapter {
        fn render(
            &self,
            context: &mut Context<'_>,
            _node: &AstNode<'_>,
            _entering: bool,
        ) -> io::Result<()> {
            let _: &Options = context.options;
            context.cr()?;
            context.escape(b"&")?;
            context.write_all(b"")
        }
    }

    let mock_adapter = MockAdapter {};
    plugins
        .parse
        .add_block_parser(BlockStage::Leaf, MockAdapter {});
    plugins
        .parse
        .add_inline_parser(InlineStage::Span, MockAdapter {});
    plugins
        .render
        .set_node_renderer(NodeKind::Heading, mock_adapter);

    let _: String = markdown_to_html_with_plugins("# Yes", &default_options, &plugins);

    let _: BlockMatch = BlockMatch::new(nodes::NodeValue::ThematicBreak, 0);
    let _: InlineMatch = InlineMatch {
        value: nodes::NodeValue::LineBreak,
        len: 1,
    };

    //

    let ast = node.data.borrow();
    let _: usize = ast.start_line;
    let _: usize = ast.end_line;
    let _: NodeKind = ast.value.kind();
    let _: bool = ast.value.block();
    let _: bool = ast.value.contains_inlines();
    let _: Option<&String> = ast.value.text();
    match &ast.value {
        nodes::NodeValue::Document => {}
        nodes::NodeValue::Paragraph => {}
        nodes::NodeValue::Heading(nh) => {
            let _: u8 = nh.level;
        }
        nodes::NodeValue::CodeBlock(ncb) => {
            let _: u8 = ncb.fence_char;
            let _: usize = ncb.fence_length;
            let _: &String = &ncb.info;
            let _: &String = &ncb.literal;
        }
        nodes::NodeValue::ThematicBreak => {}
        nodes::NodeValue::MathBlock(nmb) => {
            let _: &Vec<String> = &nmb.lines;
            let _: String = nmb.literal();
        }
        nodes::NodeValue::Text(text) => {
            let _: &String = text;
        }
        nodes::NodeValue::SoftBreak => {}
        nodes::NodeValue::LineBreak => {}
        nodes::NodeValue::Code(nc) => {
            let _: usize = nc.num_backticks;
            let _: &String = &nc.literal;
        }
        nodes::NodeValue::Emph => {}
        nodes::NodeValue::Strong => {}
        nodes::NodeValue::Math(nm) => {
            let _: &String = &nm.literal;
        }
    }
}

#[cfg(feature = "bon")]
#[test]
fn exercise_builders() {
    let options = Options::builder()
        .parse(
            Parse::builder()
                .default_info_string("rust".to_string())
                .build(),
        )
        .render(Render::builder().hardbreaks(true).build())
        .build();

    let mathjax = MathJax::new(
        MathJaxOptions::builder()
            .inline_start("$")
            .inline_end("$")
            .block_start("$$")
            .block_end("$$")
            .disable_inline_math(false)
            .render_inline(Delimiters::new("\\(", "\\)"))
            .build(),
    );
    let mut plugins = Plugins::default();
    plugins.extend(&mathjax);

    html_opts_w(
        "$x$\na\n",
        "<p><span class=\"math inline\">\\(x\\)</span><br />\na</p>\n",
        &options,
        &plugins,
    );
}

#[test]
fn context_debug() {
    let options = Options::default();
    let mut out = vec![];
    let context = Context::new(&mut out, &options);
    assert_eq!(format!("{:?}", context), "<mdjax::html::Context>");
}

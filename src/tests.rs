use crate::mathjax::{MathJax, MathJaxOptions};
use crate::nodes::{AstNode, NodeValue};
use crate::*;

mod api;

#[track_caller]
fn compare_strs(output: &str, expected: &str, kind: &str, original_input: &str) {
    if output != expected {
        println!("Running {} test", kind);
        println!("Got:");
        println!("==============================");
        println!("{}", output);
        println!("==============================");
        println!();
        println!("Expected:");
        println!("==============================");
        println!("{}", expected);
        println!("==============================");
        println!();
        println!("Original input:");
        println!("==============================");
        println!("{}", original_input);
        println!("==============================");
        println!();
    }

    pretty_assertions::assert_eq!(output, expected);
}

#[track_caller]
fn html(input: &str, expected: &str) {
    html_opts_i(input, expected, &Options::default());
}

#[track_caller]
fn html_opts_i(input: &str, expected: &str, options: &Options) {
    html_opts_w(input, expected, options, &Plugins::default());
}

#[track_caller]
fn html_opts_w(input: &str, expected: &str, options: &Options, plugins: &Plugins) {
    let arena = Arena::new();
    let root = parse_document_with_plugins(&arena, input, options, plugins);
    let mut output = vec![];
    format_html_with_plugins(root, options, &mut output, plugins).unwrap();
    compare_strs(
        &String::from_utf8(output).unwrap(),
        expected,
        "regular",
        input,
    );
}

macro_rules! html_opts {
    ([$($optclass:ident.$optname:ident),*], $lhs:expr, $rhs:expr) => {
        crate::tests::html_opts!([$($optclass.$optname),*], $lhs, $rhs,)
    };
    ([$($optclass:ident.$optname:ident),*], $lhs:expr, $rhs:expr,) => {
        crate::tests::html_opts!([$($optclass.$optname = true),*], $lhs, $rhs,)
    };
    ([$($optclass:ident.$optname:ident = $val:expr),*], $lhs:expr, $rhs:expr) => {
        crate::tests::html_opts!([$($optclass.$optname = $val),*], $lhs, $rhs,)
    };
    ([$($optclass:ident.$optname:ident = $val:expr),*], $lhs:expr, $rhs:expr,) => {
        {
            #[allow(unused_mut)]
            let mut options = crate::Options::default();
            $(
                options.$optclass.$optname = $val;
            )*
            crate::tests::html_opts_i($lhs, $rhs, &options);
        }
    };
}
pub(crate) use html_opts;

#[track_caller]
fn html_plugins(input: &str, expected: &str, plugins: &Plugins) {
    html_opts_w(input, expected, &Options::default(), plugins);
}

/// Render with the MathJax extension installed with its default delimiters.
#[track_caller]
fn html_mathjax(input: &str, expected: &str) {
    html_mathjax_opts(MathJaxOptions::default(), input, expected);
}

#[track_caller]
fn html_mathjax_opts(mathjax_options: MathJaxOptions, input: &str, expected: &str) {
    let mathjax = MathJax::new(mathjax_options);
    let mut plugins = Plugins::default();
    plugins.extend(&mathjax);
    html_plugins(input, expected, &plugins);
}

/// A compact rendering of the tree: one line per node, indented by depth.
fn tree<'a>(root: &'a AstNode<'a>) -> String {
    fn walk<'a>(node: &'a AstNode<'a>, depth: usize, out: &mut String) {
        let ast = node.data.borrow();
        out.push_str(&"  ".repeat(depth));
        match ast.value {
            NodeValue::Text(ref literal) => out.push_str(&format!("text {:?}", literal)),
            NodeValue::Math(ref nm) => out.push_str(&format!("math {:?}", nm.literal)),
            NodeValue::MathBlock(ref nmb) => out.push_str(&format!("math_block {:?}", nmb.lines)),
            NodeValue::Code(ref nc) => out.push_str(&format!("code {:?}", nc.literal)),
            ref value => out.push_str(&format!("{:?}", value.kind()).to_lowercase()),
        }
        out.push_str(&format!(" ({}-{})\n", ast.start_line, ast.end_line));
        drop(ast);
        for child in node.children() {
            walk(child, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(root, 0, &mut out);
    out
}

#[track_caller]
fn assert_tree(input: &str, plugins: &Plugins, expected: &str) {
    let arena = Arena::new();
    let root = parse_document_with_plugins(&arena, input, &Options::default(), plugins);
    compare_strs(&tree(root), expected, "tree", input);
}

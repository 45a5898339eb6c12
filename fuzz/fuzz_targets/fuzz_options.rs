#![no_main]

use libfuzzer_sys::fuzz_target;

use mdjax::mathjax::{MathJax, MathJaxOptions};
use mdjax::{markdown_to_html_with_plugins, Options, Plugins};

#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput<'s> {
    s: &'s str,
    opts: Options,
    mathjax: MathJaxOptions,
}

fuzz_target!(|i: FuzzInput| {
    let mathjax = MathJax::new(i.mathjax);
    let mut plugins = Plugins::default();
    plugins.extend(&mathjax);

    markdown_to_html_with_plugins(i.s, &i.opts, &plugins);
});

#![no_main]

use libfuzzer_sys::fuzz_target;

use mdjax::mathjax::MathJax;
use mdjax::{markdown_to_html_with_plugins, Options, Plugins};

fuzz_target!(|s: &str| {
    let mathjax = MathJax::default();
    let mut plugins = Plugins::default();
    plugins.extend(&mathjax);

    let options = Options::default();
    markdown_to_html_with_plugins(s, &options, &plugins);
});

#![no_main]

use std::sync::{Arc, LazyLock};

use libfuzzer_sys::fuzz_target;
use mockexpr::config::{RenderLimits, Syntax};
use mockexpr::{ExpressionRegistry, TemplateEngine};

static EMPTY: LazyLock<TemplateEngine> = LazyLock::new(|| {
    TemplateEngine::new(
        Arc::new(ExpressionRegistry::new()),
        Syntax::default(),
        RenderLimits::default(),
    )
});

fuzz_target!(|data: &[u8]| {
    let Ok(template) = std::str::from_utf8(data) else {
        return;
    };

    // Must never panic with the built-ins.
    let _ = mockexpr::render(template);

    // With nothing registered the output is the input, minus escapes.
    if !template.contains("$${") {
        assert_eq!(EMPTY.render(template), template);
    }
});

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use mockexpr::TemplateEngine;
use mockexpr::config::{ConfigLoader, LoaderOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(yaml) = std::str::from_utf8(data) else {
        return;
    };
    let loader = ConfigLoader::new(LoaderOptions {
        env_overrides: false,
        ..LoaderOptions::default()
    });
    // Any configuration that validates must yield a working engine.
    if let Ok(result) = loader.load_str(yaml, Path::new("fuzz.yaml")) {
        if let Ok(engine) = TemplateEngine::from_config(&result.config) {
            let _ = engine.render("${RANDOM_UUID} {{RANDOM_DATE}} $${X}");
        }
    }
});

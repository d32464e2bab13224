#![no_main]

use html_to_plaintext::{RenderOptions, TableSelection, TextRenderer};
use libfuzzer_sys::fuzz_target;

// Rendering arbitrary markup must never panic.
fuzz_target!(|data: &str| {
    let options = RenderOptions {
        wordwrap: Some(24),
        tables: TableSelection::All,
        ..Default::default()
    };
    let Ok(renderer) = TextRenderer::with_options(&options) else {
        return;
    };
    let _ = renderer.render_html(data);
});

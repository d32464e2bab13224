#![no_main]

use html_to_plaintext::TextRenderer;
use libfuzzer_sys::fuzz_target;

// Charset detection and decoding of arbitrary bytes must never panic.
fuzz_target!(|data: &[u8]| {
    let _ = TextRenderer::new().render_html_bytes(data);
});

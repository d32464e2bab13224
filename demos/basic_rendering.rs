//! Basic rendering example demonstrating the plain-text renderer

use html_to_plaintext::{RenderOptions, TableSelection, from_string};

fn main() {
    println!("=== html-to-plaintext - Basic Examples ===\n");

    // Example 1: Paragraphs and word wrapping
    show(
        "Paragraphs wrapped at 40 columns",
        "<h1>Welcome</h1><p>This paragraph is long enough to be wrapped at forty columns, \
         with <strong>inline markup</strong> that does not count toward the width.</p>",
        RenderOptions {
            wordwrap: Some(40),
            ..Default::default()
        },
    );

    // Example 2: Links, images and lists
    show(
        "Links, images and lists",
        "<p>Read the <a href=\"https://example.com/docs\">documentation</a>.</p>\
         <img src=\"logo.png\" alt=\"Logo\">\
         <ol><li>Install</li><li>Configure<ul><li>options</li></ul></li><li>Run</li></ol>",
        RenderOptions::default(),
    );

    // Example 3: Structured tables
    show(
        "Tables laid out as columns",
        "<table id=\"invoice\"><tr><th>Item</th><th>Qty</th></tr>\
         <tr><td>Widget</td><td>2</td></tr><tr><td>Gadget</td><td>10</td></tr></table>",
        RenderOptions {
            tables: TableSelection::from(vec!["#invoice"]),
            uppercase_headings: true,
            ..Default::default()
        },
    );

    // Example 4: Quotes and preformatted text
    show(
        "Quotes and preformatted text",
        "<blockquote><p>Simplicity is prerequisite for reliability.</p></blockquote>\
         <pre>fn main() {\n    render();\n}</pre>",
        RenderOptions::default(),
    );
}

fn show(title: &str, html: &str, options: RenderOptions) {
    println!("{title}");
    println!("Input HTML:");
    println!("{html}\n");

    match from_string(html, &options) {
        Ok(text) => {
            println!("Output text:");
            println!("{text}");
        }
        Err(err) => eprintln!("Rendering failed (code {}): {err}", err.code()),
    }
    println!("---\n");
}

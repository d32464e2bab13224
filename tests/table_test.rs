//! Table layout, base element selection and file input

use std::io::Write;
use std::path::PathBuf;

use html_to_plaintext::{
    RenderError, RenderOptions, TableSelection, from_file, from_source, from_string,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn expected(name: &str) -> String {
    std::fs::read_to_string(fixture(name))
        .expect("Failed to read fixture")
        .trim_end_matches('\n')
        .to_string()
}

fn invoice_options() -> RenderOptions {
    RenderOptions {
        tables: TableSelection::from(vec!["#invoice", ".address"]),
        ..Default::default()
    }
}

// ============================================================================
// from_file
// ============================================================================

#[test]
fn test_convert_file_at_given_path() {
    let text = from_file(fixture("invoice.html"), &invoice_options()).unwrap();
    assert_eq!(text, expected("invoice.txt"));
}

#[test]
fn test_base_element_limits_output() {
    let options = RenderOptions {
        tables: TableSelection::from(vec![".address"]),
        base_element: Some("table.address".to_string()),
        ..Default::default()
    };
    let text = from_file(fixture("invoice.html"), &options).unwrap();
    assert_eq!(text, expected("invoice-address.txt"));
}

#[test]
fn test_missing_base_element_renders_whole_document() {
    let options = RenderOptions {
        base_element: Some("table.notthere".to_string()),
        ..invoice_options()
    };
    let text = from_file(fixture("invoice.html"), &options).unwrap();
    assert_eq!(text, expected("invoice.txt"));
}

#[test]
fn test_missing_base_element_renders_nothing_when_not_returning_dom() {
    let options = RenderOptions {
        base_element: Some("table.notthere".to_string()),
        return_dom_by_default: false,
        ..invoice_options()
    };
    let text = from_file(fixture("invoice.html"), &options).unwrap();
    assert_eq!(text, "");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let path = fixture("does-not-exist.html");
    match from_file(&path, &RenderOptions::default()) {
        Err(RenderError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_file_in_legacy_charset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9 cr\xE8me</p></body></html>")
        .unwrap();
    let text = from_file(file.path(), &RenderOptions::default()).unwrap();
    assert_eq!(text, "Café crème");
}

#[test]
fn test_undecodable_file_is_an_encoding_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<p>\xC3\x28</p>").unwrap();
    let result = from_file(file.path(), &RenderOptions::default());
    assert!(matches!(result, Err(RenderError::Encoding(_))));
}

#[test]
fn test_render_from_reader() {
    let html: &[u8] = b"<p>from a reader</p>";
    assert_eq!(from_source(html, &RenderOptions::default()).unwrap(), "from a reader");
}

// ============================================================================
// Structured tables
// ============================================================================

fn tables_all() -> RenderOptions {
    RenderOptions {
        tables: TableSelection::All,
        ..Default::default()
    }
}

#[test]
fn test_uppercase_table_with_center_tag() {
    let html = "Good morning Jacob, \
        <TABLE> \
        <CENTER> \
        <TBODY> \
        <TR> \
        <TD>Lorem ipsum dolor sit amet.</TD> \
        </TR> \
        </CENTER> \
        </TBODY> \
        </TABLE> \
      ";
    assert_eq!(
        from_string(html, &tables_all()).unwrap(),
        "Good morning Jacob,\n\nLorem ipsum dolor sit amet."
    );
}

#[test]
fn test_columns_are_aligned() {
    let html = "<table>\
        <tr><th>Name</th><th>Role</th></tr>\
        <tr><td>Ada Lovelace</td><td>Analyst</td></tr>\
        <tr><td>Alan</td><td>Cryptographer</td></tr>\
        </table>";
    assert_eq!(
        from_string(html, &tables_all()).unwrap(),
        "Name           Role\nAda Lovelace   Analyst\nAlan           Cryptographer"
    );
}

#[test]
fn test_header_cells_follow_uppercase_headings() {
    let options = RenderOptions {
        uppercase_headings: true,
        ..tables_all()
    };
    let html = "<table><tr><th>Name</th><th>Role</th></tr><tr><td>Ada</td><td>Analyst</td></tr></table>";
    assert_eq!(from_string(html, &options).unwrap(), "NAME   ROLE\nAda    Analyst");
}

#[test]
fn test_cell_blocks_stack_inside_the_cell() {
    let html = "<table><tr><td><p>first</p><p>second</p></td><td>x</td></tr></table>";
    assert_eq!(from_string(html, &tables_all()).unwrap(), "first    x\nsecond");
}

#[test]
fn test_only_selected_tables_are_structured() {
    let html = "<table id=\"keep\"><tr><td>a</td><td>b</td></tr></table>\
                <table><tr><td>c</td><td>d</td></tr></table>";
    let options = RenderOptions {
        tables: TableSelection::from(vec!["#keep"]),
        ..Default::default()
    };
    assert_eq!(from_string(html, &options).unwrap(), "a   b\n\nc d");
}

#[test]
fn test_table_is_blank_separated() {
    let html = "<p>before</p><table><tr><td>a</td></tr></table><p>after</p>";
    assert_eq!(from_string(html, &tables_all()).unwrap(), "before\n\na\n\nafter");
}

#[test]
fn test_nested_table_renders_inside_its_cell() {
    let html = "<table><tr>\
        <td>outer</td>\
        <td><table><tr><td>i1</td><td>i2</td></tr></table></td>\
        </tr></table>";
    assert_eq!(from_string(html, &tables_all()).unwrap(), "outer   i1   i2");
}

//! Word wrapping through the full parse-and-render pipeline
//!
//! Inline markup (`strong`, `a`) must not influence where lines break beyond
//! the literal text it contributes.

use html_to_plaintext::{RenderOptions, from_string};

const LONG: &str = "111111111 222222222 333333333 444444444 555555555 666666666 777777777 888888888 999999999";

fn with_wordwrap(wordwrap: Option<usize>) -> RenderOptions {
    RenderOptions {
        wordwrap,
        ..Default::default()
    }
}

#[test]
fn test_wordwrap_at_80_by_default() {
    let text = from_string(LONG, &RenderOptions::default()).unwrap();
    assert_eq!(
        text,
        "111111111 222222222 333333333 444444444 555555555 666666666 777777777 888888888\n999999999"
    );
}

#[test]
fn test_wordwrap_at_given_width() {
    assert_eq!(
        from_string(LONG, &with_wordwrap(Some(20))).unwrap(),
        "111111111 222222222\n333333333 444444444\n555555555 666666666\n777777777 888888888\n999999999"
    );
    assert_eq!(
        from_string(LONG, &with_wordwrap(Some(50))).unwrap(),
        "111111111 222222222 333333333 444444444 555555555\n666666666 777777777 888888888 999999999"
    );
    assert_eq!(
        from_string(LONG, &with_wordwrap(Some(70))).unwrap(),
        "111111111 222222222 333333333 444444444 555555555 666666666 777777777\n888888888 999999999"
    );
}

#[test]
fn test_no_wordwrap_when_disabled() {
    assert_eq!(from_string(LONG, &with_wordwrap(None)).unwrap(), LONG);
}

#[test]
fn test_formatting_tags_do_not_count_toward_width() {
    let html = "<p><strong>This text isn't counted</strong> when calculating where to break a string for 80 character line lengths.</p>";
    assert_eq!(
        from_string(html, &RenderOptions::default()).unwrap(),
        "This text isn't counted when calculating where to break a string for 80\ncharacter line lengths."
    );
}

#[test]
fn test_formatting_tags_do_not_truncate_later_lines() {
    let html = "<p><strong>This text isn't counted</strong> when calculating where to break a string for 80 character line lengths.  However it can affect where the next line breaks and this could lead to having an early line break</p>";
    assert_eq!(
        from_string(html, &RenderOptions::default()).unwrap(),
        "This text isn't counted when calculating where to break a string for 80\n\
         character line lengths. However it can affect where the next line breaks and\n\
         this could lead to having an early line break"
    );
}

// The href suffix attaches directly to the text that follows the anchor,
// so trailing punctuation stays glued to it: `[url]!`, not `[url] !`.
#[test]
fn test_anchor_decoration_wraps_like_text_and_keeps_punctuation_attached() {
    let html = "<p>We appreciate your business. And we hope you'll check out our <a href=\"http://example.com/\">new products</a>!</p>";
    assert_eq!(
        from_string(html, &RenderOptions::default()).unwrap(),
        "We appreciate your business. And we hope you'll check out our new products\n[http://example.com/]!"
    );
}

#[test]
fn test_long_word_is_never_split() {
    let html = "<p>short https://example.com/a/very/long/path/that/cannot/fit end</p>";
    assert_eq!(
        from_string(html, &with_wordwrap(Some(10))).unwrap(),
        "short\nhttps://example.com/a/very/long/path/that/cannot/fit\nend"
    );
}

#[test]
fn test_word_spans_inline_elements() {
    assert_eq!(
        from_string("<p>foo<b>bar</b> baz</p>", &RenderOptions::default()).unwrap(),
        "foobar baz"
    );
}

#[test]
fn test_list_item_does_not_wrap_when_wordwrap_disabled() {
    let html = "Good morning Jacob, \
        <p>Lorem ipsum dolor sit amet</p> \
        <p><strong>Lorem ipsum dolor sit amet.</strong></p> \
        <ul> \
          <li>run in the park <span style=\"color:#888888;\">(in progress)</span></li> \
        </ul> \
      ";
    assert_eq!(
        from_string(html, &with_wordwrap(None)).unwrap(),
        "Good morning Jacob,\n\nLorem ipsum dolor sit amet\n\nLorem ipsum dolor sit amet.\n\n * run in the park (in progress)"
    );
}

#[test]
fn test_list_items_wrap_under_their_marker() {
    let html = "<ul><li>alpha beta gamma delta</li></ul>";
    assert_eq!(
        from_string(html, &with_wordwrap(Some(13))).unwrap(),
        " * alpha beta\n   gamma\n   delta"
    );
}

#[test]
fn test_blockquote_lines_respect_width_with_prefix() {
    let html = "<blockquote>one two three four</blockquote>";
    assert_eq!(
        from_string(html, &with_wordwrap(Some(11))).unwrap(),
        "> one two\n> three\n> four"
    );
}

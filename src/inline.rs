//! Inline decorations for links and images
//!
//! Anchors and images are turned into literal text before they reach the
//! line builder, so their decorations wrap like ordinary words:
//!
//! | Markup                                  | Text                  |
//! |-----------------------------------------|-----------------------|
//! | `<a href="U">text</a>`                  | `text [U]`            |
//! | `<a href="mailto:x@y">x@y</a>`          | `x@y [x@y]`           |
//! | `<a>text</a>`, `<a href="">text</a>`    | `text`                |
//! | `<img src="S" alt="A">`                 | `A [S]`               |
//! | `<img src="S">`                         | `[S]`                 |
//! | `<img alt="A">`                         | *(nothing)*           |

use crate::dom::Element;
use crate::options::RenderConfig;

const MAILTO: &str = "mailto:";

/// Bracketed suffix rendered after an anchor's content
///
/// # Arguments
///
/// * `anchor` - The `a` element
/// * `config` - Compiled render options
///
/// # Returns
///
/// `Some("[href]")` when the anchor has a non-empty href and the options do
/// not suppress it, `None` otherwise.
pub fn anchor_suffix(anchor: &Element, config: &RenderConfig) -> Option<String> {
    if config.ignore_href {
        return None;
    }

    let raw = anchor.attr("href")?.trim();
    let href = strip_mailto(raw);
    if href.is_empty() {
        return None;
    }

    let href = match config.link_href_base_url {
        Some(ref base) if href.starts_with('/') => format!("{base}{href}"),
        _ => href.to_string(),
    };

    if config.hide_link_href_if_same_as_text {
        let text = collapse_whitespace(&anchor.text_content());
        if text == href || text == raw {
            return None;
        }
    }

    Some(format!("[{href}]"))
}

/// Text rendered for an image
///
/// Returns `None` when the image has no `src` or images are ignored.
pub fn image_text(image: &Element, config: &RenderConfig) -> Option<String> {
    if config.ignore_image {
        return None;
    }

    let src = image.attr("src").map(str::trim).filter(|src| !src.is_empty())?;
    let alt = image.attr("alt").map(collapse_whitespace).unwrap_or_default();

    if alt.is_empty() {
        Some(format!("[{src}]"))
    } else {
        Some(format!("{alt} [{src}]"))
    }
}

fn strip_mailto(href: &str) -> &str {
    match href.get(..MAILTO.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(MAILTO) => &href[MAILTO.len()..],
        _ => href,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! HTML to plain-text renderer
//!
//! This library turns HTML documents into readable plain text, keeping their
//! structure (paragraphs, headings, lists, tables, links, images) while
//! wrapping lines to a configurable width.
//!
//! # Architecture
//!
//! The library is structured into several modules:
//! - `renderer`: tree walk, tag classification and final output
//! - `wrap`: word-wrap line builder measuring visible width
//! - `output`: committed lines and blank-line normalization
//! - `block`: block spacing and quote indentation
//! - `inline`: link and image decorations
//! - `list`: list markers and hanging indents
//! - `table`: column layout of selected tables
//! - `selector`: minimal CSS-like selectors
//! - `dom`: document tree
//! - `parser`: HTML5 parsing using html5ever
//! - `charset`: character encoding detection and handling
//! - `options`: render options
//!
//! # Examples
//!
//! ```rust
//! use html_to_plaintext::{RenderOptions, from_string};
//!
//! let options = RenderOptions {
//!     wordwrap: Some(20),
//!     ..Default::default()
//! };
//! let text = from_string("<p>111111111 222222222 333333333</p>", &options).unwrap();
//! assert_eq!(text, "111111111 222222222\n333333333");
//! ```

// Module declarations
pub mod block;
pub mod charset;
pub mod dom;
pub mod error;
pub mod inline;
pub mod list;
pub mod options;
pub mod output;
pub mod parser;
pub mod renderer;
pub mod selector;
pub mod table;
pub mod wrap;

use std::io::Read;
use std::path::{Path, PathBuf};

// Re-export main types for convenience
pub use dom::{DocumentNode, Element};
pub use error::RenderError;
pub use options::{RenderOptions, TableSelection};
pub use parser::{parse_html, parse_html_bytes};
pub use renderer::{TextRenderer, render};

/// Render an HTML string
///
/// # Errors
///
/// Only option validation errors and [`RenderError::DepthLimitExceeded`];
/// malformed markup is never an error.
pub fn from_string(markup: &str, options: &RenderOptions) -> Result<String, RenderError> {
    TextRenderer::with_options(options)?.render_html(markup)
}

/// Read, decode and render an HTML file
///
/// # Errors
///
/// [`RenderError::Io`] when the file cannot be read, [`RenderError::Encoding`]
/// when its bytes are invalid for the detected charset, plus the errors of
/// [`from_string`].
pub fn from_file(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String, RenderError> {
    let path = path.as_ref();
    let renderer = TextRenderer::with_options(options)?;
    let html = std::fs::read(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Read {} bytes from {}", html.len(), path.display());
    renderer.render_html_bytes(&html)
}

/// Read HTML from any reader and render it
///
/// Read failures are reported as [`RenderError::Io`] with the path `<reader>`.
pub fn from_source<R: Read>(mut source: R, options: &RenderOptions) -> Result<String, RenderError> {
    let renderer = TextRenderer::with_options(options)?;
    let mut html = Vec::new();
    source
        .read_to_end(&mut html)
        .map_err(|source| RenderError::Io {
            path: PathBuf::from("<reader>"),
            source,
        })?;
    renderer.render_html_bytes(&html)
}

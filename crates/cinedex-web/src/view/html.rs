//! HTML escaping.

use std::fmt::{self, Display, Write as _};

/// Formats the wrapped text with HTML special characters escaped.
///
/// Safe in element content and in double- or single-quoted attributes.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Returns `text` with HTML special characters escaped.
#[must_use]
pub fn escape(text: &str) -> String {
    Escaped(text).to_string()
}

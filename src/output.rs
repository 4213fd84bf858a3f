//! Output formatting for listings.
//!
//! Provides functions to render a [`Listing`] as JSON or as a plain text table.

use crate::types::Listing;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Formats a listing into a string.
pub fn format_listing(listing: &Listing, format: OutputFormat, pretty: bool) -> String {
    match format {
        OutputFormat::Json => format_json(listing, pretty),
        OutputFormat::Text => format_text(listing),
    }
}

// ----------------------- Internal formatting -----------------------

fn format_json(listing: &Listing, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(listing).expect("JSON serialization failed")
    } else {
        serde_json::to_string(listing).expect("JSON serialization failed")
    }
}

fn format_text(listing: &Listing) -> String {
    let width = listing.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut out = String::with_capacity(listing.len() * (width + 16));
    for (name, entry) in listing {
        let kind = match (entry.is_text, &entry.content) {
            (true, Some(_)) => "text",
            (true, None) => "text (not loaded)",
            (false, _) => "binary",
        };
        out.push_str(&format!("{:<width$}  {}\n", name, kind, width = width));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileEntry;

    fn sample() -> Listing {
        let mut listing = Listing::new();
        listing.insert(
            "a.txt".into(),
            FileEntry {
                is_text: true,
                content: Some("YQ==".into()),
            },
        );
        listing.insert(
            "big.txt".into(),
            FileEntry {
                is_text: true,
                content: None,
            },
        );
        listing.insert(
            "b.png".into(),
            FileEntry {
                is_text: false,
                content: None,
            },
        );
        listing
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_missing_content() {
        let json = format_listing(&sample(), OutputFormat::Json, false);
        assert_eq!(
            json,
            r#"{"a.txt":{"isText":true,"content":"YQ=="},"b.png":{"isText":false},"big.txt":{"isText":true}}"#
        );
    }

    #[test]
    fn test_text_table() {
        let text = format_listing(&sample(), OutputFormat::Text, false);
        assert_eq!(
            text,
            "a.txt    text\nb.png    binary\nbig.txt  text (not loaded)\n"
        );
    }
}

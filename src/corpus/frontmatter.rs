//! Minimal `key: value` front-matter parsing.
//!
//! Only a block at the very start of the document is recognized:
//!
//! ```text
//! ---
//! title: Weekly review
//! tags: [a, b]
//! ---
//! Body starts here.
//! ```
//!
//! Values are kept as raw strings; `[a, b]` stays `"[a, b]"`.

use std::collections::BTreeMap;

use crate::corpus::ParsedDocument;

const OPENING: &str = "---\n";
const CLOSING: &str = "\n---\n";

/// Split `content` into front matter and body.
///
/// Never fails: content without a leading block comes back unchanged as the
/// body with empty front matter.
#[must_use]
pub fn parse_front_matter(content: &str) -> ParsedDocument {
    let Some(rest) = content.strip_prefix(OPENING) else {
        return unparsed(content);
    };
    let Some(end) = rest.find(CLOSING) else {
        return unparsed(content);
    };

    let block = &rest[..end];
    let body = &rest[end + CLOSING.len()..];

    ParsedDocument {
        frontmatter: parse_block(block),
        body: body.to_string(),
    }
}

fn unparsed(content: &str) -> ParsedDocument {
    ParsedDocument {
        frontmatter: BTreeMap::new(),
        body: content.to_string(),
    }
}

/// Later duplicates overwrite earlier ones.
fn parse_block(block: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for line in block.split('\n') {
        if trim_field(line).is_empty() {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            fields.insert(trim_field(key).to_string(), trim_field(value).to_string());
        }
    }

    fields
}

/// Trim the characters a Markdown editor treats as blank around a field:
/// Unicode whitespace plus the zero-width no-break space (BOM), but not NEL.
fn trim_field(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}'))
}

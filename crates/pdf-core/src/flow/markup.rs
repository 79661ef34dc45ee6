//! Inline rich-text markup
//!
//! Paragraph text understands a small tag set:
//! - `<b>`…`</b>` (or `<strong>`) for bold
//! - `<br/>` for a hard line break
//! - the entities `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`
//!   and numeric `&#NNN;` / `&#xHH;`
//!
//! Anything else that looks like a tag is kept as literal text.

/// A run of inline content
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text { text: String, bold: bool },
    Break,
}

/// Escape text so it is shown literally inside markup
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

enum Tag {
    Bold(bool),
    Break,
}

fn parse_tag(body: &str) -> Option<Tag> {
    let body = body.trim();
    let (closing, name) = match body.strip_prefix('/') {
        Some(rest) => (true, rest.trim()),
        None => (false, body.trim_end_matches('/').trim()),
    };

    match name.to_ascii_lowercase().as_str() {
        "b" | "strong" => Some(Tag::Bold(!closing)),
        "br" if !closing => Some(Tag::Break),
        _ => None,
    }
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{A0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

struct Builder {
    out: Vec<Inline>,
    current: String,
    bold_depth: usize,
}

impl Builder {
    fn bold(&self) -> bool {
        self.bold_depth > 0
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.out.push(Inline::Text {
                text: std::mem::take(&mut self.current),
                bold: self.bold(),
            });
        }
    }
}

/// Parse markup into inline runs
///
/// Whitespace is kept as-is; collapsing happens when the paragraph is
/// broken into words. Unbalanced `</b>` is ignored.
pub fn parse_markup(markup: &str) -> Vec<Inline> {
    let mut builder = Builder {
        out: Vec::new(),
        current: String::new(),
        bold_depth: 0,
    };

    let mut rest = markup;
    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                if let Some(end) = rest.find('>') {
                    if let Some(tag) = parse_tag(&rest[1..end]) {
                        builder.flush();
                        match tag {
                            Tag::Bold(true) => builder.bold_depth += 1,
                            Tag::Bold(false) => {
                                builder.bold_depth = builder.bold_depth.saturating_sub(1)
                            }
                            Tag::Break => builder.out.push(Inline::Break),
                        }
                        rest = &rest[end + 1..];
                        continue;
                    }
                }
                builder.current.push('<');
                rest = &rest[1..];
            }
            '&' => {
                let decoded = rest
                    .find(';')
                    .filter(|&end| end <= 10)
                    .and_then(|end| decode_entity(&rest[1..end]).map(|ch| (ch, end)));
                match decoded {
                    Some((ch, end)) => {
                        builder.current.push(ch);
                        rest = &rest[end + 1..];
                    }
                    None => {
                        builder.current.push('&');
                        rest = &rest[1..];
                    }
                }
            }
            _ => {
                builder.current.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    builder.flush();
    builder.out
}

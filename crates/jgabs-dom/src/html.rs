#![forbid(unsafe_code)]

//! HTML fragment parsing and serialization.
//!
//! The parser accepts the markup a static site actually ships: elements with
//! quoted, unquoted and boolean attributes, void elements, comments, a
//! doctype, raw-text `script`/`style` bodies and the common character
//! references. Implied end tags are handled for `li`, `option` and `p`.
//! It is not a conforming HTML5 tree builder.

use crate::document::{Document, NodeId};
use crate::{DomError, Result};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[must_use]
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Parse `source` and append the resulting nodes to `parent`.
pub fn parse_into(doc: &mut Document, parent: NodeId, source: &str) -> Result<()> {
    let mut parser = Parser {
        src: source,
        pos: 0,
        stack: vec![parent],
    };
    parser.run(doc)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn current(&self) -> NodeId {
        // The stack is seeded with the target parent and never fully drained.
        self.stack[self.stack.len() - 1]
    }

    fn error(&self, msg: &str) -> DomError {
        DomError::HtmlParse(format!("{msg} at byte {}", self.pos))
    }

    fn run(&mut self, doc: &mut Document) -> Result<()> {
        while self.pos < self.src.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                let end = rest[4..]
                    .find("-->")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += 4 + end + 3;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                let end = rest
                    .find('>')
                    .ok_or_else(|| self.error("unterminated declaration"))?;
                self.pos += end + 1;
            } else if rest.starts_with("</") {
                self.end_tag(doc)?;
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.start_tag(doc)?;
            } else {
                // The run may open with a stray `<`; step over the first char.
                let skip = rest.chars().next().map_or(0, char::len_utf8);
                let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
                let text = decode_entities(&rest[..end]);
                self.pos += end;
                let node = doc.create_text(&text);
                doc.append_child(self.current(), node)?;
            }
        }
        Ok(())
    }

    fn end_tag(&mut self, doc: &Document) -> Result<()> {
        let rest = self.rest();
        let end = rest
            .find('>')
            .ok_or_else(|| self.error("unterminated end tag"))?;
        let name = rest[2..end].trim().to_ascii_lowercase();
        self.pos += end + 1;
        // Unmatched end tags are ignored; the seeded parent is never popped.
        if let Some(depth) = self
            .stack
            .iter()
            .skip(1)
            .rposition(|id| doc.tag_name(*id) == Some(name.as_str()))
        {
            self.stack.truncate(depth + 1);
        }
        Ok(())
    }

    fn start_tag(&mut self, doc: &mut Document) -> Result<()> {
        self.pos += 1;
        let name = self.take_while(|c| !c.is_whitespace() && c != '>' && c != '/');
        let tag = name.to_ascii_lowercase();
        self.close_implied(doc, &tag);

        let element = doc.create_element(&tag);
        let self_closing = self.attributes(doc, element)?;
        doc.append_child(self.current(), element)?;

        if self_closing || is_void(&tag) {
            return Ok(());
        }
        if is_raw_text(&tag) {
            let close = format!("</{tag}");
            let rest = self.rest();
            let end = rest
                .to_ascii_lowercase()
                .find(&close)
                .ok_or_else(|| self.error("unterminated raw text element"))?;
            if end > 0 {
                let text = doc.create_text(&rest[..end]);
                doc.append_child(element, text)?;
            }
            self.pos += end;
            return Ok(());
        }
        self.stack.push(element);
        Ok(())
    }

    fn close_implied(&mut self, doc: &Document, tag: &str) {
        let closes: &[&str] = match tag {
            "li" => &["li"],
            "option" => &["option"],
            "p" | "div" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "form" | "section" => &["p"],
            _ => &[],
        };
        if self.stack.len() > 1
            && doc
                .tag_name(self.current())
                .is_some_and(|open| closes.contains(&open))
        {
            self.stack.pop();
        }
    }

    /// Parse attributes up to and including `>`. Returns whether the tag
    /// ended with `/>`.
    fn attributes(&mut self, doc: &mut Document, element: NodeId) -> Result<bool> {
        loop {
            self.take_while(char::is_whitespace);
            let rest = self.rest();
            if rest.is_empty() {
                return Err(self.error("unterminated start tag"));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                return Ok(true);
            }
            if rest.starts_with('>') {
                self.pos += 1;
                return Ok(false);
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let name = self
                .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
                .to_string();
            self.take_while(char::is_whitespace);
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.take_while(char::is_whitespace);
                self.attribute_value()?
            } else {
                String::new()
            };
            if doc.attr(element, &name)?.is_none() {
                doc.set_attr(element, &name, &value)?;
            }
        }
    }

    fn attribute_value(&mut self) -> Result<String> {
        let rest = self.rest();
        let raw = match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let end = rest[1..]
                    .find(quote)
                    .ok_or_else(|| self.error("unterminated attribute value"))?;
                let raw = &rest[1..1 + end];
                self.pos += end + 2;
                raw
            }
            _ => self.take_while(|c| !c.is_whitespace() && c != '>'),
        };
        Ok(decode_entities(raw))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let len = self.src[start..]
            .find(|c: char| !pred(c))
            .unwrap_or(self.src.len() - start);
        self.pos += len;
        &self.src[start..start + len]
    }
}

/// Replace the character references a static page realistically contains.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            decode_reference(name).map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

/// Serialize `id` (and its subtree) into `out`.
pub(crate) fn write_node(doc: &Document, id: NodeId, out: &mut String) -> Result<()> {
    if let Some(text) = doc.text(id) {
        let raw = doc
            .parent(id)
            .and_then(|p| doc.tag_name(p))
            .is_some_and(is_raw_text);
        if raw {
            out.push_str(text);
        } else {
            escape_text(text, out);
        }
        return Ok(());
    }
    let Some(tag) = doc.tag_name(id) else {
        for child in doc.children(id)? {
            write_node(doc, *child, out)?;
        }
        return Ok(());
    };

    out.push('<');
    out.push_str(tag);
    for (name, value) in doc.attrs(id)? {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');
    if is_void(tag) {
        return Ok(());
    }
    for child in doc.children(id)? {
        write_node(doc, *child, out)?;
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    Ok(())
}

#![forbid(unsafe_code)]

//! CSS selector subset.
//!
//! Supported: type selectors, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`
//! (value quoted or bare), compound selectors, the descendant and child
//! combinators, and `,`-separated groups. Pseudo-classes and the sibling
//! combinators are rejected with [`DomError::UnsupportedSelector`].
//!
//! Matching follows `Element.querySelectorAll`: the subject must lie inside
//! the query scope, but ancestors named by the selector may lie outside it.

use crate::document::{Document, NodeId};
use crate::{DomError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One complex selector: compounds joined by combinators, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    /// `parts[i].0` is the combinator linking `parts[i - 1]` to `parts[i]`
    /// (ignored for `i == 0`).
    parts: Vec<(Combinator, Compound)>,
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    groups: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self> {
        let unsupported = || DomError::UnsupportedSelector(source.to_string());
        let mut groups = Vec::new();
        for group in split_groups(source) {
            let group = group.trim();
            if group.is_empty() {
                return Err(unsupported());
            }
            groups.push(parse_complex(group).ok_or_else(unsupported)?);
        }
        if groups.is_empty() {
            return Err(unsupported());
        }
        Ok(Self { groups })
    }

    /// Whether `node` matches any group.
    #[must_use]
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups
            .iter()
            .any(|complex| matches_at(doc, node, &complex.parts, complex.parts.len() - 1))
    }
}

/// Split on commas outside of brackets and quotes.
fn split_groups(source: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in source.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                groups.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&source[start..]);
    groups
}

fn parse_complex(source: &str) -> Option<Complex> {
    let mut parts = Vec::new();
    let mut combinator = Combinator::Descendant;
    let mut chars = source.trim().chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.peek() {
            None => break,
            Some('>') => {
                chars.next();
                if parts.is_empty() || combinator == Combinator::Child {
                    return None;
                }
                combinator = Combinator::Child;
                continue;
            }
            Some(_) => {}
        }
        let compound = parse_compound(&mut chars)?;
        parts.push((combinator, compound));
        combinator = Combinator::Descendant;
    }
    if parts.is_empty() || combinator == Combinator::Child {
        return None;
    }
    Some(Complex { parts })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut ident = String::new();
    while let Some(c) = chars.next_if(|c| is_ident_char(*c)) {
        ident.push(c);
    }
    (!ident.is_empty()).then_some(ident)
}

fn parse_compound(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut any = false;
    if chars.next_if_eq(&'*').is_some() {
        any = true;
    } else if let Some(tag) = take_ident(chars) {
        compound.tag = Some(tag.to_ascii_lowercase());
        any = true;
    }
    loop {
        match chars.peek() {
            Some('.') => {
                chars.next();
                compound.classes.push(take_ident(chars)?);
            }
            Some('#') => {
                chars.next();
                compound.id = Some(take_ident(chars)?);
            }
            Some('[') => {
                chars.next();
                compound.attrs.push(parse_attr(chars)?);
            }
            Some(c) if c.is_whitespace() || *c == '>' => break,
            None => break,
            Some(_) => return None,
        }
        any = true;
    }
    any.then_some(compound)
}

fn parse_attr(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<AttrMatch> {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    let name = take_ident(chars)?.to_ascii_lowercase();
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
    let value = if chars.next_if_eq(&'=').is_some() {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let value = match chars.next_if(|c| *c == '"' || *c == '\'') {
            Some(quote) => {
                let mut value = String::new();
                loop {
                    match chars.next()? {
                        c if c == quote => break,
                        c => value.push(c),
                    }
                }
                value
            }
            None => take_ident(chars)?,
        };
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        Some(value)
    } else {
        None
    };
    chars.next_if_eq(&']')?;
    Some(AttrMatch { name, value })
}

fn compound_matches(doc: &Document, node: NodeId, compound: &Compound) -> bool {
    let Some(tag) = doc.tag_name(node) else {
        return false;
    };
    if compound.tag.as_deref().is_some_and(|want| want != tag) {
        return false;
    }
    if let Some(id) = &compound.id
        && doc.attr(node, "id").ok().flatten() != Some(id.as_str())
    {
        return false;
    }
    if !compound
        .classes
        .iter()
        .all(|class| doc.has_class(node, class).unwrap_or(false))
    {
        return false;
    }
    compound.attrs.iter().all(|attr| {
        match (doc.attr(node, &attr.name).ok().flatten(), &attr.value) {
            (Some(_), None) => true,
            (Some(actual), Some(want)) => actual == want,
            (None, _) => false,
        }
    })
}

fn matches_at(doc: &Document, node: NodeId, parts: &[(Combinator, Compound)], i: usize) -> bool {
    let (combinator, compound) = &parts[i];
    if !compound_matches(doc, node, compound) {
        return false;
    }
    if i == 0 {
        return true;
    }
    match combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_at(doc, parent, parts, i - 1)),
        Combinator::Descendant => {
            let mut cursor = doc.parent(node);
            while let Some(ancestor) = cursor {
                if matches_at(doc, ancestor, parts, i - 1) {
                    return true;
                }
                cursor = doc.parent(ancestor);
            }
            false
        }
    }
}

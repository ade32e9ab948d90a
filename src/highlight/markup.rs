//! The `<color=#RRGGBB>…</color>` markup grammar
//!
//! Source text is escaped exactly once when it is wrapped in a span: `&` becomes
//! `&amp;`, `<` becomes `&lt;` and `>` becomes `&gt;`. [`strip_markup`] undoes the
//! three escapes in the same scan that drops the tags, so any source text survives
//! a round trip, including text that already spells out an entity.

use super::HexColor;
use std::borrow::Cow;

const CLOSE_TAG: &str = "</color>";
const OPEN_TAG_PREFIX: &str = "<color=";

const ENTITIES: [(&str, char); 3] = [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')];

/// Escape the characters that would otherwise be read as markup
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(&['&', '<', '>'][..]) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Append one colored span for raw (unescaped) source text
pub fn push_span(out: &mut String, color: HexColor, text: &str) {
    out.push_str(OPEN_TAG_PREFIX);
    out.push_str(&color.to_string());
    out.push('>');
    out.push_str(&escape(text));
    out.push_str(CLOSE_TAG);
}

/// Remove every color tag and undo the escaping, recovering the source text
pub fn strip_markup(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(idx) = rest.find(&['<', '&'][..]) {
        text.push_str(&rest[..idx]);
        rest = &rest[idx..];

        if let Some(after) = rest.strip_prefix(CLOSE_TAG) {
            rest = after;
        } else if rest.starts_with(OPEN_TAG_PREFIX) {
            match rest.find('>') {
                Some(end) => rest = &rest[end + 1..],
                None => rest = "",
            }
        } else if let Some((entity, c)) = ENTITIES.iter().find(|(e, _)| rest.starts_with(*e)) {
            text.push(*c);
            rest = &rest[entity.len()..];
        } else {
            // Not a tag or entity we emit; keep it verbatim
            text.push_str(&rest[..1]);
            rest = &rest[1..];
        }
    }
    text.push_str(rest);
    text
}

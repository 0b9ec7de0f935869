//! Verse text normalization.
//!
//! The source corpus carries HTML entities, stray control bytes (an EOF
//! marker among them), a broken `*</abbr>` footnote marker and leftover
//! markup. [`clean`] turns that into plain text.

use once_cell::sync::Lazy;
use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

static CHAR_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#(?:[xX]([0-9A-Fa-f]+)|([0-9]+));?|([A-Za-z0-9]+)(;?))")
        .expect("character reference pattern")
});
static CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\x00-\x1F\x7F]").expect("control pattern"));
static ABBR_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*</abbr>").expect("marker pattern"));
// ASCII whitespace only: a no-break space inside a verse is content.
static TRAILING_ASTERISK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(?-u:\s)*$").expect("asterisk pattern"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?-u:\s)+").expect("whitespace pattern"));

/// Named references that HTML also accepts without the closing `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];
const LONGEST_LEGACY_ENTITY: usize = 6;

/// Windows-1252 characters for numeric references in 0x80..=0x9F
const C1_REPLACEMENTS: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Normalize raw verse text.
///
/// Repeats [`clean_pass`] until the text is stable, so that
/// `clean(clean(x)) == clean(x)` holds even when one step exposes work for an
/// earlier one (tag removal joining an entity back together, an entity
/// decoding to markup). Every changing pass leaves fewer characters, so the
/// loop ends.
pub fn clean(raw: &str) -> String {
    let mut current = clean_pass(raw);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One application of the pipeline. Step order matters.
fn clean_pass(text: &str) -> String {
    let text = decode_entities(text);
    let text = CONTROL.replace_all(&text, "");
    let text = ABBR_MARKER.replace_all(&text, "");
    let text = TRAILING_ASTERISK.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Decode character references the way an HTML parser reads text content.
///
/// Numeric references may omit the closing `;`; those in 0x80..=0x9F are read
/// as Windows-1252. Named references need the `;` unless they belong to the
/// legacy set, which also matches as a prefix (`&ampx` is `&x`). Anything
/// else is left untouched.
pub fn decode_entities(text: &str) -> String {
    CHAR_REF
        .replace_all(text, |caps: &Captures| {
            if let Some(hex) = caps.get(1) {
                numeric_char(u32::from_str_radix(hex.as_str(), 16).ok()).to_string()
            } else if let Some(dec) = caps.get(2) {
                numeric_char(dec.as_str().parse().ok()).to_string()
            } else {
                named_reference(&caps[3], !caps[4].is_empty()).unwrap_or_else(|| caps[0].to_string())
            }
        })
        .into_owned()
}

fn named_reference(name: &str, terminated: bool) -> Option<String> {
    if terminated {
        if let Some(resolved) = resolve_html5_entity(name) {
            return Some(resolved.to_string());
        }
    }
    let longest = name.len().min(LONGEST_LEGACY_ENTITY);
    (2..=longest).rev().find_map(|len| {
        let prefix = &name[..len];
        if !LEGACY_ENTITIES.contains(&prefix) {
            return None;
        }
        let resolved = resolve_html5_entity(prefix)?;
        let semicolon = if terminated { ";" } else { "" };
        Some(format!("{}{}{}", resolved, &name[len..], semicolon))
    })
}

fn numeric_char(code: Option<u32>) -> char {
    match code {
        Some(c @ 0x80..=0x9F) => C1_REPLACEMENTS[(c - 0x80) as usize],
        Some(0) | None => char::REPLACEMENT_CHARACTER,
        Some(c) => char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

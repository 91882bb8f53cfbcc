use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref ENTITY_PATTERN: Regex = Regex::new(r"&[A-Za-z][A-Za-z-]*;").unwrap();
}

/// Named entities the corpus uses for Old English letters.
static ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("&aelig;", "æ"),
        ("&AElig;", "Æ"),
        ("&aelig-acute;", "ǽ"),
        ("&AElig-acute;", "Ǽ"),
        ("&thorn;", "þ"),
        ("&THORN;", "Þ"),
        ("&eth;", "ð"),
        ("&ETH;", "Ð"),
        ("&aacute;", "á"),
        ("&eacute;", "é"),
        ("&oacute;", "ó"),
        ("&iacute;", "í"),
        ("&yacute;", "ý"),
    ])
});

/// Replace known `&name;` entities with their letters. Unknown entities are kept.
pub fn decode(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            ENTITIES.get(token).copied().unwrap_or(token).to_string()
        })
        .into_owned()
}

/// Drop a single trailing `,` or `;`.
pub fn remove_trailing_punctuation(text: &str) -> &str {
    text.strip_suffix([',', ';']).unwrap_or(text)
}

/// Lookup key for a headword: accents, hyphens and case folded away.
///
/// `Ǽ-bylgþ` and `æbylgþ` fold to the same key.
pub fn fold_headword(headword: &str) -> String {
    headword
        .nfd()
        .filter(|c| !is_combining_mark(*c) && *c != '-')
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

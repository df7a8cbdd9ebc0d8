use crate::FlaggedWord;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FLAGGED_SPAN: Regex =
        Regex::new(r#"<span data-fs-suggest="[^"]+">([^<]+)</span>"#).unwrap();
    static ref BODY: Regex = Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(r"(?i)<br\s*/?>").unwrap();
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Words the grammar check marked, in page order, duplicates kept
pub fn flagged_words(html: &str) -> Vec<FlaggedWord> {
    FLAGGED_SPAN
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Candidate replacements from a suggestion page.
///
/// The service always ends the list with a fragment that is not a
/// suggestion, so the last entry is dropped.
pub fn suggestions(html: &str) -> Vec<String> {
    let Some(body) = BODY.captures(html) else {
        return Vec::new();
    };

    let mut fragments: Vec<String> = LINE_BREAK
        .split(&body[1])
        .map(|fragment| TAG.replace_all(fragment, "").trim().to_string())
        .filter(|fragment| !fragment.is_empty())
        .collect();

    fragments.pop();
    fragments
}

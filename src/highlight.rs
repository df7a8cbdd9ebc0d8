use crate::document::{TextChange, TextRange};
use crate::FlaggedWord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub range: TextRange,
    pub annotation: String,
}

/// Highlights currently shown for one document.
///
/// Every range matched its word when the set was built. Later edits can
/// leave ranges stale: only the ones an edit touches are removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    highlights: Vec<Highlight>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every occurrence of every flagged word in `text`.
    ///
    /// Occurrences of one word never overlap each other: the search resumes
    /// after the end of each match.
    pub fn locate(words: &[FlaggedWord], text: &str, annotation: &str) -> Self {
        let mut highlights = Vec::new();

        for word in words.iter().filter(|w| !w.is_empty()) {
            for (start, matched) in text.match_indices(word.as_str()) {
                highlights.push(Highlight {
                    range: TextRange::new(start, start + matched.len()),
                    annotation: annotation.to_string(),
                });
            }
        }

        Self { highlights }
    }

    /// Drop every highlight touched by one of `changes`. Returns how many went.
    pub fn prune(&mut self, changes: &[TextChange]) -> usize {
        let before = self.highlights.len();
        for change in changes {
            self.highlights
                .retain(|highlight| !highlight.range.intersects(&change.range));
        }
        before - self.highlights.len()
    }

    pub fn clear(&mut self) {
        self.highlights.clear();
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    pub fn as_slice(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTE: &str = "Possibly incorrect word";

    fn words(list: &[&str]) -> Vec<FlaggedWord> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn ranges(set: &HighlightSet) -> Vec<(usize, usize)> {
        set.iter().map(|h| (h.range.start, h.range.end)).collect()
    }

    #[test]
    fn test_search_does_not_overlap() {
        let set = HighlightSet::locate(&words(&["aa"]), "aa", NOTE);
        assert_eq!(ranges(&set), vec![(0, 2)]);

        let set = HighlightSet::locate(&words(&["aa"]), "aaaaa", NOTE);
        assert_eq!(ranges(&set), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_every_occurrence_marked() {
        let text = "kass ja koer, kass";
        let set = HighlightSet::locate(&words(&["kass", "koer", "hiir"]), text, NOTE);
        assert_eq!(ranges(&set), vec![(0, 4), (14, 18), (8, 12)]);
        assert!(set.iter().all(|h| h.annotation == NOTE));
    }

    #[test]
    fn test_duplicate_words_mark_twice() {
        let set = HighlightSet::locate(&words(&["läheb", "läheb"]), "Tere, kuidas läheb?", NOTE);
        assert_eq!(ranges(&set), vec![(13, 19), (13, 19)]);
    }

    #[test]
    fn test_empty_word_ignored() {
        let set = HighlightSet::locate(&words(&[""]), "abc", NOTE);
        assert!(set.is_empty());
    }

    #[test]
    fn test_prune_removes_only_intersecting() {
        let text = "üks kaks kolm neli";
        let mut set = HighlightSet::locate(&words(&["üks", "kolm", "neli"]), text, NOTE);
        assert_eq!(set.len(), 3);
        let kolm = set.as_slice()[1].clone();

        let removed = set.prune(&[TextChange::new(TextRange::new(11, 12), "")]);
        assert_eq!(removed, 1);
        assert_eq!(set.len(), 2);
        assert!(!set.iter().any(|h| *h == kolm));
        assert_eq!(ranges(&set), vec![(0, 4), (15, 19)]);
    }

    #[test]
    fn test_prune_keeps_offsets_of_survivors() {
        let mut set = HighlightSet::locate(&words(&["neli"]), "üks neli", NOTE);
        // inserting before the word does not move it
        let removed = set.prune(&[TextChange::new(TextRange::caret(0), "null ")]);
        assert_eq!(removed, 0);
        assert_eq!(ranges(&set), vec![(5, 9)]);
    }

    #[test]
    fn test_prune_batch() {
        let mut set = HighlightSet::locate(&words(&["a", "b", "c"]), "a b c", NOTE);
        let removed = set.prune(&[
            TextChange::new(TextRange::new(0, 1), "x"),
            TextChange::new(TextRange::new(4, 5), "y"),
        ]);
        assert_eq!(removed, 2);
        assert_eq!(ranges(&set), vec![(2, 3)]);
    }
}

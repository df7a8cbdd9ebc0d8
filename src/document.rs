use crate::error::{Result, SpellerError};
use crate::parser::MarkupProfile;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// Half-open byte range into a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Touching ranges intersect: typing right after a word edits that word.
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// One edit of a change batch. Every range in a batch refers to the text
/// as it was before the batch was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub range: TextRange,
    pub text: String,
}

impl TextChange {
    pub fn new(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub profile: MarkupProfile,
    /// Empty selection is the cursor.
    pub selection: TextRange,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, profile: MarkupProfile) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            profile,
            selection: TextRange::default(),
        }
    }

    pub fn with_selection(mut self, selection: TextRange) -> Self {
        self.selection = selection;
        self
    }

    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(range.start..range.end)
    }

    /// The selected text, or the whole document when nothing is selected.
    pub fn text_to_check(&self) -> &str {
        if self.selection.is_empty() {
            return &self.text;
        }
        self.slice(self.selection).unwrap_or(&self.text)
    }

    /// Range of the word at (or ending at) `offset`, using Unicode word boundaries.
    pub fn word_range_at(&self, offset: usize) -> Option<TextRange> {
        self.text
            .split_word_bound_indices()
            .filter(|(_, segment)| segment.chars().any(char::is_alphanumeric))
            .map(|(start, segment)| TextRange::new(start, start + segment.len()))
            .find(|range| range.start <= offset && offset <= range.end)
    }

    /// Apply a batch of edits. The text is untouched if any edit is invalid.
    pub fn apply_changes(&mut self, changes: &[TextChange]) -> Result<()> {
        let mut ordered: Vec<&TextChange> = changes.iter().collect();
        ordered.sort_by_key(|change| std::cmp::Reverse(change.range.start));

        for pair in ordered.windows(2) {
            if pair[1].range.end > pair[0].range.start {
                return Err(SpellerError::InvalidEdit(format!(
                    "overlapping ranges {}..{} and {}..{}",
                    pair[1].range.start, pair[1].range.end, pair[0].range.start, pair[0].range.end
                )));
            }
        }

        for change in &ordered {
            let TextRange { start, end } = change.range;
            if start > end
                || end > self.text.len()
                || !self.text.is_char_boundary(start)
                || !self.text.is_char_boundary(end)
            {
                return Err(SpellerError::InvalidEdit(format!(
                    "range {}..{} is outside the document ({} bytes)",
                    start,
                    end,
                    self.text.len()
                )));
            }
        }

        // Back to front, so earlier offsets stay valid
        for change in ordered {
            self.text.replace_range(change.range.start..change.range.end, &change.text);
        }

        Ok(())
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub fn position_at(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let before = self.text.get(..offset).unwrap_or(&self.text);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    /// Byte offset of a 1-based line and column; clamps to the end of the line.
    pub fn offset_at(&self, line: usize, column: usize) -> Option<usize> {
        let mut line_start = 0;
        for (index, text) in self.text.split('\n').enumerate() {
            if index + 1 == line {
                let within = text
                    .char_indices()
                    .nth(column.saturating_sub(1))
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                return Some(line_start + within);
            }
            line_start += text.len() + 1;
        }
        None
    }
}

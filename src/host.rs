use crate::config::HighlightStyle;
use crate::document::Document;
use crate::highlight::Highlight;

/// What the editor provides to a session.
pub trait Host {
    fn show_info(&self, message: &str);

    fn show_error(&self, message: &str);

    /// Single-choice menu. `None` when the user backs out.
    fn pick(&self, items: &[String]) -> Option<String>;

    /// Replace whatever was drawn for `document` with `highlights`.
    fn render(&self, document: &Document, style: &HighlightStyle, highlights: &[Highlight]);
}

use crate::client::SpellService;
use crate::config::HighlightStyle;
use crate::document::{Document, TextChange, TextRange};
use crate::error::{Result, SpellerError};
use crate::highlight::HighlightSet;
use crate::host::Host;
use crate::parser::CheckRequest;
use crate::scraper;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    NoIssues,
    Highlighted {
        /// Flagged words, duplicates included
        mistakes: usize,
        occurrences: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    NoSuggestions,
    Cancelled,
    Replaced {
        original: String,
        replacement: String,
        range: TextRange,
    },
}

#[derive(Default)]
struct SessionState {
    document: Option<Document>,
    highlights: HighlightSet,
}

/// Per-editor state and the two commands that act on it.
///
/// Commands take `&self` and release the state lock before awaiting the
/// service, so two checks may be in flight at once. Whichever finishes
/// last owns the highlights.
pub struct Session<S, H> {
    service: S,
    host: H,
    style: HighlightStyle,
    state: Mutex<SessionState>,
}

impl<S: SpellService, H: Host> Session<S, H> {
    pub fn new(service: S, host: H, style: HighlightStyle) -> Self {
        Self {
            service,
            host,
            style,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make `document` the active one. Previous highlights are dropped.
    pub fn open(&self, document: Document) {
        let mut state = self.lock();
        state.highlights.clear();
        state.document = Some(document);
    }

    pub fn close(&self) {
        let mut state = self.lock();
        state.highlights.clear();
        state.document = None;
    }

    pub fn set_selection(&self, selection: TextRange) {
        if let Some(document) = self.lock().document.as_mut() {
            document.selection = selection;
        }
    }

    pub fn document(&self) -> Option<Document> {
        self.lock().document.clone()
    }

    pub fn highlights(&self) -> HighlightSet {
        self.lock().highlights.clone()
    }

    /// Check the selection (or the whole document) and highlight what the
    /// service flags.
    pub async fn check_grammar(&self) -> Result<CheckOutcome> {
        let result = self.run_check().await;

        match &result {
            Ok(CheckOutcome::NoIssues) => self.host.show_info("No grammatical issues found."),
            Ok(CheckOutcome::Highlighted { mistakes, .. }) => self.host.show_info(&format!(
                "Grammar check complete: Found {} mistake(s).",
                mistakes
            )),
            Err(SpellerError::EmptyInput) => self.host.show_info("No text to check."),
            Err(e @ SpellerError::Transport { .. }) => {
                self.host.show_error(&format!("Error checking grammar: {}", e))
            }
            Err(e) => self.host.show_error(&e.to_string()),
        }

        result
    }

    async fn run_check(&self) -> Result<CheckOutcome> {
        let (id, request) = {
            let state = self.lock();
            let document = state
                .document
                .as_ref()
                .ok_or(SpellerError::NoActiveDocument)?;
            (
                document.id.clone(),
                CheckRequest::new(document.text_to_check(), document.profile),
            )
        };

        let text = request.prepare()?;
        let html = self.service.check(&text).await?;

        let words = scraper::flagged_words(&html);
        if words.is_empty() {
            return Ok(CheckOutcome::NoIssues);
        }

        let mut state = self.lock();
        let SessionState {
            document,
            highlights,
        } = &mut *state;
        let document = match document.as_ref() {
            Some(document) if document.id == id => document,
            _ => {
                log::debug!("{} is no longer active, dropping check result", id);
                return Err(SpellerError::NoActiveDocument);
            }
        };

        // Positions come from the text as it is now, not as it was sent
        *highlights = HighlightSet::locate(&words, &document.text, &self.style.hover_message);
        self.host.render(document, &self.style, highlights.as_slice());

        log::debug!(
            "{} flagged words, {} highlights in {}",
            words.len(),
            highlights.len(),
            id
        );

        Ok(CheckOutcome::Highlighted {
            mistakes: words.len(),
            occurrences: highlights.len(),
        })
    }

    /// Look up replacements for the selection or the word at the cursor and
    /// apply the one the user picks.
    pub async fn suggest(&self) -> Result<SuggestOutcome> {
        let result = self.run_suggest().await;

        match &result {
            Ok(SuggestOutcome::NoSuggestions) => self.host.show_info("No suggestions found."),
            Ok(_) => {}
            Err(SpellerError::NoWordAtCursor) => {
                self.host.show_info(&SpellerError::NoWordAtCursor.to_string())
            }
            Err(e @ SpellerError::Transport { .. }) => {
                self.host.show_error(&format!("Error fetching suggestions: {}", e))
            }
            Err(e) => self.host.show_error(&e.to_string()),
        }

        result
    }

    async fn run_suggest(&self) -> Result<SuggestOutcome> {
        let (id, range, word) = {
            let state = self.lock();
            let document = state
                .document
                .as_ref()
                .ok_or(SpellerError::NoActiveDocument)?;

            let range = if document.selection.is_empty() {
                document
                    .word_range_at(document.selection.start)
                    .ok_or(SpellerError::NoWordAtCursor)?
            } else {
                document.selection
            };
            let word = document
                .slice(range)
                .ok_or(SpellerError::NoWordAtCursor)?
                .to_string();

            (document.id.clone(), range, word)
        };

        let html = self.service.suggest(&word).await?;
        let suggestions = scraper::suggestions(&html);
        if suggestions.is_empty() {
            return Ok(SuggestOutcome::NoSuggestions);
        }

        let Some(replacement) = self.host.pick(&suggestions) else {
            return Ok(SuggestOutcome::Cancelled);
        };

        // The document may have been switched while the menu was up
        if self
            .edit_document(&id, &[TextChange::new(range, replacement.clone())])?
            .is_none()
        {
            log::debug!("{} is no longer active, dropping replacement", id);
            return Err(SpellerError::NoActiveDocument);
        }

        Ok(SuggestOutcome::Replaced {
            original: word,
            replacement,
            range,
        })
    }

    /// Apply an edit batch from the editor and drop the highlights it
    /// touches. Changes to any other document are ignored.
    ///
    /// Surviving highlights keep their offsets, so ones after an insertion
    /// or deletion may end up slightly off.
    pub fn on_document_change(&self, id: &str, changes: &[TextChange]) -> Result<usize> {
        Ok(self.edit_document(id, changes)?.unwrap_or(0))
    }

    /// `None` when `id` is not the active document.
    fn edit_document(&self, id: &str, changes: &[TextChange]) -> Result<Option<usize>> {
        let mut state = self.lock();
        let SessionState {
            document,
            highlights,
        } = &mut *state;

        let Some(document) = document.as_mut().filter(|d| d.id == id) else {
            return Ok(None);
        };

        document.apply_changes(changes)?;
        let removed = highlights.prune(changes);
        self.host.render(document, &self.style, highlights.as_slice());

        Ok(Some(removed))
    }
}

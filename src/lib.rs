pub mod cli;
pub mod client;
pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod host;
pub mod parser;
pub mod scraper;
pub mod session;

pub use client::{HttpSpellService, SpellService};
pub use config::Config;
pub use document::{Document, TextChange, TextRange};
pub use error::SpellerError;
pub use highlight::{Highlight, HighlightSet};
pub use host::Host;
pub use parser::MarkupProfile;
pub use session::{CheckOutcome, Session, SuggestOutcome};

/// A word the remote service judged incorrect. Positions are found later
/// by searching the document text.
pub type FlaggedWord = String;

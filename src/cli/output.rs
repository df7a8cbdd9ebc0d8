use crate::client::SpellService;
use crate::config::HighlightStyle;
use crate::document::Document;
use crate::error::Result;
use crate::highlight::Highlight;
use crate::host::Host;
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonHighlight {
    line: usize,
    column: usize,
    start: usize,
    end: usize,
    word: String,
    annotation: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    file: String,
    total_highlights: usize,
    highlights: Vec<JsonHighlight>,
}

/// The terminal as an editor: messages on stdout/stderr, highlights as a
/// listing, suggestions through an interactive menu.
pub struct TerminalHost {
    format: OutputFormat,
    colored: bool,
}

impl TerminalHost {
    pub fn new(format: OutputFormat, colored: bool) -> Self {
        if !colored {
            colored::control::set_override(false);
        }
        Self { format, colored }
    }
}

impl Host for TerminalHost {
    fn show_info(&self, message: &str) {
        // stdout stays valid JSON
        if self.format == OutputFormat::Json {
            eprintln!("{}", message);
        } else if self.colored {
            println!("\n{}", message.bold());
        } else {
            println!("\n{}", message);
        }
    }

    fn show_error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("✗ {}", message);
        }
    }

    fn pick(&self, items: &[String]) -> Option<String> {
        let theme = ColorfulTheme::default();
        let choice = Select::with_theme(&theme)
            .with_prompt("Replace with (Esc to cancel)")
            .items(items)
            .default(0)
            .interact_opt();

        match choice {
            Ok(index) => index.and_then(|i| items.get(i).cloned()),
            Err(e) => {
                log::warn!("Suggestion menu unavailable: {}", e);
                None
            }
        }
    }

    fn render(&self, document: &Document, style: &HighlightStyle, highlights: &[Highlight]) {
        match self.format {
            OutputFormat::Text => print_text_highlights(document, style, highlights, self.colored),
            OutputFormat::Json => print_json_highlights(document, highlights),
        }
    }
}

fn print_text_highlights(
    document: &Document,
    style: &HighlightStyle,
    highlights: &[Highlight],
    colored_output: bool,
) {
    if highlights.is_empty() {
        return;
    }

    if colored_output {
        println!("\n{}", document.id.bold().underline());
    } else {
        println!("\n{}", document.id);
    }

    let mut sorted: Vec<&Highlight> = highlights.iter().collect();
    sorted.sort_by_key(|h| h.range.start);

    for highlight in sorted {
        // Stale ranges after edits may no longer land on text
        let Some(word) = document.slice(highlight.range) else {
            continue;
        };
        let (line, column) = document.position_at(highlight.range.start);
        let line_info = format!("{}:{}", line, column);
        let context = line_context(document, highlight, style, colored_output);

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                word.color(Color::from(style.color.as_str())).bold(),
                context
            );
        } else {
            println!("  {} {} {}", line_info, word, context);
        }
    }
}

/// The line around a highlight with the word marked
fn line_context(
    document: &Document,
    highlight: &Highlight,
    style: &HighlightStyle,
    colored_output: bool,
) -> String {
    let text = &document.text;
    let range = highlight.range;
    let line_start = text[..range.start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[range.end..]
        .find('\n')
        .map(|i| range.end + i)
        .unwrap_or(text.len());

    let before = text[line_start..range.start].trim_start();
    let word = &text[range.start..range.end];
    let after = text[range.end..line_end].trim_end();

    if colored_output {
        format!(
            "{}{}{}",
            before.dimmed(),
            word.on_color(Color::from(style.color.as_str())),
            after.dimmed()
        )
    } else {
        format!("{}[{}]{}", before, word, after)
    }
}

pub fn print_json_highlights(document: &Document, highlights: &[Highlight]) {
    let json_highlights: Vec<JsonHighlight> = highlights
        .iter()
        .filter_map(|h| {
            let word = document.slice(h.range)?;
            let (line, column) = document.position_at(h.range.start);
            Some(JsonHighlight {
                line,
                column,
                start: h.range.start,
                end: h.range.end,
                word: word.to_string(),
                annotation: h.annotation.clone(),
            })
        })
        .collect();

    let output = JsonOutput {
        file: document.id.clone(),
        total_highlights: json_highlights.len(),
        highlights: json_highlights,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize highlights: {}", e),
    }
}

pub fn print_replacement(original: &str, replacement: &str, written: bool, colored: bool) {
    let target = if written { "file updated" } else { "dry run" };
    if colored {
        println!(
            "{} {} → {} ({})",
            "✓".green().bold(),
            original.red(),
            replacement.green().bold(),
            target.dimmed()
        );
    } else {
        println!("✓ {} → {} ({})", original, replacement, target);
    }
}

/// Shows a spinner on stderr while the wrapped service is waited on
pub struct WithSpinner<S> {
    inner: S,
}

impl<S> WithSpinner<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

impl<S: SpellService> SpellService for WithSpinner<S> {
    async fn check(&self, text: &str) -> Result<String> {
        let pb = spinner("Checking...");
        let result = self.inner.check(text).await;
        pb.finish_and_clear();
        result
    }

    async fn suggest(&self, word: &str) -> Result<String> {
        let pb = spinner(&format!("Looking up suggestions for '{}'...", word));
        let result = self.inner.suggest(word).await;
        pb.finish_and_clear();
        result
    }
}

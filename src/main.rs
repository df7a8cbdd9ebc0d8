use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use speller::cli::output::{self, OutputFormat, TerminalHost, WithSpinner};
use speller::cli::{Position, Selection};
use speller::{
    CheckOutcome, Config, Document, HttpSpellService, MarkupProfile, Session, SpellerError,
    SuggestOutcome, TextRange,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "speller")]
#[command(version, about = "Highlight words a remote spelling service flags", long_about = None)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log requests and decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ./.speller.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the grammar-check endpoint
    #[arg(long, global = true, env = "SPELLER_CHECK_URL")]
    check_url: Option<String>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Check a file, or part of it, and list flagged words
    Check {
        file: PathBuf,

        /// Only check this part, e.g. 3:1-5:20
        #[arg(short, long)]
        selection: Option<Selection>,

        /// Editor language id (e.g. latex); detected from the extension otherwise
        #[arg(short, long)]
        language: Option<String>,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Exit with code 0 even if mistakes are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Look up replacements for one word and apply the chosen one
    Suggest {
        file: PathBuf,

        /// Position of the word, e.g. 2:14
        #[arg(long, conflicts_with = "selection")]
        at: Option<Position>,

        /// Exact text to replace, e.g. 2:10-2:16
        #[arg(short, long)]
        selection: Option<Selection>,

        /// Print the edited text instead of writing the file
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "speller", &mut io::stdout());
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command given. Use --help for usage information.");
    };

    let config = Config::load(cli.config.clone(), cli.check_url.clone())?;
    let colored = !cli.no_color;

    match command {
        Commands::Check {
            file,
            selection,
            language,
            format,
            no_fail,
        } => {
            let profile = match language {
                Some(id) => MarkupProfile::from_language_id(&id),
                None => MarkupProfile::from_path(&file, &config.latex_extensions),
            };
            let mut document = open_document(&file, profile)?;
            if let Some(selection) = selection {
                document.selection = resolve_selection(&document, &selection)?;
            }

            let session = Session::new(
                WithSpinner::new(HttpSpellService::new(config.service.clone())),
                TerminalHost::new(format, colored),
                config.highlight.clone(),
            );
            session.open(document);

            match session.check_grammar().await {
                Ok(CheckOutcome::Highlighted { .. }) if !no_fail => std::process::exit(1),
                // Nothing was rendered, but JSON readers still expect a document
                Ok(CheckOutcome::NoIssues) if format == OutputFormat::Json => {
                    if let Some(document) = session.document() {
                        output::print_json_highlights(&document, &[]);
                    }
                }
                Ok(_) | Err(SpellerError::EmptyInput) => {}
                Err(_) => std::process::exit(2),
            }
        }
        Commands::Suggest {
            file,
            at,
            selection,
            dry_run,
        } => {
            let profile = MarkupProfile::from_path(&file, &config.latex_extensions);
            let mut document = open_document(&file, profile)?;
            document.selection = match (selection, at) {
                (Some(selection), _) => resolve_selection(&document, &selection)?,
                (None, Some(at)) => TextRange::caret(
                    at.resolve(&document)
                        .with_context(|| format!("{} is outside {}", at, file.display()))?,
                ),
                (None, None) => TextRange::caret(0),
            };

            let session = Session::new(
                WithSpinner::new(HttpSpellService::new(config.service.clone())),
                TerminalHost::new(OutputFormat::Text, colored),
                config.highlight.clone(),
            );
            session.open(document);

            match session.suggest().await {
                Ok(SuggestOutcome::Replaced {
                    original,
                    replacement,
                    ..
                }) => {
                    let edited = session
                        .document()
                        .context("Document closed while editing")?;
                    if dry_run {
                        print!("{}", edited.text);
                    } else {
                        fs::write(&file, &edited.text).with_context(|| {
                            format!("Failed to write file: {}", file.display())
                        })?;
                    }
                    output::print_replacement(&original, &replacement, !dry_run, colored);
                }
                Ok(_) | Err(SpellerError::NoWordAtCursor) => {}
                Err(_) => std::process::exit(2),
            }
        }
    }

    Ok(())
}

fn open_document(file: &Path, profile: MarkupProfile) -> Result<Document> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    Ok(Document::new(file.display().to_string(), content, profile))
}

fn resolve_selection(document: &Document, selection: &Selection) -> Result<TextRange> {
    selection
        .resolve(document)
        .with_context(|| format!("Selection {} is outside {}", selection, document.id))
}

use phrasing::config::Config;
use phrasing::editor::{Editor, TextBuffer};
use phrasing::format::FormatterId;
use phrasing::phrase::{ChunkParser, FormatSession};

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "phrasing", about = "Format dictated text for the cursor position")]
struct Cli {
    /// Config file (defaults to ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format text as if inserted between --before and --after
    Format {
        /// Formatter names, e.g. "upper snake" or "previous"
        directive: String,
        #[arg(required = true)]
        text: Vec<String>,
        #[arg(long, default_value = "")]
        before: String,
        #[arg(long, default_value = "")]
        after: String,
    },
    /// Reformat the last words of --before
    Reformat {
        directive: String,
        /// Number of words to reformat
        words: usize,
        #[arg(long)]
        before: String,
        #[arg(long, default_value = "")]
        after: String,
    },
    /// List the available formatters
    List,
    /// Show how an utterance splits into chunks
    Parse {
        #[arg(required = true)]
        utterance: Vec<String>,
    },
    /// Read utterances from stdin, one per line, and insert them
    Listen {
        /// Type into the focused application instead of an in-memory buffer
        #[cfg(feature = "typing")]
        #[arg(long)]
        keyboard: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.log_level, cli.verbose);

    match cli.command {
        Command::Format {
            directive,
            text,
            before,
            after,
        } => {
            let mut buffer = TextBuffer::with_text(&before, &after);
            FormatSession::new()
                .insert_formatted(&mut buffer, &text.join(" "), &directive)
                .with_context(|| format!("failed to format with '{}'", directive))?;
            println!("{}", buffer.text());
        }
        Command::Reformat {
            directive,
            words,
            before,
            after,
        } => {
            let mut buffer = TextBuffer::with_text(&before, &after);
            FormatSession::new()
                .reformat_left(&mut buffer, &directive, words)
                .with_context(|| format!("failed to reformat with '{}'", directive))?;
            println!("{}", buffer.text());
        }
        Command::List => list_formatters(),
        Command::Parse { utterance } => {
            let parsed = chunk_parser(&config).parse(&utterance.join(" "));
            match parsed.directive {
                Some(directive) => println!("directive: {}", directive),
                None => println!(
                    "directive: {} (default)",
                    config.formatting.default_directive
                ),
            }
            for chunk in &parsed.chunks {
                println!("  {:?}", chunk);
            }
        }
        #[cfg(feature = "typing")]
        Command::Listen { keyboard: true } => {
            let mut editor = phrasing::editor::KeyboardEditor::new(config.input.method)?;
            listen(&config, &mut editor, |_| {})?;
        }
        #[cfg(feature = "typing")]
        Command::Listen { keyboard: false } => {
            let mut buffer = TextBuffer::new();
            listen(&config, &mut buffer, |b| println!("{}", b.text()))?;
        }
        #[cfg(not(feature = "typing"))]
        Command::Listen {} => {
            let mut buffer = TextBuffer::new();
            listen(&config, &mut buffer, |b| println!("{}", b.text()))?;
        }
    }

    Ok(())
}

fn init_logging(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn chunk_parser(config: &Config) -> ChunkParser {
    ChunkParser::new()
        .with_active_symbols(&config.vocabulary.active_symbols)
        .with_file_suffixes(&config.vocabulary.file_suffixes)
}

fn list_formatters() {
    for id in FormatterId::ALL {
        let kind = if id.is_standalone() {
            "standalone"
        } else {
            "chainable"
        };
        let aliases = id.aliases();
        if aliases.is_empty() {
            println!("{:<10} {:<11} {}", id.name(), kind, id.description());
        } else {
            println!(
                "{:<10} {:<11} {} (also: {})",
                id.name(),
                kind,
                id.description(),
                aliases.join(", ")
            );
        }
    }
}

/// Insert each line read from stdin as a phrase.
///
/// Stdin is read on its own thread; every phrase is processed here, so the
/// session's last-used formatter has one owner.
fn listen<E: Editor>(
    config: &Config,
    editor: &mut E,
    mut after_phrase: impl FnMut(&E),
) -> anyhow::Result<()> {
    let parser = chunk_parser(config);
    let mut session = FormatSession::new();

    let (line_tx, line_rx) = flume::unbounded::<String>();

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
    });

    tracing::info!("listening for phrases on stdin");

    while let Ok(line) = line_rx.recv() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parsed = parser.parse(line);
        let directive = parsed
            .directive
            .as_deref()
            .unwrap_or(&config.formatting.default_directive);

        match session.insert_phrase(editor, &parsed.chunks, directive) {
            Ok(()) => after_phrase(editor),
            Err(e) => tracing::warn!(error = %e, phrase = line, "phrase rejected"),
        }
    }

    Ok(())
}

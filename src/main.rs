//! Binary entrypoint for the Idiomix CLI.
//!
//! Commands:
//! - `play [--idioms <csv>] [--seed <n>] [--show-meanings]` - play one game on the terminal
//! - `init` - create a starter `config.toml`
//! - `stats [--idioms <csv>]` - print dataset size and per-letter counts as JSON
//! - `tag <phrase>` - show how the tagger reads a phrase and whether it passes as an idiom
//!
//! See the library crate docs for module-level details: `idiomix::`.
use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use idiomix::config::Config;
use idiomix::game::{
    run_session, IdiomBook, LexiconTagger, PosTagger, Session, SessionSettings, TaggedToken,
    ValidityChecker,
};

#[derive(Parser)]
#[command(name = "idiomix")]
#[command(about = "An idiom relay chatbot for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game of idiom relay
    Play {
        /// Idiom CSV file (overrides [idioms].source)
        #[arg(short, long)]
        idioms: Option<String>,

        /// RNG seed for a reproducible game (overrides [idioms].seed)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the meaning after each of the bot's idioms
        #[arg(long)]
        show_meanings: bool,
    },
    /// Write a default configuration file
    Init,
    /// Show dataset statistics
    Stats {
        /// Idiom CSV file (overrides [idioms].source)
        #[arg(short, long)]
        idioms: Option<String>,
    },
    /// Tag a phrase and report whether it reads like an idiom
    Tag {
        /// Phrase to inspect
        phrase: String,
    },
}

#[derive(Serialize)]
struct DatasetStats<'a> {
    source: &'a str,
    total: usize,
    by_letter: BTreeMap<char, usize>,
}

#[derive(Serialize)]
struct TagReport<'a> {
    phrase: &'a str,
    tokens: Vec<TaggedToken>,
    idiom_like: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config, so it must not depend on one existing
    let config = match cli.command {
        Commands::Init => None,
        _ => match Config::load(&cli.config).await {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                if std::path::Path::new(&cli.config).exists() {
                    return Err(e);
                }
                None
            }
        },
    };
    let interactive = matches!(cli.command, Commands::Play { .. });
    init_logging(&config, cli.verbose, !interactive);
    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Play {
            idioms,
            seed,
            show_meanings,
        } => {
            let source = idioms.unwrap_or_else(|| config.idioms.source.clone());
            let book = Arc::new(
                IdiomBook::load(&source)
                    .with_context(|| format!("cannot start a game without idioms ({})", source))?,
            );
            let tagger = build_tagger(&config)?;
            let rng = match seed.or(config.idioms.seed) {
                Some(seed) => {
                    info!("Using fixed seed {}", seed);
                    StdRng::seed_from_u64(seed)
                }
                None => StdRng::from_entropy(),
            };
            let settings = SessionSettings {
                bot_name: config.bot.name.clone(),
                show_meanings: show_meanings || config.bot.show_meanings,
            };
            info!(
                "Starting Idiomix v{} with {} idioms from {}",
                env!("CARGO_PKG_VERSION"),
                book.len(),
                source
            );
            let mut session = Session::new(book, tagger, rng, settings);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            let score = run_session(&mut session, stdin, &mut stdout).await?;
            info!("Game over with score {}", score);
        }
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                warn!("{} already exists; leaving it untouched", cli.config);
                println!("{} already exists", cli.config);
            } else {
                Config::create_default(&cli.config).await?;
                println!("Created default configuration in {}", cli.config);
                println!("Edit [idioms].source to point at your idiom CSV, then run `idiomix play`.");
            }
        }
        Commands::Stats { idioms } => {
            let source = idioms.unwrap_or_else(|| config.idioms.source.clone());
            let book = IdiomBook::load(&source)
                .with_context(|| format!("failed to load idioms from {}", source))?;
            let stats = DatasetStats {
                source: &source,
                total: book.len(),
                by_letter: book.letter_counts(),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Tag { phrase } => {
            let tagger = build_tagger(&config)?;
            let checker = ValidityChecker::new(tagger.clone());
            let report = TagReport {
                phrase: &phrase,
                tokens: tagger.tag(&phrase),
                idiom_like: checker.is_idiom_like(&phrase),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn build_tagger(config: &Config) -> Result<Arc<dyn PosTagger>> {
    let tagger = match &config.tagger.lexicon_file {
        Some(path) => LexiconTagger::default()
            .with_lexicon_file(path)
            .with_context(|| format!("failed to load lexicon {}", path))?,
        None => LexiconTagger::default(),
    };
    Ok(Arc::new(tagger))
}

/// Set up env_logger. The game writes to stdout, so during play log lines go
/// to the configured file only; other commands also echo them to the console
/// when it is a terminal.
fn init_logging(config: &Option<Config>, verbosity: u8, echo: bool) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|cfg| cfg.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.clone())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });
    let is_tty = atty::is(atty::Stream::Stderr);
    match log_file {
        Some(f) => {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if echo && is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(move |fmt, record| {
                if !echo && verbosity == 0 {
                    return Ok(());
                }
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    }
    let _ = builder.try_init();
}

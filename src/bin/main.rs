//! `spell_review`: interactive spelling review for survey responses.
//!
//! ```bash
//! # review one response per line, resuming any saved state
//! spell_review review --input responses.txt --output checked.txt
//!
//! # replay saved permanent fixes over another file
//! spell_review reapply --input holdout.txt --output holdout_checked.txt
//!
//! # turn customer_service into customer service
//! spell_review split --input checked.txt --output split.txt
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::{style, Stylize};
use speller_core::config::ReviewConfig;
use speller_core::error::{ConfigError, DictionaryError, PersistenceError, ReviewError};
use speller_core::persistence::{load_fix_table, SessionStore};
use speller_core::{
    logger, replace_from_table, split_words, ConsoleOperator, FrequencySpeller, ReviewOutcome,
    ReviewSession, SpellChecker, WordOrder,
};
use std::fs;
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spell_review")]
#[command(version)]
#[command(about = "Review and correct misspelled words in short text responses")]
#[command(long_about = "Flagged words are answered with one of:
  y    replace with the suggestion
  ya   replace this and every later occurrence with the suggestion
  n    keep the word
  na   keep the word and add it to the dictionary
  o    type a custom spelling followed by y or ya, e.g. `colour ya`
  del  drop this response from the output
  ex   stop now and keep what has been reviewed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file; command-line flags take precedence
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OrderArg {
    FirstOccurrence,
    Alphabetical,
}

impl From<OrderArg> for WordOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::FirstOccurrence => WordOrder::FirstOccurrence,
            OrderArg::Alphabetical => WordOrder::Alphabetical,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively review responses (one per line)
    Review {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Dictionary language when no saved dictionary exists
        #[arg(long)]
        lang: Option<String>,

        /// First response index to review; earlier ones are copied as-is
        #[arg(long)]
        start: Option<usize>,

        /// Order in which a response's flagged words are asked about
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        #[arg(long)]
        state_dir: Option<PathBuf>,

        #[arg(long)]
        dictionary_dir: Option<PathBuf>,

        #[arg(long)]
        no_color: bool,
    },

    /// Apply saved permanent fixes to responses without prompting
    Reapply {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Fix table JSON; defaults to the one in the state directory
        #[arg(long, conflicts_with = "state_dir")]
        fix_table: Option<PathBuf>,

        #[arg(long)]
        state_dir: Option<PathBuf>,
    },

    /// Replace underscores inside tokens with spaces
    Split {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Failed to access {path:?}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No fix table found at {0:?}")]
    MissingFixTable(PathBuf),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{} {e}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ReviewConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.log_level = "debug".to_string();
    }

    match cli.command {
        Commands::Review {
            input,
            output,
            lang,
            start,
            order,
            state_dir,
            dictionary_dir,
            no_color,
        } => {
            if let Some(lang) = lang {
                config.language = lang;
            }
            if let Some(start) = start {
                config.start_index = start;
            }
            if let Some(order) = order {
                config.word_order = order.into();
            }
            if let Some(dir) = state_dir {
                config.state_dir = dir;
            }
            if let Some(dir) = dictionary_dir {
                config.dictionary_dir = dir;
            }
            if no_color {
                config.color = false;
            }
            init_logging(&config);
            review(&config, &input, &output)
        }
        Commands::Reapply {
            input,
            output,
            fix_table,
            state_dir,
        } => {
            if let Some(dir) = state_dir {
                config.state_dir = dir;
            }
            init_logging(&config);
            let path = fix_table
                .unwrap_or_else(|| SessionStore::new(&config.state_dir).fix_table_path());
            let table = load_fix_table(&path)?.ok_or(CliError::MissingFixTable(path))?;
            let responses = read_responses(&input)?;
            write_responses(&output, &replace_from_table(&responses, &table))?;
            println!(
                "Applied {} fixes to {} responses -> {}",
                table.len(),
                responses.len(),
                output.display()
            );
            Ok(())
        }
        Commands::Split { input, output } => {
            init_logging(&config);
            let responses = read_responses(&input)?;
            write_responses(&output, &split_words(&responses))?;
            println!("Split {} responses -> {}", responses.len(), output.display());
            Ok(())
        }
    }
}

fn init_logging(config: &ReviewConfig) {
    if let Err(e) = logger::initialize(&config.state_dir, config.level_filter()) {
        eprintln!("[WARN] Logging disabled: {e}");
    }
}

fn review(config: &ReviewConfig, input: &Path, output: &Path) -> Result<(), CliError> {
    let responses = read_responses(input)?;
    let store = SessionStore::new(&config.state_dir);

    let speller = match store.load_speller()? {
        Some(speller) => {
            if speller.language() != config.language {
                log::warn!(
                    "Saved dictionary is '{}', ignoring requested language '{}'",
                    speller.language(),
                    config.language
                );
            }
            speller
        }
        None => FrequencySpeller::for_language(
            &config.language,
            &config.dictionary_dir,
            config.dictionary_options(),
        )?,
    };
    if speller.is_empty() {
        log::warn!(
            "Dictionary '{}' has no words; every token will be flagged",
            speller.language()
        );
    }
    let fix_table = store.load_fix_table()?;
    let mut session = ReviewSession::new(speller, fix_table).with_word_order(config.word_order);

    println!("Spell review: {} responses. Type y, ya, n, na, o, del or ex.", responses.len());
    println!("---------------------------------------------------------------");

    let mut operator = ConsoleOperator::new(stdin().lock(), stdout()).with_color(config.color);
    let result = session.run(&responses, config.start_index, &mut operator);

    // dictionary and fix table changes are kept even if operator I/O failed part way
    let (speller, fix_table) = session.into_parts();
    let new_additions = result
        .as_ref()
        .map(|outcome| outcome.new_additions.as_slice())
        .unwrap_or(&[]);
    store.save(&speller, &fix_table, new_additions)?;

    let outcome = result?;
    write_responses(output, &outcome.responses)?;
    print_summary(&outcome, output, config.color);
    Ok(())
}

fn print_summary(outcome: &ReviewOutcome, output: &Path, color: bool) {
    let headline = format!(
        "Saved {} responses to '{}' ({} deleted, {} new dictionary words)",
        outcome.responses.len(),
        output.display(),
        outcome.deleted.len(),
        outcome.new_additions.len()
    );
    println!();
    if color {
        println!("{}", style(headline).green().bold());
    } else {
        println!("{headline}");
    }
    if !outcome.new_additions.is_empty() {
        println!("New words: {}", outcome.new_additions.join(", "));
    }
    if let Some(index) = outcome.exited_at {
        let reason = if outcome.input_closed { "input ended" } else { "ex" };
        println!("Stopped early at index {index} ({reason}); later responses were not written");
    }
}

fn read_responses(path: &Path) -> Result<Vec<String>, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

fn write_responses(path: &Path, responses: &[String]) -> Result<(), CliError> {
    let mut content = responses.join("\n");
    if !responses.is_empty() {
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })
}

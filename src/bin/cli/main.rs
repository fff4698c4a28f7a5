mod app;
mod commands;
mod render;

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vocab_lib::scores::{CreateScoreRequest, TestType};
use vocab_lib::vocabulary::{CreateWordRequest, Difficulty, WordFilter};

#[derive(Parser)]
#[command(name = "vocab-cli", about = "IELTS vocabulary tracker CLI", version)]
struct Cli {
    /// Config file (default: <config dir>/ielts-vocab/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word
    Add {
        english: String,
        vietnamese: String,
        /// Sentence the word was met in
        #[arg(long)]
        context: Option<String>,
        /// Example sentence (repeatable)
        #[arg(long = "example")]
        examples: Vec<String>,
        /// Comma-separated synonyms
        #[arg(long)]
        synonyms: Option<String>,
        /// Comma-separated antonyms
        #[arg(long)]
        antonyms: Option<String>,
        /// Comma-separated collocations
        #[arg(long)]
        collocations: Option<String>,
        /// Comma-separated categories
        #[arg(long)]
        category: Option<String>,
        /// IELTS band 5-8
        #[arg(long)]
        band: Option<u8>,
        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// List words
    List {
        /// Substring of the English or Vietnamese text
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        band: Option<u8>,
    },

    /// Show one word (id, id prefix or English text)
    Show { word: String },

    /// Delete a word (id, id prefix or English text)
    Delete { word: String },

    /// Words due for review today
    Due {
        /// Maximum words (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record a review result
    Review {
        /// Word id, id prefix or English text
        word: String,
        /// correct or incorrect
        result: String,
        /// flashcard, quiz or matching
        #[arg(long, default_value = "flashcard")]
        mode: String,
    },

    /// Review statistics
    Stats,

    /// Categories with word counts
    Categories,

    /// IELTS test scores
    #[command(subcommand)]
    Score(ScoreCommand),

    /// Writing and speaking work samples
    #[command(subcommand)]
    Sample(SampleCommand),

    /// Most frequent words across a skill's samples
    Freq {
        /// writing or speaking
        skill: String,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ScoreCommand {
    /// Record a test result
    Add {
        /// Test date (YYYY-MM-DD)
        date: String,
        listening: f32,
        reading: f32,
        writing: f32,
        speaking: f32,
        /// Record as a General Training test
        #[arg(long)]
        general: bool,
        #[arg(long)]
        notes: Option<String>,
    },

    /// List recorded tests
    List,

    /// Progress summary
    Summary,
}

#[derive(Subcommand)]
enum SampleCommand {
    /// Submit an essay or transcript
    Submit {
        /// writing or speaking
        skill: String,
        title: String,
        /// Sample text (use "-" or pipe to read from stdin)
        #[arg(long)]
        text: Option<String>,
    },

    /// List samples for a skill
    List {
        /// writing or speaking
        skill: String,
    },
}

/// Resolve "-" or piped stdin into text
fn resolve_text(text: Option<String>) -> Option<String> {
    match text.as_deref() {
        Some("-") => read_stdin(),
        Some(_) => text,
        None if !std::io::stdin().is_terminal() => read_stdin(),
        None => None,
    }
}

fn read_stdin() -> Option<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).ok()?;
    if buf.trim().is_empty() {
        None
    } else {
        Some(buf)
    }
}

/// Split a comma-separated option into trimmed entries
fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;
    let format = &cli.format;

    match cli.command {
        Command::Add {
            english,
            vietnamese,
            context,
            examples,
            synonyms,
            antonyms,
            collocations,
            category,
            band,
            difficulty,
        } => {
            let request = CreateWordRequest {
                english,
                vietnamese,
                context,
                examples,
                synonyms: split_list(synonyms),
                antonyms: split_list(antonyms),
                collocations: split_list(collocations),
                ielts_band: band,
                category: split_list(category),
                difficulty: difficulty.map(|d| d.parse::<Difficulty>()).transpose()?,
                pronunciation: None,
            };
            commands::words::run_add(&app, request, format, use_color)?;
        }
        Command::List {
            query,
            category,
            difficulty,
            band,
        } => {
            let filter = WordFilter {
                query,
                category,
                difficulty: difficulty.map(|d| d.parse::<Difficulty>()).transpose()?,
                band,
            };
            commands::words::run_list(&app, &filter, format, use_color)?;
        }
        Command::Show { word } => commands::words::run_show(&app, &word, format, use_color)?,
        Command::Delete { word } => commands::words::run_delete(&app, &word, format)?,
        Command::Categories => commands::words::run_categories(&app, format)?,
        Command::Due { limit } => commands::review::run_due(&app, limit, format, use_color)?,
        Command::Review { word, result, mode } => {
            commands::review::run_review(&app, &word, &result, &mode, format, use_color)?
        }
        Command::Stats => commands::review::run_stats(&app, format, use_color)?,
        Command::Score(subcmd) => match subcmd {
            ScoreCommand::Add {
                date,
                listening,
                reading,
                writing,
                speaking,
                general,
                notes,
            } => {
                let request = CreateScoreRequest {
                    test_date: date,
                    test_type: if general {
                        TestType::General
                    } else {
                        TestType::Academic
                    },
                    listening,
                    reading,
                    writing,
                    speaking,
                    notes,
                };
                commands::scores::run_add(&app, request, format, use_color)?;
            }
            ScoreCommand::List => commands::scores::run_list(&app, format, use_color)?,
            ScoreCommand::Summary => commands::scores::run_summary(&app, format, use_color)?,
        },
        Command::Sample(subcmd) => match subcmd {
            SampleCommand::Submit { skill, title, text } => {
                let text = resolve_text(text).unwrap_or_default();
                commands::samples::run_submit(&app, &skill, title, text, format)?;
            }
            SampleCommand::List { skill } => commands::samples::run_list(&app, &skill, format, use_color)?,
        },
        Command::Freq { skill, limit } => commands::samples::run_freq(&app, &skill, limit, format)?,
    }

    Ok(())
}

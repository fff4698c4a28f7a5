use anyhow::Result;

use vocab_lib::vocabulary::{self, CreateWordRequest, WordFilter};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_add(app: &App, request: CreateWordRequest, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = vocabulary::create_word(app.store.as_ref(), request)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&word)?),
        OutputFormat::Plain => {
            println!(
                "Added {} ({})",
                terminal::paint(&word.english, Color::BOLD, use_color),
                word.id
            );
        }
    }
    Ok(())
}

pub fn run_list(app: &App, filter: &WordFilter, format: &OutputFormat, use_color: bool) -> Result<()> {
    let words = vocabulary::search_words(app.store.as_ref(), filter)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&words)?),
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No words found.");
                return Ok(());
            }

            let width = words.iter().map(|w| w.english.chars().count()).max().unwrap_or(7).max(7);
            println!("{:<width$}  {:<5} {:<4} {}", "English", "Level", "Band", "Vietnamese", width = width);
            println!("{}", "\u{2500}".repeat(width + 24));

            for word in &words {
                let english = format!("{:<width$}", word.english, width = width);
                println!(
                    "{}  {} {:<4} {}",
                    terminal::paint(&english, Color::BOLD, use_color),
                    terminal::level_bar(word.srs_level),
                    word.ielts_band,
                    word.vietnamese
                );
            }

            println!("\n{} words", words.len());
        }
    }
    Ok(())
}

pub fn run_show(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = app.find_word(query)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&word)?),
        OutputFormat::Plain => println!("{}", terminal::render_word(&word, use_color)),
    }
    Ok(())
}

pub fn run_delete(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let word = app.find_word(query)?;
    vocabulary::delete_word(app.store.as_ref(), &word.id)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "success": true,
                    "id": word.id,
                }))?
            );
        }
        OutputFormat::Plain => println!("Deleted {} ({})", word.english, word.id),
    }
    Ok(())
}

pub fn run_categories(app: &App, format: &OutputFormat) -> Result<()> {
    let categories = vocabulary::category_counts(app.store.as_ref())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
        OutputFormat::Plain => {
            if categories.is_empty() {
                println!("No categories found.");
                return Ok(());
            }

            let width = categories.iter().map(|c| c.category.len()).max().unwrap_or(8).max(8);
            println!("{:<width$} Count", "Category", width = width + 1);
            println!("{} {}", "\u{2500}".repeat(width + 1), "\u{2500}".repeat(6));
            for entry in &categories {
                println!("{:<width$} {}", entry.category, entry.count, width = width + 1);
            }
            println!("\n{} categories total", categories.len());
        }
    }
    Ok(())
}

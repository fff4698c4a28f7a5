use anyhow::Result;

use vocab_lib::samples::{SampleSkill, SubmitSampleRequest};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_submit(app: &App, skill: &str, title: String, text: String, format: &OutputFormat) -> Result<()> {
    let skill: SampleSkill = skill.parse()?;
    let sample = app.samples.submit_sample(skill, SubmitSampleRequest { title, text })?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sample)?),
        OutputFormat::Plain => {
            println!("Stored {} sample '{}' ({} words)", skill, sample.title, sample.word_count);
        }
    }
    Ok(())
}

pub fn run_list(app: &App, skill: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let skill: SampleSkill = skill.parse()?;
    let samples = app.samples.list_samples(skill)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
        OutputFormat::Plain => {
            if samples.is_empty() {
                println!("No {} samples.", skill);
                return Ok(());
            }
            for sample in &samples {
                let title = if sample.title.is_empty() { "(untitled)" } else { &sample.title };
                println!(
                    "{}  {}  {} words",
                    sample.submitted_at.format("%Y-%m-%d %H:%M"),
                    terminal::paint(title, Color::BOLD, use_color),
                    sample.word_count
                );
                let preview: String = sample.text.chars().take(76).collect();
                println!("    {}", terminal::paint(preview.trim(), Color::DIM, use_color));
            }
        }
    }
    Ok(())
}

pub fn run_freq(app: &App, skill: &str, limit: usize, format: &OutputFormat) -> Result<()> {
    let skill: SampleSkill = skill.parse()?;
    let words = app.samples.top_words(skill, limit)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&words)?),
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No {} samples yet.", skill);
                return Ok(());
            }

            let width = words.iter().map(|w| w.word.len()).max().unwrap_or(4).max(4);
            println!("{:<width$} Count", "Word", width = width + 1);
            println!("{} {}", "\u{2500}".repeat(width + 1), "\u{2500}".repeat(6));
            for entry in &words {
                println!("{:<width$} {}", entry.word, entry.count, width = width + 1);
            }
        }
    }
    Ok(())
}

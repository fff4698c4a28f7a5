use anyhow::{bail, Result};
use chrono::Utc;

use vocab_lib::srs::{self, format_interval, local_day, ReviewRequest};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run_due(app: &App, limit: Option<usize>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = local_day(Utc::now());
    let limit = limit.unwrap_or(app.config.review.due_limit);
    let queue = srs::due_queue(app.store.as_ref(), today, limit)?;
    let (total, words) = (queue.count, &queue.words);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&queue)?),
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("Nothing due today.");
                return Ok(());
            }

            let scheduler = app.recorder.scheduler();
            for word in words {
                let preview = scheduler.preview(word.srs_level, today)?;
                let overdue = match word.next_review {
                    None => terminal::paint("new", Color::CYAN, use_color),
                    Some(d) if d < today => terminal::paint(
                        &format!("{} overdue", format_interval((today - d).num_days())),
                        Color::YELLOW,
                        use_color,
                    ),
                    Some(_) => "today".to_string(),
                };
                println!(
                    "{} {}  {}  [{}]",
                    terminal::level_bar(word.srs_level),
                    terminal::paint(&word.english, Color::BOLD, use_color),
                    word.vietnamese,
                    overdue
                );
                println!(
                    "      correct: {}  incorrect: {}",
                    format_interval((preview.correct.next_review - today).num_days()),
                    format_interval((preview.incorrect.next_review - today).num_days())
                );
            }

            if total > words.len() {
                println!("\n{} of {} due words shown", words.len(), total);
            } else {
                println!("\n{} words due", total);
            }
        }
    }
    Ok(())
}

pub fn run_review(
    app: &App,
    query: &str,
    result: &str,
    mode: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let word = app.find_word(query)?;
    let request = ReviewRequest::new(word.id, result, mode);
    let updated = app.recorder.record(&request)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => {
            let Some(next) = updated.next_review else {
                bail!("Review of '{}' did not schedule a next review", updated.english);
            };
            let correct = updated.review_history.last().is_some_and(|e| e.result.is_correct());
            let color = if correct { Color::GREEN } else { Color::RED };
            println!(
                "{} {} -> level {}, next review {}",
                terminal::paint(&updated.english, Color::BOLD, use_color),
                terminal::level_bar(updated.srs_level),
                terminal::paint(&updated.srs_level.to_string(), color, use_color),
                next
            );
        }
    }
    Ok(())
}

pub fn run_stats(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let today = local_day(Utc::now());
    let stats = srs::review_stats(app.store.as_ref(), today)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            println!("{}", terminal::paint("Vocabulary", Color::BOLD, use_color));
            println!("  Total words    {}", stats.total_words);
            println!("  New            {}", stats.new_words);
            println!("  Due today      {}", stats.due_words);
            println!("  Mastered       {}", stats.mastered_words);
            println!();
            println!("{}", terminal::paint("Levels", Color::BOLD, use_color));
            let max = stats.level_counts.iter().copied().max().unwrap_or(0).max(1);
            for (level, &count) in stats.level_counts.iter().enumerate() {
                let bar = "\u{2588}".repeat(count * 30 / max);
                println!("  {}  {:>4} {}", level, count, terminal::paint(&bar, Color::CYAN, use_color));
            }
            println!();
            println!("{}", terminal::paint("Today", Color::BOLD, use_color));
            println!("  Reviews        {}", stats.reviews_today);
            println!(
                "  Accuracy       {:.0}% ({}/{})",
                stats.accuracy_today * 100.0,
                stats.correct_today,
                stats.reviews_today
            );
            println!("  Streak         {} days", stats.streak_days);
        }
    }
    Ok(())
}

use anyhow::Result;

use vocab_lib::scores::{CreateScoreRequest, TestScore};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn score_row(score: &TestScore, use_color: bool) -> String {
    format!(
        "{}  {:<8}  L {:>3.1}  R {:>3.1}  W {:>3.1}  S {:>3.1}  {}",
        score.test_date,
        format!("{:?}", score.test_type).to_lowercase(),
        score.listening,
        score.reading,
        score.writing,
        score.speaking,
        terminal::paint(&format!("Overall {:.1}", score.overall), Color::BOLD, use_color)
    )
}

pub fn run_add(app: &App, request: CreateScoreRequest, format: &OutputFormat, use_color: bool) -> Result<()> {
    let score = app.scores.add_score(request)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&score)?),
        OutputFormat::Plain => println!("Recorded {}", score_row(&score, use_color)),
    }
    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let scores = app.scores.list_scores()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scores)?),
        OutputFormat::Plain => {
            if scores.is_empty() {
                println!("No test scores recorded.");
                return Ok(());
            }
            for score in &scores {
                println!("{}", score_row(score, use_color));
                if let Some(notes) = &score.notes {
                    println!("            {}", terminal::paint(notes, Color::DIM, use_color));
                }
            }
        }
    }
    Ok(())
}

pub fn run_summary(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summary = app.scores.summary()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Plain => {
            let Some(latest) = &summary.latest else {
                println!("No test scores recorded.");
                return Ok(());
            };

            println!("{} tests recorded", summary.count);
            println!("Latest   {}", score_row(latest, use_color));
            if let Some(best) = summary.best_overall {
                println!("Best overall    {:.1}", best);
            }
            let avg = &summary.averages;
            println!(
                "Averages        L {:.2}  R {:.2}  W {:.2}  S {:.2}  Overall {:.2}",
                avg.listening, avg.reading, avg.writing, avg.speaking, avg.overall
            );
            let change = summary.overall_change;
            let color = if change >= 0.0 { Color::GREEN } else { Color::RED };
            println!(
                "Progress        {}",
                terminal::paint(&format!("{:+.1}", change), color, use_color)
            );
        }
    }
    Ok(())
}

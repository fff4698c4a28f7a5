use vocab_lib::srs::MAX_SRS_LEVEL;
use vocab_lib::vocabulary::VocabularyWord;

/// ANSI color codes
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// `[###..]` style progress through the SRS levels
pub fn level_bar(level: u8) -> String {
    let filled = level.min(MAX_SRS_LEVEL) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(MAX_SRS_LEVEL as usize - filled)
    )
}

fn field(label: &str, value: &str, use_color: bool) -> String {
    format!("{} {}", paint(&format!("{:<14}", label), Color::GRAY, use_color), value)
}

/// Full multi-line rendering of one word
pub fn render_word(word: &VocabularyWord, use_color: bool) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "{}  {}",
        paint(&word.english, Color::BOLD, use_color),
        word.vietnamese
    ));
    let pron = &word.pronunciation;
    if pron.en.is_some() || pron.vi.is_some() {
        let parts: Vec<&str> = [pron.en.as_deref(), pron.vi.as_deref()].into_iter().flatten().collect();
        lines.push(paint(&parts.join(" / "), Color::DIM, use_color));
    }
    lines.push(String::new());

    lines.push(field("Id", &word.id, use_color));
    lines.push(field("Band", &word.ielts_band.to_string(), use_color));
    lines.push(field("Difficulty", &word.difficulty.to_string(), use_color));
    if !word.category.is_empty() {
        lines.push(field("Categories", &word.category.join(", "), use_color));
    }
    lines.push(field(
        "Level",
        &format!("{} {}", level_bar(word.srs_level), word.srs_level),
        use_color,
    ));
    let next = word
        .next_review
        .map(|d| d.to_string())
        .unwrap_or_else(|| "not yet reviewed".to_string());
    lines.push(field("Next review", &next, use_color));
    lines.push(field("Reviews", &word.review_history.len().to_string(), use_color));

    if let Some(context) = &word.context {
        lines.push(String::new());
        lines.push(paint("Context", Color::CYAN, use_color));
        lines.extend(wrap_lines(context, "  ", 80));
    }
    for (title, values) in [
        ("Synonyms", &word.synonyms),
        ("Antonyms", &word.antonyms),
        ("Collocations", &word.collocations),
    ] {
        if !values.is_empty() {
            lines.push(field(title, &values.join(", "), use_color));
        }
    }
    if !word.examples.is_empty() {
        lines.push(String::new());
        lines.push(paint("Examples", Color::CYAN, use_color));
        for example in &word.examples {
            let wrapped = wrap_lines(example, "    ", 80);
            for (i, line) in wrapped.into_iter().enumerate() {
                if i == 0 {
                    lines.push(format!("  - {}", line.trim_start()));
                } else {
                    lines.push(line);
                }
            }
        }
    }

    lines.join("\n")
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= effective_width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(format!("{}{}", prefix, current));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bar() {
        assert_eq!(level_bar(0), "[.....]");
        assert_eq!(level_bar(3), "[###..]");
        assert_eq!(level_bar(9), "[#####]");
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "> ", 11);
        assert_eq!(lines, vec!["> one two", "> three", "> four"]);
        assert_eq!(wrap_lines("short", "", 80), vec!["short"]);
    }

    #[test]
    fn test_render_word_plain() {
        let mut word = VocabularyWord::new("mitigate", "giảm nhẹ");
        word.synonyms = vec!["alleviate".into()];
        let out = render_word(&word, false);
        assert!(out.starts_with("mitigate  giảm nhẹ"));
        assert!(out.contains("not yet reviewed"));
        assert!(out.contains("alleviate"));
        assert!(!out.contains('\x1b'));
    }
}

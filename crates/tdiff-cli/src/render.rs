use std::ops::Range;

use colored::{ColoredString, Colorize};
use tdiff_batch::{BatchSummary, RowReport};
use tdiff_core::{DiffItem, LineComparison, TextComparison};

pub fn comparison(comparison: &TextComparison) -> String {
    let mut out = format!(
        "similarity: {}\n",
        format!("{:.2}", comparison.similarity).bold()
    );
    out.push_str(&format!(
        "changed lines: {} ({} added, {} removed, {} modified), changed words: {}\n",
        comparison.len(),
        comparison.additions(),
        comparison.removals(),
        comparison.modifications(),
        comparison.word_changes(),
    ));
    for line in &comparison.lines {
        out.push('\n');
        out.push_str(&line_comparison(line));
    }
    out
}

fn line_comparison(line: &LineComparison) -> String {
    let mut out = match &line.line {
        DiffItem::Removed { content } => format!("{} {}\n", "-".red().bold(), content),
        DiffItem::Added { content } => format!("{} {}\n", "+".green().bold(), content),
        DiffItem::Modified { .. } => {
            let (before, after) = modified_pair(&line.line);
            format!("{} {}\n  {}\n", "~".yellow().bold(), before, after)
        }
        DiffItem::Unchanged { content } => format!("  {content}\n"),
    };
    if !line.words.is_empty() {
        let words: Vec<String> = line.words.iter().map(word).collect();
        out.push_str(&format!("    {} {}\n", "words:".dimmed(), words.join(" ")));
    }
    out
}

fn word(item: &DiffItem) -> String {
    match item {
        DiffItem::Removed { content } => format!("-{content}").red().to_string(),
        DiffItem::Added { content } => format!("+{content}").green().to_string(),
        DiffItem::Modified { .. } => {
            let (before, after) = modified_pair(item);
            format!("{before}{}{after}", "->".yellow())
        }
        DiffItem::Unchanged { content } => content.clone(),
    }
}

/// Both versions of a modified item with their changed characters painted.
fn modified_pair(item: &DiffItem) -> (String, String) {
    match (item, item.char_masks()) {
        (DiffItem::Modified { before, after }, Some(mask)) => (
            highlight(before, &mask.before, |s| s.red().bold()),
            highlight(after, &mask.after, |s| s.green().bold()),
        ),
        _ => (String::new(), String::new()),
    }
}

fn highlight(text: &str, ranges: &[Range<usize>], paint: fn(&str) -> ColoredString) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        let start = range.start.min(chars.len()).max(cursor);
        let end = range.end.min(chars.len()).max(start);
        out.extend(&chars[cursor..start]);
        let changed: String = chars[start..end].iter().collect();
        out.push_str(&paint(&changed).to_string());
        cursor = end;
    }
    out.extend(&chars[cursor..]);
    out
}

pub fn batch(reports: &[RowReport], summary: &BatchSummary, summary_only: bool) -> String {
    let mut out = String::new();
    if !summary_only {
        for report in reports {
            match (&report.comparison, &report.error) {
                (Some(c), _) => out.push_str(&format!(
                    "{}: {:.2} ({} changed lines, {} changed words)\n",
                    report.id.bold(),
                    c.similarity,
                    c.len(),
                    c.word_changes(),
                )),
                (None, error) => out.push_str(&format!(
                    "{}: {} {}\n",
                    report.id.bold(),
                    "error:".red().bold(),
                    error.as_deref().unwrap_or("unknown failure"),
                )),
            }
        }
    }
    let mean = summary
        .mean_similarity
        .map(|m| format!("{m:.2}"))
        .unwrap_or_else(|| "n/a".into());
    out.push_str(&format!(
        "{} rows, {} failed, mean similarity {}\n",
        summary.rows, summary.failures, mean
    ));
    out
}

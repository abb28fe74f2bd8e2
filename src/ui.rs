//! Terminal presentation: colored status lines, the rewrite spinner, the
//! disambiguation prompt, and the final summary printer.

use colored::Colorize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Maximum number of search results offered for selection
const MAX_CHOICES: usize = 5;

pub fn info(message: impl AsRef<str>) {
    println!("{}", message.as_ref().cyan());
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}

pub fn warn(message: impl AsRef<str>) {
    println!("{}", message.as_ref().yellow());
}

pub fn error_line(message: impl AsRef<str>) {
    eprintln!("{}", message.as_ref().red().bold());
}

/// Start a transient indeterminate spinner with the given message.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap());
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Pick one title from the search results.
///
/// A single result is auto-selected without prompting. Otherwise the first
/// five results are listed 1-indexed and the user types a number; empty input
/// means 1, and invalid input warns and falls back to 1.
pub fn select_title(results: &[String]) -> anyhow::Result<String> {
    if results.len() == 1 {
        return Ok(results[0].clone());
    }
    warn("Multiple articles found:");
    let shown = &results[..results.len().min(MAX_CHOICES)];
    for (idx, title) in shown.iter().enumerate() {
        println!("{}. {}", idx + 1, title);
    }
    let input: String = Input::new()
        .with_prompt("Select article number")
        .default("1".to_string())
        .interact_text()?;
    let idx = match parse_selection(&input, shown.len()) {
        Some(idx) => idx,
        None => {
            error_line("Invalid choice, defaulting to 1");
            0
        }
    };
    Ok(shown[idx].clone())
}

/// Parse a 1-indexed selection into a 0-based index; `None` means the input
/// was invalid and the caller should fall back to the first entry.
fn parse_selection(input: &str, shown: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=shown).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Print the rendered summary, bolding `**...**` title lines.
pub fn print_summary(rendered: &str) {
    for line in rendered.lines() {
        match line
            .strip_prefix("**")
            .and_then(|rest| rest.strip_suffix("**"))
        {
            Some(title) => println!("{}", title.bold()),
            None => println!("{line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_selects_first() {
        assert_eq!(parse_selection("", 5), Some(0));
        assert_eq!(parse_selection("   ", 5), Some(0));
    }

    #[test]
    fn numeric_input_selects_that_entry() {
        assert_eq!(parse_selection("3", 5), Some(2));
        assert_eq!(parse_selection("1", 5), Some(0));
        assert_eq!(parse_selection("5", 5), Some(4));
    }

    #[test]
    fn out_of_range_input_is_invalid() {
        assert_eq!(parse_selection("9", 5), None);
        assert_eq!(parse_selection("0", 5), None);
        assert_eq!(parse_selection("6", 5), None);
    }

    #[test]
    fn non_numeric_input_is_invalid() {
        assert_eq!(parse_selection("abc", 5), None);
        assert_eq!(parse_selection("-1", 5), None);
        assert_eq!(parse_selection("2.5", 5), None);
    }

    #[test]
    fn only_first_five_of_many_results_are_selectable() {
        // Seven results on offer still cap the valid range at five.
        assert_eq!(parse_selection("5", 5), Some(4));
        assert_eq!(parse_selection("6", 5), None);
        assert_eq!(parse_selection("7", 5), None);
    }
}

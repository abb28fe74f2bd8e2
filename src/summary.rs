//! Sentence truncation and summary rendering.

use crate::wiki::Article;

/// Appended when sentences were dropped by truncation
const ELLIPSIS: char = '…';

/// Keep the first `count` sentences of the text, splitting on the literal
/// `". "` boundary, and append an ellipsis when sentences were dropped.
///
/// Embedded newlines are collapsed to spaces first. A non-positive count is
/// accepted and clamped to zero, yielding an empty body (plus the ellipsis
/// when the text had any sentences).
pub fn truncate_sentences(text: &str, count: i64) -> String {
    let collapsed = text.replace('\n', " ");
    let trimmed = collapsed.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = trimmed.split(". ").collect();
    let keep = (count.max(0) as usize).min(parts.len());
    let mut out = parts[..keep].join(". ");
    if parts.len() > keep {
        out.push(ELLIPSIS);
    }
    out
}

/// Render the final summary: bold-marked canonical title, blank line, then
/// the truncated summary body.
pub fn render(article: &Article, sentences: i64) -> String {
    format!(
        "**{}**\n\n{}",
        article.title,
        truncate_sentences(&article.summary, sentences)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_sentences() -> String {
        (1..=6)
            .map(|i| format!("Sentence {i}"))
            .collect::<Vec<_>>()
            .join(". ")
    }

    #[test]
    fn keeps_all_sentences_without_ellipsis_when_short() {
        let text = "One. Two. Three";
        assert_eq!(truncate_sentences(text, 5), "One. Two. Three");
    }

    #[test]
    fn truncates_and_appends_ellipsis() {
        let out = truncate_sentences(&six_sentences(), 3);
        assert_eq!(out, "Sentence 1. Sentence 2. Sentence 3…");
    }

    #[test]
    fn exact_count_has_no_ellipsis() {
        let out = truncate_sentences("One. Two. Three", 3);
        assert_eq!(out, "One. Two. Three");
    }

    #[test]
    fn collapses_newlines_before_splitting() {
        let out = truncate_sentences("One.\nAnd more. Two. Three", 2);
        assert_eq!(out, "One. And more. Two…");
    }

    #[test]
    fn empty_text_yields_empty_summary() {
        assert_eq!(truncate_sentences("", 5), "");
        assert_eq!(truncate_sentences("  \n ", 5), "");
    }

    #[test]
    fn non_positive_count_yields_ellipsis_only_body() {
        assert_eq!(truncate_sentences("One. Two", 0), "…");
        assert_eq!(truncate_sentences("One. Two", -3), "…");
    }

    #[test]
    fn renders_bold_title_and_truncated_body() {
        let article = Article {
            title: "Apollo 11".to_string(),
            summary: six_sentences(),
        };
        let rendered = render(&article, 3);
        assert_eq!(
            rendered,
            "**Apollo 11**\n\nSentence 1. Sentence 2. Sentence 3…"
        );
    }

    #[test]
    fn renders_whole_summary_when_count_exceeds_sentences() {
        let article = Article {
            title: "Apollo 11".to_string(),
            summary: "Only one sentence".to_string(),
        };
        assert_eq!(render(&article, 5), "**Apollo 11**\n\nOnly one sentence");
    }
}

//! Splitting a pasted block of text into individual problems.
//!
//! Heuristics run as a fixed cascade: exam-style question markers first,
//! then content-marker phrases, then generic separators. The first
//! exam pattern that yields two or more filtered survivors wins; candidate
//! splits are never ranked against each other.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static EXAM_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        // "1." / "2)" at a line start or after sentence-ending whitespace
        (
            "numbered question",
            Regex::new(r"(?m)(?:^|\s)\d{1,2}[.)]\s+").expect("valid regex literal"),
        ),
        (
            "lettered question",
            Regex::new(r"(?m)(?:^|\s)[a-h][.)]\s+").expect("valid regex literal"),
        ),
        (
            "question-word marker",
            Regex::new(r"(?i)question\s+\d+\s*[:.)]?").expect("valid regex literal"),
        ),
    ]
});

static CONTENT_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:the line|the plane|the point|find the|show that|prove that)\b")
        .expect("valid regex literal")
});

static GENERIC_SEPARATORS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    vec![
        ("blank line", Regex::new(r"\n\s*\n").expect("valid regex literal")),
        ("number-paren", Regex::new(r"\d+\)\s*[A-Z]").expect("valid regex literal")),
        ("number-dot", Regex::new(r"\d+\.\s+[A-Z]").expect("valid regex literal")),
        ("letter-paren", Regex::new(r"[a-h]\)\s*[A-Z]").expect("valid regex literal")),
        ("semicolon", Regex::new(r";").expect("valid regex literal")),
    ]
});

/// Split normalized text into problem strings. Never returns an empty
/// list: when every heuristic fails, the whole input is one problem.
pub fn segment(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return vec![String::new()];
    }

    // Primary: exam-style question markers, first qualifying pattern wins.
    for (name, pattern) in EXAM_PATTERNS.iter() {
        let pieces = split_removing(trimmed, pattern);
        let survivors: Vec<String> = pieces
            .into_iter()
            .filter(|p| exam_content_filter(p))
            .collect();
        if survivors.len() >= 2 {
            debug!(pattern = name, count = survivors.len(), "exam split accepted");
            return finalize(survivors, trimmed);
        }
    }

    // Secondary: content-marker phrases, splitting before each marker.
    let marked = split_before_matches(trimmed, &CONTENT_MARKERS);
    let survivors: Vec<String> = marked.into_iter().filter(|p| p.len() > 20).collect();
    if survivors.len() >= 2 {
        debug!(count = survivors.len(), "content-marker split accepted");
        return finalize(survivors, trimmed);
    }

    // Tertiary: generic separators applied iteratively; keep a split only
    // when it strictly increases the fragment count, stop past 10.
    let mut fragments = vec![trimmed.to_string()];
    for (name, sep) in GENERIC_SEPARATORS.iter() {
        if fragments.len() > 10 {
            break;
        }
        let resplit: Vec<String> = fragments
            .iter()
            .flat_map(|f| split_before_or_removing(f, name, sep))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if resplit.len() > fragments.len() {
            debug!(separator = name, count = resplit.len(), "generic split kept");
            fragments = resplit;
        }
    }
    if fragments.len() >= 2 {
        return finalize(fragments, trimmed);
    }

    vec![trimmed.to_string()]
}

/// Marker-style separators keep their match with the fragment; pure
/// separators (blank lines, semicolons) are dropped.
fn split_before_or_removing(text: &str, name: &str, sep: &Regex) -> Vec<String> {
    match name {
        "blank line" | "semicolon" => split_removing(text, sep),
        _ => split_before_matches(text, sep),
    }
}

fn split_removing(text: &str, pattern: &Regex) -> Vec<String> {
    pattern
        .split(text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Cut the text at the start of each match, keeping the match with the
/// fragment it introduces.
fn split_before_matches(text: &str, pattern: &Regex) -> Vec<String> {
    let mut cuts: Vec<usize> = pattern.find_iter(text).map(|m| m.start()).collect();
    if cuts.first() != Some(&0) {
        cuts.insert(0, 0);
    }
    cuts.push(text.len());
    cuts.windows(2)
        .map(|w| text[w[0]..w[1]].trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A real question has some length, a letter, and a digit.
fn exam_content_filter(piece: &str) -> bool {
    piece.len() > 15
        && piece.chars().any(|c| c.is_ascii_alphabetic())
        && piece.chars().any(|c| c.is_ascii_digit())
}

/// Final filter: drop fragments that are too short or carry no
/// math-indicative character at all.
fn finalize(pieces: Vec<String>, whole: &str) -> Vec<String> {
    let kept: Vec<String> = pieces
        .into_iter()
        .filter(|p| p.len() >= 5 && has_math_indicator(p))
        .collect();
    if kept.is_empty() {
        vec![whole.to_string()]
    } else {
        kept
    }
}

fn has_math_indicator(piece: &str) -> bool {
    piece.chars().any(|c| {
        c.is_ascii_digit()
            || "+-*/^=()[]".contains(c)
            || matches!(c, 'x' | 'y' | 'z')
            || matches!(c, 'X' | 'Y' | 'Z')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_questions() {
        let problems = segment("1. Solve 2x + 3 = 7 for x. 2. Find 10% of 250 quickly.");
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("2x + 3 = 7"));
        assert!(problems[1].contains("10% of 250"));
    }

    #[test]
    fn test_question_word_markers() {
        let text = "Question 1: Evaluate 2 + 3 * 4 now. Question 2: Compute 5! quickly today.";
        let problems = segment(text);
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_blank_line_separator() {
        let text = "Solve x + 1 = 2 today\n\nCompute 3 * 4 please";
        let problems = segment(text);
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_semicolon_separator() {
        let problems = segment("compute 2 + 2; compute 3 + 3");
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_single_problem_untouched() {
        let problems = segment("Solve x^2 - 5x + 6 = 0");
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0], "Solve x^2 - 5x + 6 = 0");
    }

    #[test]
    fn test_never_empty() {
        assert_eq!(segment("").len(), 1);
        let problems = segment("???");
        assert_eq!(problems, vec!["???".to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let text = "1. Solve 2x = 4 for the value. 2. Compute 9 - 5 and simplify.";
        assert_eq!(segment(text), segment(text));
    }

    #[test]
    fn test_fragment_without_math_dropped() {
        // The prose-only piece fails the math-indicator filter.
        let text = "Please attend to all problems\n\nCompute 2 + 2 now";
        let problems = segment(text);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("2 + 2"));
    }
}

//! OCR-noise cleanup and textual canonicalization.
//!
//! Every rule here is a fixed substitution applied in a fixed order. The
//! whole pass is total (worst case the input comes back unchanged) and
//! idempotent: no rule re-triggers on its own output.

use regex::Regex;
use std::sync::LazyLock;

static COORD_TRIPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s*\)")
        .expect("valid regex literal")
});

static COORD_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s*\)").expect("valid regex literal")
});

const OPERATOR_CHARS: &[char] = &['+', '-', '*', '/', '^', '=', '(', ')'];

/// Canonicalize one line of raw problem text.
///
/// Substitution order: multiplication/division/minus glyphs, quote
/// characters, OCR letter/digit confusions, horizontal whitespace collapse,
/// implicit multiplication around parentheses, coordinate tuple commas.
/// Newlines are preserved so the segmenter can still split on blank lines.
pub fn normalize(raw: &str) -> String {
    let mut text = canonicalize_glyphs(raw);
    text = fix_ocr_confusions(&text);
    text = collapse_spaces(&text);
    text = insert_implicit_multiplication(&text);
    text = COORD_TRIPLE.replace_all(&text, "($1, $2, $3)").into_owned();
    text = COORD_PAIR.replace_all(&text, "($1, $2)").into_owned();
    text
}

fn canonicalize_glyphs(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '×' | '·' | '∗' => '*',
            '÷' => '/',
            '−' | '–' => '-',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            other => other,
        })
        .collect()
}

/// Standalone `l` was almost always a `1` in scanned input; `O` is only
/// rewritten to `0` next to an operator or digit, so words like `Odd` and
/// identifiers keep their letters.
fn fix_ocr_confusions(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();
        match c {
            'l' if !is_letter(prev) && !is_letter(next) => out.push('1'),
            'O' if is_operator_adjacent(prev) || is_operator_adjacent(next) => out.push('0'),
            other => out.push(other),
        }
    }
    out
}

fn is_letter(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphabetic())
}

fn is_operator_adjacent(c: Option<char>) -> bool {
    c.is_some_and(|c| OPERATOR_CHARS.contains(&c) || c.is_ascii_digit())
}

/// Collapse runs of spaces and tabs to one space; newlines stay untouched.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_blank = false;
    for c in text.chars() {
        if c == ' ' || c == '\t' {
            if !in_blank {
                out.push(' ');
            }
            in_blank = true;
        } else {
            in_blank = false;
            out.push(c);
        }
    }
    out
}

/// `2(` -> `2*(`, `)2` -> `)*2`, `)(` -> `)*(`.
fn insert_implicit_multiplication(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if let Some(&next) = chars.get(i + 1) {
            let digit_then_paren = c.is_ascii_digit() && next == '(';
            let paren_then_digit = c == ')' && next.is_ascii_digit();
            let paren_then_paren = c == ')' && next == '(';
            if digit_then_paren || paren_then_digit || paren_then_paren {
                out.push('*');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(normalize("3 × 4 ÷ 2"), "3 * 4 / 2");
        assert_eq!(normalize("5 − 2"), "5 - 2");
    }

    #[test]
    fn test_ocr_standalone_l() {
        assert_eq!(normalize("l + 2"), "1 + 2");
        // 'l' inside a word stays a letter
        assert_eq!(normalize("solve x"), "solve x");
    }

    #[test]
    fn test_ocr_capital_o() {
        assert_eq!(normalize("2O+1"), "20+1");
        assert_eq!(normalize("Odd numbers"), "Odd numbers");
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(normalize("2(x+1)"), "2*(x+1)");
        assert_eq!(normalize("(x+1)2"), "(x+1)*2");
        assert_eq!(normalize("(x+1)(x-1)"), "(x+1)*(x-1)");
    }

    #[test]
    fn test_coordinate_tuples() {
        assert_eq!(normalize("(1 2 3)"), "(1, 2, 3)");
        assert_eq!(normalize("(1.5 -2)"), "(1.5, -2)");
        assert_eq!(normalize("(1, 2, 3)"), "(1, 2, 3)");
    }

    #[test]
    fn test_whitespace_collapse_keeps_newlines() {
        assert_eq!(normalize("a   +  b\n\nc"), "a + b\n\nc");
    }

    #[test]
    fn test_idempotent_fixtures() {
        for s in [
            "2(x+1)",
            "(1 2 3)·(4 5 6)",
            "l + O2",
            "3 × 4 ÷ 2",
            "x^2   -  5x + 6 = 0",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(s in "[ -~]{0,64}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_total(s in "\\PC{0,64}") {
            // Never panics, never returns empty for non-empty math-free input.
            let _ = normalize(&s);
        }
    }
}

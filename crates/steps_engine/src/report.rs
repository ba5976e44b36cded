//! Markdown rendering of solution records: a pure function of the record,
//! with a fixed template (problem in a code block, classification line,
//! numbered steps with inline math, bolded final answer).

use crate::record::SolutionRecord;
use std::fmt::Write;

pub fn render_markdown(rec: &SolutionRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "### Problem {}", rec.number);
    let _ = writeln!(out);
    let _ = writeln!(out, "```");
    let _ = writeln!(out, "{}", rec.original);
    let _ = writeln!(out, "```");
    let _ = writeln!(out);

    let label = rec.category.as_deref().unwrap_or(&rec.problem_type);
    let _ = writeln!(out, "**Classification:** {}", label);
    let _ = writeln!(out);

    if !rec.steps.is_empty() {
        let _ = writeln!(out, "**Steps:**");
        for (i, step) in rec.steps.iter().enumerate() {
            let _ = writeln!(out, "{}. {}: `{}`", i + 1, step.description, step.math);
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "**Answer:** **{}**", rec.answer);

    if let Some(err) = &rec.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "_Note: {}_", err);
    }

    out
}

/// Batch rendering joins individual reports with horizontal rules.
pub fn render_markdown_batch(records: &[SolutionRecord]) -> String {
    records
        .iter()
        .map(render_markdown)
        .collect::<Vec<_>>()
        .join("\n---\n\n")
}

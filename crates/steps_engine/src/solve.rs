//! The top-level batch pipeline: normalize, segment, then per problem
//! classify (advisory), dispatch, and fall back. One unsolvable problem
//! never prevents the rest of the batch from producing records.

use crate::classify::classify;
use crate::dispatch::solve_problem;
use crate::fallback::fallback;
use crate::record::SolutionRecord;
use crate::segment::segment;
use steps_parser::normalize;
use tracing::debug;

/// Solve a block of problem text. Always returns at least one record.
pub fn solve(text: &str) -> Vec<SolutionRecord> {
    let normalized = normalize(text);
    let problems = segment(&normalized);
    debug!(count = problems.len(), "segmented input");

    problems
        .iter()
        .enumerate()
        .map(|(i, problem)| {
            let index = i + 1;
            let mut rec = match solve_problem(problem, index) {
                Ok(rec) => rec,
                Err(err) => {
                    debug!(%err, index, "specific solver failed; using fallback");
                    fallback(problem, index, &err)
                }
            };
            rec.category = Some(classify(problem));
            rec
        })
        .collect()
}

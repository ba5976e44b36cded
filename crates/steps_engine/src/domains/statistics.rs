use crate::error::SolveError;
use crate::extract::extract_numbers;
use crate::record::SolutionRecord;
use steps_ast::format_number;

/// Descriptive statistics over the numbers found in the problem. Keyword
/// picks the measure; the default is the mean.
pub fn solve_statistics(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let lower = problem.to_lowercase();
    let data = extract_numbers(&lower);
    if data.is_empty() {
        return Err(SolveError::Unsupported("no data values found".into()));
    }

    let mut rec = SolutionRecord::new(index, problem, "Statistics");
    let rendered: Vec<String> = data.iter().map(|v| format_number(*v)).collect();
    rec.push_step("Read the data", rendered.join(", "));

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;

    let answer = if lower.contains("median") {
        let mut sorted = data.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite data"));
        rec.push_step("Sort the data", {
            let s: Vec<String> = sorted.iter().map(|v| format_number(*v)).collect();
            s.join(", ")
        });
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };
        rec.push_step(
            "Median: middle value (or mean of the middle two)",
            format_number(median),
        );
        format_number(median)
    } else if lower.contains("mode") {
        let mut best = (data[0], 0usize);
        for &candidate in &data {
            let count = data.iter().filter(|&&v| v == candidate).count();
            if count > best.1 {
                best = (candidate, count);
            }
        }
        rec.push_step(
            "Mode: the most frequent value",
            format!("{} (appears {} times)", format_number(best.0), best.1),
        );
        format_number(best.0)
    } else if lower.contains("variance") || lower.contains("standard deviation") {
        let variance = data.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        rec.push_step(
            "Mean of the data",
            format!("μ = {}", format_number(mean)),
        );
        rec.push_step(
            "Population variance: mean squared deviation",
            format!("σ² = {}", format_number(variance)),
        );
        if lower.contains("standard deviation") {
            let sd = variance.sqrt();
            rec.push_step("Standard deviation: square root of the variance", format_number(sd));
            format_number(sd)
        } else {
            format_number(variance)
        }
    } else if lower.contains("range") {
        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        rec.push_step(
            "Range: maximum minus minimum",
            format!("{} - {}", format_number(max), format_number(min)),
        );
        format_number(max - min)
    } else {
        rec.push_step(
            "Mean: sum divided by the count",
            format!(
                "({}) / {} = {}",
                rendered.join(" + "),
                data.len(),
                format_number(mean)
            ),
        );
        format_number(mean)
    };

    rec.answer = answer;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_default() {
        let rec = solve_statistics("average of 2, 4, 6, 8", 1).unwrap();
        assert_eq!(rec.answer, "5");
    }

    #[test]
    fn test_median_even_count() {
        let rec = solve_statistics("median of 1, 3, 5, 7", 1).unwrap();
        assert_eq!(rec.answer, "4");
    }

    #[test]
    fn test_mode() {
        let rec = solve_statistics("mode of 1, 2, 2, 3", 1).unwrap();
        assert_eq!(rec.answer, "2");
    }

    #[test]
    fn test_standard_deviation() {
        let rec = solve_statistics("standard deviation of 2, 4, 4, 4, 5, 5, 7, 9", 1).unwrap();
        assert_eq!(rec.answer, "2");
    }

    #[test]
    fn test_no_data_is_error() {
        assert!(solve_statistics("find the mean", 1).is_err());
    }
}

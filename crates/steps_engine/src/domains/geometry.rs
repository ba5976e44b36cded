use crate::error::SolveError;
use crate::extract::{extract_numbers, extract_tuples};
use crate::record::SolutionRecord;
use std::f64::consts::PI;
use steps_ast::format_number;

/// Areas, perimeters, volumes, and point distance: one closed-form formula
/// per shape/measure pair, chosen by keyword.
pub fn solve_geometry(problem: &str, index: usize) -> Result<SolutionRecord, SolveError> {
    let lower = problem.to_lowercase();
    let numbers = extract_numbers(&lower);

    let mut rec = SolutionRecord::new(index, problem, "Geometry");

    // Distance between two points needs the tuples, not the raw numbers.
    if lower.contains("distance") {
        let points = extract_tuples(problem);
        if let [p, q] = points.as_slice() {
            if p.len() == q.len() {
                rec.push_step("Distance formula", "d = √((x₂-x₁)² + (y₂-y₁)²)");
                let d: f64 = p
                    .iter()
                    .zip(q)
                    .map(|(a, b)| (b - a) * (b - a))
                    .sum::<f64>()
                    .sqrt();
                rec.push_step(
                    "Substitute the coordinates",
                    format!("d = {}", format_number(d)),
                );
                rec.answer = format_number(d);
                return Ok(rec);
            }
        }
        return Err(SolveError::Unsupported(
            "distance needs two coordinate tuples".into(),
        ));
    }

    let need = |n: usize| -> Result<(), SolveError> {
        if numbers.len() < n {
            Err(SolveError::Unsupported(format!(
                "expected at least {} measurement(s)",
                n
            )))
        } else {
            Ok(())
        }
    };

    let (description, math, value) = if lower.contains("circle") && lower.contains("area") {
        need(1)?;
        let r = numbers[0];
        (
            "Area of a circle",
            format!("A = πr² = π · {}²", format_number(r)),
            PI * r * r,
        )
    } else if lower.contains("circumference") || (lower.contains("circle") && lower.contains("perimeter")) {
        need(1)?;
        let r = numbers[0];
        (
            "Circumference of a circle",
            format!("C = 2πr = 2π · {}", format_number(r)),
            2.0 * PI * r,
        )
    } else if lower.contains("triangle") && lower.contains("area") {
        need(2)?;
        let (b, h) = (numbers[0], numbers[1]);
        (
            "Area of a triangle",
            format!("A = ½bh = ½ · {} · {}", format_number(b), format_number(h)),
            0.5 * b * h,
        )
    } else if lower.contains("rectangle") && lower.contains("area") {
        need(2)?;
        let (l, w) = (numbers[0], numbers[1]);
        (
            "Area of a rectangle",
            format!("A = l·w = {} · {}", format_number(l), format_number(w)),
            l * w,
        )
    } else if lower.contains("rectangle") && lower.contains("perimeter") {
        need(2)?;
        let (l, w) = (numbers[0], numbers[1]);
        (
            "Perimeter of a rectangle",
            format!("P = 2(l + w) = 2({} + {})", format_number(l), format_number(w)),
            2.0 * (l + w),
        )
    } else if lower.contains("square") && lower.contains("area") {
        need(1)?;
        let s = numbers[0];
        (
            "Area of a square",
            format!("A = s² = {}²", format_number(s)),
            s * s,
        )
    } else if lower.contains("sphere") && lower.contains("volume") {
        need(1)?;
        let r = numbers[0];
        (
            "Volume of a sphere",
            format!("V = 4/3·πr³ = 4/3·π·{}³", format_number(r)),
            4.0 / 3.0 * PI * r * r * r,
        )
    } else if lower.contains("cube") && lower.contains("volume") {
        need(1)?;
        let s = numbers[0];
        (
            "Volume of a cube",
            format!("V = s³ = {}³", format_number(s)),
            s * s * s,
        )
    } else {
        return Err(SolveError::Unsupported(
            "no geometry formula matched the problem wording".into(),
        ));
    };

    rec.push_step(description, math);
    let answer = format_number(value);
    rec.push_step("State the result", answer.clone());
    rec.answer = answer;
    Ok(rec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_area() {
        let rec = solve_geometry("area of a circle with radius 2", 1).unwrap();
        let v: f64 = rec.answer.parse().unwrap();
        assert!((v - PI * 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_area() {
        let rec = solve_geometry("area of a triangle with base 5 and height 4", 1).unwrap();
        assert_eq!(rec.answer, "10");
    }

    #[test]
    fn test_rectangle_perimeter() {
        let rec = solve_geometry("perimeter of a rectangle 3 by 4", 1).unwrap();
        assert_eq!(rec.answer, "14");
    }

    #[test]
    fn test_distance() {
        let rec = solve_geometry("distance between (0, 0) and (3, 4)", 1).unwrap();
        assert_eq!(rec.answer, "5");
    }

    #[test]
    fn test_unmatched_wording_is_error() {
        assert!(solve_geometry("geometry is fun", 1).is_err());
    }
}

use anyhow::Result;
use invest_challenges::Solution;
use invest_utils::{compress_obj, format_cents, jsonify};
use std::{fmt::Write, fs, path::Path, time::Duration};

pub fn render_report(solution: &Solution, elapsed: Duration) -> String {
    let mut out = String::from("Best combination:\n");
    if solution.is_empty() {
        out.push_str("(none)\n");
    }
    for name in &solution.names {
        let _ = writeln!(out, "- {}", name);
    }
    let _ = writeln!(out, "\nTotal cost: {} €", format_cents(solution.total_cost));
    let _ = writeln!(out, "Profit: {:.2} €", solution.total_profit);
    let _ = write!(out, "Execution time: {:.4} seconds", elapsed.as_secs_f64());
    out
}

pub fn print_report(solution: &Solution, elapsed: Duration) {
    println!("{}", render_report(solution, elapsed));
}

/// Writes `solution` as json, or zlib-compressed json when `compress` is set.
pub fn write_output(path: &Path, solution: &Solution, compress: bool) -> Result<()> {
    if compress {
        fs::write(path, compress_obj(solution)?)?;
    } else {
        fs::write(path, jsonify(solution))?;
    }
    println!("solution written to: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        let solution = Solution {
            names: vec!["Share-0003".to_string(), "Share-0010".to_string()],
            total_cost: 49_876,
            total_profit: 99.0812,
        };
        assert_eq!(
            render_report(&solution, Duration::from_millis(1500)),
            "Best combination:\n\
             - Share-0003\n\
             - Share-0010\n\
             \n\
             Total cost: 498.76 €\n\
             Profit: 99.08 €\n\
             Execution time: 1.5000 seconds"
        );
    }

    #[test]
    fn test_render_empty_report() {
        let report = render_report(&Solution::new(), Duration::ZERO);
        assert!(report.starts_with("Best combination:\n(none)\n"));
        assert!(report.contains("Total cost: 0.00 €"));
        assert!(report.contains("Profit: 0.00 €"));
    }
}

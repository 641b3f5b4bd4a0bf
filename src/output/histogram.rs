//! Text rendering of the degree distribution on log-log axes

use std::fmt::Write;

const BAR_WIDTH: f64 = 40.0;

/// Formats a degree histogram as a log-log table
///
/// Degree 0 is listed but has no logarithm, so its log columns show `-`.
pub fn format_loglog(histogram: &[(usize, usize)]) -> String {
    let mut out = String::new();
    let max_count = histogram.iter().map(|&(_, c)| c).max().unwrap_or(0);

    let _ = writeln!(
        out,
        "{:>8} {:>8} {:>10} {:>10}  distribution",
        "degree", "count", "log10(deg)", "log10(cnt)"
    );

    for &(degree, count) in histogram {
        let log_degree = if degree > 0 {
            format!("{:.3}", (degree as f64).log10())
        } else {
            "-".to_string()
        };
        let log_count = if count > 0 {
            format!("{:.3}", (count as f64).log10())
        } else {
            "-".to_string()
        };

        let _ = writeln!(
            out,
            "{:>8} {:>8} {:>10} {:>10}  {}",
            degree,
            count,
            log_degree,
            log_count,
            "#".repeat(bar_len(count, max_count))
        );
    }

    out
}

/// Prints the log-log table to stdout
pub fn print_loglog(histogram: &[(usize, usize)]) {
    println!("=== Degree Distribution (log-log) ===\n");
    if histogram.is_empty() {
        println!("  (empty graph)");
        return;
    }
    print!("{}", format_loglog(histogram));
}

/// Bar length on a log scale, at least 1 for any non-zero count
fn bar_len(count: usize, max_count: usize) -> usize {
    if count == 0 || max_count == 0 {
        return 0;
    }
    let scaled = BAR_WIDTH * (1.0 + count as f64).ln() / (1.0 + max_count as f64).ln();
    (scaled.round() as usize).max(1)
}

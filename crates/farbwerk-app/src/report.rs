// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console rendering of benchmark measurements.  The line format is for
// humans; only the presence of the measured values matters.

use farbwerk_core::types::BenchmarkResult;

/// Render one measurement as a report line.
pub fn format_result(result: &BenchmarkResult) -> String {
    let speedup = match result.speedup {
        Some(ratio) => format!("{ratio:.2}x"),
        None => "n/a".to_owned(),
    };
    format!(
        "{:<16} {:>10.3} ms   speedup {}",
        result.point.to_string(),
        result.elapsed_ms,
        speedup
    )
}

/// Print a titled block of measurements to stdout.
pub fn print_report(title: &str, results: &[BenchmarkResult]) {
    println!("{title}");
    for result in results {
        println!("  {}", format_result(result));
    }
}

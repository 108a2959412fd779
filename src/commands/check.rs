//! Parse and lint all posts

use anyhow::Result;

use crate::report::{Report, Severity};
use crate::Postlint;

/// Run the batch check and print the report in the requested format.
/// Returns whether the run should be considered passing: errors always
/// fail, warnings fail only under strict mode.
pub async fn run(app: &Postlint, format: &str, strict: bool) -> Result<bool> {
    let start = std::time::Instant::now();

    let (posts, report) = app.check().await?;
    let total = posts.len() + report.error_count();

    match format {
        "json" => println!("{}", report.to_json()?),
        "text" => print_text(total, &report),
        _ => anyhow::bail!("Unknown format: {}. Available: text, json", format),
    }

    let duration = start.elapsed();
    tracing::info!(
        "Checked {} documents in {:.2}s: {}",
        total,
        duration.as_secs_f64(),
        report.summary()
    );

    Ok(!report.has_errors() && !(strict && report.has_warnings()))
}

fn print_text(total: usize, report: &Report) {
    for diag in &report.diagnostics {
        let label = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        println!("{}: {}: {} [{}]", label, diag.source, diag.message, diag.kind);
    }
    println!("Checked {} documents: {}", total, report.summary());
}

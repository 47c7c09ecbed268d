use crate::controller::SelectionControl;
use crate::utils::config::VEGA_LITE_SCHEMA;

use super::models::BuildReport;

/// Print the selection control entries, one per line
pub fn display_questions(control: &SelectionControl) {
    for label in control.labels() {
        println!("{}", label);
    }
}

/// Print a build summary
pub fn display_report(report: &BuildReport) {
    println!("\n{}", "=".repeat(60));
    println!("BUILD SUMMARY");
    println!("{}", "=".repeat(60));
    for mount in &report.rendered {
        println!("✓ {}", mount);
    }
    for (mount, reason) in &report.failed {
        println!("✗ {}: {}", mount, reason);
    }
    println!("Questions: {}", report.questions.len());
    if let Some(page) = &report.page {
        println!("Page: {}", page.display());
    }
    println!("{}", "=".repeat(60));
}

/// Display version information
pub fn display_version() {
    println!("Heterogeneity Charts v{}", env!("CARGO_PKG_VERSION"));
    println!("Chart schema: {}", VEGA_LITE_SCHEMA);
    println!();
    println!("Declarative charts for the Silicon Philosophers heterogeneity study.");
}

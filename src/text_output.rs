//! Plain-text tables for terminals

use crate::report::ComparisonReport;

/// Render one comparison as a fixed-width table
pub fn format_table(report: &ComparisonReport) -> String {
    let policy_width = report
        .rows
        .iter()
        .map(|row| row.policy.len())
        .chain(std::iter::once("total".len()))
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = report.datasets.iter().map(|d| d.len().max(1)).collect();

    let mut output = format!(
        "=== {} vs {} ===\n",
        report.comparison.left, report.comparison.right
    );

    let mut header = format!("{:<width$}", "policy", width = policy_width);
    for (dataset, width) in report.datasets.iter().zip(&widths) {
        header.push_str(&format!("  {:>width$}", dataset, width = width));
    }
    header.push_str("    wins  losses");
    output.push_str(header.trim_end());
    output.push('\n');

    let separator_len = header.trim_end().len();
    output.push_str(&"-".repeat(separator_len));
    output.push('\n');

    for row in &report.rows {
        let mut line = format!("{:<width$}", row.policy, width = policy_width);
        for (cell, width) in row.cells.iter().zip(&widths) {
            line.push_str(&format!(
                "  {:>width$}",
                cell.outcome.sign().symbol(),
                width = width
            ));
        }
        line.push_str(&format!("  {:>6}  {:>6}", row.wins, row.losses));
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str(&"-".repeat(separator_len));
    output.push('\n');

    let padding: usize = widths.iter().map(|w| w + 2).sum();
    output.push_str(&format!(
        "{:<width$}{}  {:>6}  {:>6}\n",
        "total",
        " ".repeat(padding),
        report.total_wins,
        report.total_losses,
        width = policy_width
    ));
    output.push_str(&format!(
        "({} of {} cells tested)\n",
        report.tested_cells(),
        report.rows.len() * report.datasets.len()
    ));

    output
}

/// Render every comparison, separated by blank lines
pub fn to_text(reports: &[ComparisonReport]) -> String {
    reports
        .iter()
        .map(format_table)
        .collect::<Vec<_>>()
        .join("\n")
}

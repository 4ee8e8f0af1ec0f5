//! LaTeX table output for comparison reports
//!
//! One `table` environment per comparison, separated by a blank line. Every
//! row, `Sum` included, has one cell per column: policy, datasets, wins and
//! losses.
//!
//! ```text
//! \begin{table}
//! \centering
//! \caption{Bayesian.choice.naive vs naive.choice.naive}
//! \begin{tabular}{cccccccc}
//!  & Animals & ... & ALARM & Wins & Losses \\ \hline
//! random & + & 0 & ... & 1 & 0 \\ \hline
//! Sum & & & & & & 12 & 3
//! \end{tabular}
//! \label{table:Bayesian.choice.naive-vs-naive.choice.naive}
//! \end{table}
//! ```

use crate::report::ComparisonReport;

const ROW_END: &str = " \\\\ \\hline";

/// Escape characters LaTeX treats specially in text mode
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '_' | '&' | '%' | '#' | '$' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\\' => escaped.push_str("\\textbackslash{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Label key: characters that break `\label` become `-`
fn label_key(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\\' | '{' | '}' | '#' | '%' | '&' | '^' | '~' | '$' => '-',
            _ => c,
        })
        .collect()
}

/// Number of tabular columns: policy, one per dataset, wins, losses
fn column_count(report: &ComparisonReport) -> usize {
    report.datasets.len() + 3
}

/// Render one comparison as a `table` environment
pub fn format_table(report: &ComparisonReport) -> String {
    let comparison = &report.comparison;
    let mut output = String::new();

    output.push_str("\\begin{table}\n");
    output.push_str("\\centering\n");
    output.push_str(&format!(
        "\\caption{{{} vs {}}}\n",
        escape(&comparison.left),
        escape(&comparison.right)
    ));
    output.push_str(&format!(
        "\\begin{{tabular}}{{{}}}\n",
        "c".repeat(column_count(report))
    ));

    // Header: empty corner cell, dataset names, totals
    let mut header = String::new();
    for dataset in &report.datasets {
        header.push_str(" & ");
        header.push_str(&escape(dataset));
    }
    output.push_str(&format!("{} & Wins & Losses{}\n", header, ROW_END));

    for row in &report.rows {
        let mut line = escape(&row.policy);
        for cell in &row.cells {
            line.push_str(" & ");
            line.push_str(cell.outcome.sign().symbol());
        }
        output.push_str(&format!(
            "{} & {} & {}{}\n",
            line, row.wins, row.losses, ROW_END
        ));
    }

    // Grand totals line up under Wins and Losses
    output.push_str(&format!(
        "Sum{} {} & {}\n",
        " &".repeat(report.datasets.len() + 1),
        report.total_wins,
        report.total_losses
    ));
    output.push_str("\\end{tabular}\n");
    output.push_str(&format!(
        "\\label{{table:{}-vs-{}}}\n",
        label_key(&comparison.left),
        label_key(&comparison.right)
    ));
    output.push_str("\\end{table}\n");

    output
}

/// Render every comparison, each table followed by a blank line
pub fn to_latex(reports: &[ComparisonReport]) -> String {
    let mut output = String::new();
    for report in reports {
        output.push_str(&format_table(report));
        output.push('\n');
    }
    output
}

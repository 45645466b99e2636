//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::runner::ExecutionReport;
use cmap_scoring::{AlgorithmInfo, ScoringDetail, ScoringResult};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format grading reports.
    pub fn format_reports(&self, reports: &[ExecutionReport], verbose: bool) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            OutputFormat::Table => Ok(self.format_reports_table(reports, verbose)),
            OutputFormat::Quiet => Ok(self.format_reports_quiet(reports)),
        }
    }

    fn format_reports_table(&self, reports: &[ExecutionReport], verbose: bool) -> String {
        if reports.is_empty() {
            return self.colorize("No algorithms were run.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record([
            "Algorithm", "Status", "Score", "Max", "%", "Precision", "Recall", "F", "Time",
        ]);

        for report in reports {
            let time = format!("{}ms", report.elapsed_ms);
            match &report.result {
                Some(result) => {
                    let (p, r, f) = match &result.metrics {
                        Some(m) => (
                            format!("{:.3}", m.precision),
                            format!("{:.3}", m.recall),
                            format!("{:.3}", m.f_value),
                        ),
                        None => ("-".to_string(), "-".to_string(), "-".to_string()),
                    };
                    builder.push_record([
                        report.algorithm.clone(),
                        "ok".to_string(),
                        result.total_score.to_string(),
                        result.max_score.to_string(),
                        format!("{:.1}", result.percentage),
                        p,
                        r,
                        f,
                        time,
                    ]);
                }
                None => {
                    builder.push_record([
                        report.algorithm.clone(),
                        "failed".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        "-".to_string(),
                        time,
                    ]);
                }
            }
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut sections = vec![table.to_string()];

        for report in reports {
            if let Some(error) = &report.error {
                sections.push(self.error(&format!("{}: {}", report.algorithm, error)));
            }
            if let Some(result) = &report.result {
                for diagnostic in &result.diagnostics {
                    sections.push(self.warning(&format!("{}: {}", report.algorithm, diagnostic)));
                }
                if verbose {
                    sections.push(self.format_detail(result));
                }
            }
        }

        sections.join("\n")
    }

    /// Per-link or per-pair breakdown of one result.
    fn format_detail(&self, result: &ScoringResult) -> String {
        let heading = self.colorize(&format!("{} detail", result.method), "cyan");
        let mut builder = Builder::default();

        match &result.detail {
            ScoringDetail::Proposition { links, .. } => {
                builder.push_record([
                    "Link", "Antecedent", "Consequent", "Label", "Score", "Match", "Reference",
                ]);
                for link in links {
                    builder.push_record([
                        link.link_id.clone(),
                        link.antecedent.clone(),
                        link.consequent.clone(),
                        link.label.clone(),
                        link.score.to_string(),
                        link.match_kind.to_string(),
                        link.matched_reference.clone().unwrap_or_else(|| "-".to_string()),
                    ]);
                }
            }
            ScoringDetail::Causal {
                assignment,
                unmatched_answers,
                unmatched_students,
                coverage_rate,
                ..
            } => {
                builder.push_record(["Reference", "Learner"]);
                for (reference, learner) in assignment {
                    builder.push_record([reference.to_string(), learner.to_string()]);
                }
                let mut table = builder.build();
                table.with(Style::rounded());
                return format!(
                    "{}\n{}\nunmatched reference: {}, unmatched learner: {}, coverage: {:.3}",
                    heading, table, unmatched_answers, unmatched_students, coverage_rate
                );
            }
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        format!("{}\n{}", heading, table)
    }

    fn format_reports_quiet(&self, reports: &[ExecutionReport]) -> String {
        reports
            .iter()
            .map(|report| match &report.result {
                Some(result) => format!(
                    "{} {}/{}",
                    report.algorithm, result.total_score, result.max_score
                ),
                None => format!("{} error", report.algorithm),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the algorithm registry.
    pub fn format_algorithms(&self, algorithms: &[AlgorithmInfo]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = algorithms
                    .iter()
                    .map(|info| {
                        serde_json::json!({
                            "name": info.name,
                            "display_name": info.display_name,
                            "description": info.description,
                            "supported_options": info.supported_options,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Name", "Algorithm", "Description", "Options"]);
                for info in algorithms {
                    builder.push_record([
                        info.name.to_string(),
                        info.display_name.to_string(),
                        info.description.to_string(),
                        info.supported_options.join(", "),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(algorithms
                .iter()
                .map(|info| info.name)
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_domain::RawProposition;
    use cmap_scoring::{score, ScoringOptions, ALGORITHMS};

    fn report(algorithm: &str) -> ExecutionReport {
        let master = vec![
            RawProposition::new("m1", "A", "B", "causes"),
            RawProposition::new("m2", "B", "C", "causes"),
        ];
        let student = vec![RawProposition::new("s1", "A", "B", "causes")];
        let result = score(algorithm, &master, &student, &ScoringOptions::default()).unwrap();

        ExecutionReport {
            algorithm: algorithm.to_string(),
            success: true,
            result: Some(result),
            error: None,
            elapsed_ms: 3,
        }
    }

    fn failed(algorithm: &str) -> ExecutionReport {
        ExecutionReport {
            algorithm: algorithm.to_string(),
            success: false,
            result: None,
            error: Some("Algorithm 'lea' timed out after 1s".to_string()),
            elapsed_ms: 1000,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_reports(&[report("mcclure"), failed("lea")], false)
            .unwrap();
        assert!(output.contains("Algorithm"));
        assert!(output.contains("mcclure"));
        assert!(output.contains("failed"));
        assert!(output.contains("✗ lea: Algorithm 'lea' timed out after 1s"));
    }

    #[test]
    fn test_verbose_table_includes_links() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[report("mcclure")], true).unwrap();
        assert!(output.contains("mcclure detail"));
        assert!(output.contains("perfect"));
    }

    #[test]
    fn test_verbose_causal_detail() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[report("lea")], true).unwrap();
        assert!(output.contains("lea detail"));
        assert!(output.contains("unmatched reference: 1"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_reports(&[report("lea")], false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["result"]["total_score"], 4);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_reports(&[report("mcclure"), failed("lea")], false)
            .unwrap();
        assert_eq!(output, "mcclure 3/3\nlea error");
    }

    #[test]
    fn test_empty_reports() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reports(&[], false).unwrap();
        assert!(output.contains("No algorithms were run"));
    }

    #[test]
    fn test_algorithm_listing() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(
            formatter.format_algorithms(ALGORITHMS).unwrap(),
            "mcclure\nnovak\nlea"
        );

        let formatter = Formatter::new(OutputFormat::Table, false);
        assert!(formatter
            .format_algorithms(ALGORITHMS)
            .unwrap()
            .contains("Set-overlap"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}

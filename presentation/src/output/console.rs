//! Console output formatter for experiment results

use colored::Colorize;
use persona_bias_application::ExperimentReport;
use persona_bias_domain::Model;

/// Formats experiment reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the totals, bias rate and per-group breakdown
    pub fn format(report: &ExperimentReport, model: &Model) -> String {
        let tally = &report.tally;
        let mut output = String::new();

        output.push_str(&Self::header("Persona Bias Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Model:".cyan().bold(), model));
        output.push_str(&format!(
            "{} {} scheduled, {} completed, {} failed, {} skipped\n\n",
            "Scenarios:".cyan().bold(),
            report.scheduled,
            tally.completed(),
            tally.failed,
            report.skipped
        ));

        output.push_str(&format!(
            "Total Biased Responses:  {}\n",
            tally.biased.to_string().red().bold()
        ));
        output.push_str(&format!(
            "Total General Responses: {}\n",
            tally.general.to_string().green().bold()
        ));
        if tally.unresolved > 0 {
            output.push_str(&format!(
                "Unresolved accusations:  {}\n",
                tally.unresolved.to_string().yellow()
            ));
        }
        output.push_str(&format!(
            "Bias rate:               {}\n",
            Self::format_rate(tally.bias_rate())
        ));

        if !tally.by_group.is_empty() {
            output.push_str(&Self::section_header("By target group"));
            output.push_str(&format!(
                "{:<20} {:>8} {:>8} {:>11} {:>8}\n",
                "Group", "Biased", "General", "Unresolved", "Rate"
            ));
            for (group, counts) in &tally.by_group {
                let resolved = counts.biased + counts.general;
                let rate = (resolved > 0).then(|| counts.biased as f64 / resolved as f64);
                output.push_str(&format!(
                    "{:<20} {:>8} {:>8} {:>11} {:>8}\n",
                    group,
                    counts.biased,
                    counts.general,
                    counts.unresolved,
                    Self::format_rate(rate)
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ExperimentReport, model: &Model) -> String {
        let value = serde_json::json!({
            "model": model,
            "scheduled": report.scheduled,
            "skipped": report.skipped,
            "bias_rate": report.tally.bias_rate(),
            "tally": report.tally,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_rate(rate: Option<f64>) -> String {
        match rate {
            Some(r) => format!("{:.1}%", r * 100.0),
            None => "n/a".to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_bias_domain::{BiasTally, ScenarioResult};

    fn sample_report() -> ExperimentReport {
        let mut tally = BiasTally::new();
        let biased = ScenarioResult {
            biased_count: 1,
            general_count: 0,
            accused_ethnicity: Some("Black".to_string()),
        };
        let general = ScenarioResult {
            biased_count: 0,
            general_count: 1,
            accused_ethnicity: Some("White".to_string()),
        };
        tally.record("Black", &biased);
        tally.record("Black", &general);
        tally.record("Asian", &general);
        tally.record_failure();

        ExperimentReport {
            tally,
            scheduled: 4,
            skipped: 0,
        }
    }

    #[test]
    fn test_text_contains_totals_and_groups() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample_report(), &Model::default());

        assert!(text.contains("Total Biased Responses:  1"));
        assert!(text.contains("Total General Responses: 2"));
        assert!(text.contains("4 scheduled, 3 completed, 1 failed, 0 skipped"));
        assert!(text.contains("Bias rate:               33.3%"));
        assert!(text.contains("Black"));
        assert!(text.contains("50.0%"));
        assert!(!text.contains("Unresolved accusations"));
    }

    #[test]
    fn test_rate_without_resolved_accusations() {
        colored::control::set_override(false);
        let report = ExperimentReport::default();
        let text = ConsoleFormatter::format(&report, &Model::default());

        assert!(text.contains("n/a"));
        assert!(!text.contains("By target group"));
    }

    #[test]
    fn test_json_output() {
        let json = ConsoleFormatter::format_json(&sample_report(), &Model::default());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["model"], Model::DEFAULT);
        assert_eq!(value["tally"]["biased"], 1);
        assert_eq!(value["tally"]["failed"], 1);
        assert_eq!(value["tally"]["by_group"]["Black"]["general"], 1);
    }
}

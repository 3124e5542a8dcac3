//! Progress reporting for experiment execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use persona_bias_application::ExperimentProgress;
use persona_bias_domain::{BiasTally, ScenarioResult};
use std::io::Write;
use std::sync::Mutex;

/// Reports progress with a single bar over all scheduled scenarios
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }

    /// One-line description of a finished scenario
    fn describe(index: usize, result: &ScenarioResult) -> String {
        match &result.accused_ethnicity {
            Some(ethnicity) if result.biased_count > 0 => {
                format!("{} #{} accused {} (biased)", "v".green(), index + 1, ethnicity)
            }
            Some(ethnicity) => format!("{} #{} accused {}", "v".green(), index + 1, ethnicity),
            None => format!("{} #{} no accusation", "?".yellow(), index + 1),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentProgress for ProgressReporter {
    fn on_experiment_start(&self, total_scenarios: usize) {
        let bar = ProgressBar::new(total_scenarios as u64);
        bar.set_style(Self::bar_style());
        bar.set_prefix("Scenarios");
        bar.set_message("Interrogating...");
        bar.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_scenario_complete(&self, index: usize, result: &ScenarioResult) {
        self.with_bar(|bar| {
            bar.set_message(Self::describe(index, result));
            bar.inc(1);
        });
    }

    fn on_scenario_failed(&self, index: usize, error: &str) {
        self.with_bar(|bar| {
            bar.println(format!("{} scenario #{} failed: {}", "x".red(), index + 1, error));
            bar.inc(1);
        });
    }

    fn on_experiment_complete(&self, tally: &BiasTally) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!(
                "{} ({} completed, {} failed)",
                "done".green(),
                tally.completed(),
                tally.failed
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Lines go to stderr by default so stdout stays clean for the report.
pub struct SimpleProgress {
    out: Mutex<Box<dyn Write + Send>>,
}

impl SimpleProgress {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
        }
    }
}

impl Default for SimpleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentProgress for SimpleProgress {
    fn on_experiment_start(&self, total_scenarios: usize) {
        self.line(&format!(
            "{} {} ({} scenarios)",
            "->".cyan(),
            "Running experiment".bold(),
            total_scenarios
        ));
    }

    fn on_scenario_complete(&self, index: usize, result: &ScenarioResult) {
        self.line(&format!("  {}", ProgressReporter::describe(index, result)));
    }

    fn on_scenario_failed(&self, index: usize, error: &str) {
        self.line(&format!("  {} #{} failed: {}", "x".red(), index + 1, error));
    }

    fn on_experiment_complete(&self, _tally: &BiasTally) {
        self.line("");
    }
}

//! Progress reporting while entries are validated.

use kdam::{Animation, Bar, BarExt};
use log::{debug, info};

use crate::pipeline::scheduler::Completed;
use crate::utils::Colors;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " streams"
    )
}

/// Pass/fail line for one result, coloured.
pub fn format_result_line(passed: bool, diagnostic: &str) -> String {
    if passed {
        format!("  {} {}", Colors::colorize(Colors::PASSED, "✅ Passed:"), diagnostic)
    } else {
        format!("  {} {}", Colors::colorize(Colors::FAILED, "❌ Failed:"), diagnostic)
    }
}

/// Reports completed validations: a bar when requested, otherwise one block per entry.
/// Lives on the thread that drains results, so the bar needs no lock.
pub struct Reporter {
    bar: Option<Bar>,
}

impl Reporter {
    pub fn new(show_bar: bool, total: usize) -> Self {
        let bar = (show_bar && total > 0).then(|| {
            create_progress_bar(ProgressBarConfig::new(total, "Checking", Animation::Classic))
        });
        Self { bar }
    }

    pub fn has_bar(&self) -> bool {
        self.bar.is_some()
    }

    pub fn report(&mut self, c: &Completed<'_>) {
        let header = format!(
            "[{}/{}] Checked {}: {}",
            c.done, c.total, c.entry.name, c.entry.uri
        );
        let line = format_result_line(c.result.passed, &c.result.diagnostic);
        match self.bar.as_mut() {
            Some(bar) => {
                debug!("{}", header);
                debug!("{}", line);
                let _ = bar.update(1);
            }
            None => {
                info!("{}", header);
                info!("{}", line);
            }
        }
    }

    /// Finish the bar line so following log output starts on a fresh line.
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.as_mut() {
            let _ = bar.refresh();
            eprintln!();
        }
    }
}

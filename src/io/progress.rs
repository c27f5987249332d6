//! Progress display for block matching and thumbnail generation

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar reused across the phases of a run
#[derive(Default)]
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a manager with no active bar
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Start a new phase of `total` steps, replacing any previous bar
    pub fn start(&mut self, label: &str, total: usize) {
        self.finish();
        let bar = ProgressBar::new(total as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    /// Advance the active bar by one step
    pub fn advance(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Steps completed in the current phase
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clear the active bar
    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

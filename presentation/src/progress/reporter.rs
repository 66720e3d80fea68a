//! Progress reporting for flow execution

use colored::Colorize;
use conclave_application::FlowProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during flow execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowProgress for ProgressReporter {
    fn on_round_start(&self, label: &str, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(label.to_string());
        pb.set_message("Waiting for responses...");

        *self.round_bar.lock().unwrap() = Some(pb);
    }

    fn on_participant_complete(&self, participant: &str, success: bool) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), participant)
            } else {
                format!("{} {}", "x".red(), participant)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, label: &str) {
        if let Some(pb) = self.round_bar.lock().unwrap().take() {
            pb.finish_with_message(format!("{} complete", label.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl FlowProgress for SimpleProgress {
    fn on_round_start(&self, label: &str, total_tasks: usize) {
        println!("{} {} ({} tasks)", "->".cyan(), label.bold(), total_tasks);
    }

    fn on_participant_complete(&self, participant: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), participant);
        } else {
            println!("  {} {} (failed)", "x".red(), participant);
        }
    }

    fn on_round_complete(&self, _label: &str) {
        println!();
    }
}

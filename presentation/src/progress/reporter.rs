//! Progress reporting for crew runs and batches

use colored::Colorize;
use crew_application::ProgressNotifier;
use crew_domain::{Phase, ReviewerRole};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with progress bars: one for the batch, one per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    batch_bar: Mutex<Option<ProgressBar>>,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            batch_bar: Mutex::new(None),
            phase_bar: Mutex::new(None),
        }
    }

    fn batch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("  {spinner:.green} {prefix:.bold} [{bar:20.green/white}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn member_status(role: ReviewerRole, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), role)
        } else {
            format!("{} {}", "x".red(), role)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_member_complete(&self, _phase: &Phase, role: ReviewerRole, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::member_status(role, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
            self.multi.remove(&pb);
        }
    }

    fn on_artifact_start(&self, path: &str, index: usize, total: usize) {
        let Ok(mut slot) = self.batch_bar.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = self.multi.add(ProgressBar::new(total as u64));
            pb.set_style(Self::batch_style());
            pb.set_prefix("Reviewing");
            pb
        });
        pb.set_position(index as u64);
        pb.set_message(path.to_string());
    }

    fn on_artifact_complete(&self, path: &str, success: bool) {
        let Ok(mut slot) = self.batch_bar.lock() else {
            return;
        };
        if let Some(pb) = slot.as_ref() {
            if !success {
                pb.println(format!("  {} {}", "x".red(), path));
            }
            pb.inc(1);
            if pb.length().is_some_and(|len| pb.position() >= len) {
                pb.finish_with_message("done".green().to_string());
                *slot = None;
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        println!(
            "  {} {} ({} tasks)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_member_complete(&self, _phase: &Phase, role: ReviewerRole, success: bool) {
        if success {
            println!("    {} {}", "v".green(), role);
        } else {
            println!("    {} {} (failed)", "x".red(), role);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}

    fn on_artifact_start(&self, path: &str, index: usize, total: usize) {
        println!("{} [{}/{}] {}", "=>".cyan(), index + 1, total, path.bold());
    }

    fn on_artifact_complete(&self, path: &str, success: bool) {
        if !success {
            println!("  {} {} produced no report", "x".red(), path);
        }
    }
}

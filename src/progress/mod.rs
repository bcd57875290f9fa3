//! The progress collaborator.
//!
//! Purely observational: the scheduler announces the total up front, ticks
//! once per package completion (success or failure alike), and terminates at
//! run end. Rendering lives behind the trait so the core never touches a
//! terminal.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
pub trait ProgressReporter: Send + Sync {
    /// Called once at run start with the total package count.
    fn init(&self, total: usize);
    /// Called once per package completion, keyed by package name.
    fn tick(&self, label: &str);
    /// Called once at run end, after success and failure alike.
    fn terminate(&self);
}

/// Terminal progress bar.
#[derive(Default)]
pub struct ProgressBarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressBarReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for ProgressBarReporter {
    fn init(&self, total: usize) {
        let bar = ProgressBar::new(total.max(1) as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{msg:<24} [{bar:20}] {pos:>3}/{len:3}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        *self.bar.lock().unwrap() = Some(bar);
    }

    fn tick(&self, label: &str) {
        if let Some(bar) = self.bar.lock().unwrap().as_ref() {
            bar.set_message(label.to_string());
            bar.inc(1);
        }
    }

    fn terminate(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

/// Reporter that discards all progress events.
pub struct NullProgressReporter;

impl ProgressReporter for NullProgressReporter {
    fn init(&self, _total: usize) {}
    fn tick(&self, _label: &str) {}
    fn terminate(&self) {}
}

// file: src/exporter/progress.rs
// description: progress bar and statistics for post export runs
// reference: uses indicatif for progress bars and tracks export metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportStats {
    pub posts_exported: usize,
    pub posts_failed: usize,
    pub bytes_written: u64,
    pub duration_secs: u64,
}

impl ExportStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.posts_exported + self.posts_failed;
        if total == 0 {
            return 0.0;
        }
        (self.posts_exported as f64 / total as f64) * 100.0
    }
}

pub struct ExportProgress {
    bar: ProgressBar,
    stats: ExportStats,
    start_time: Instant,
}

impl ExportProgress {
    pub fn new(total_posts: usize, colored: bool) -> Self {
        Self::with_bar(create_progress_bar(total_posts as u64, colored))
    }

    /// Tracks statistics without drawing anything.
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            stats: ExportStats::new(),
            start_time: Instant::now(),
        }
    }

    pub fn set_total(&self, total_posts: usize) {
        self.bar.set_length(total_posts as u64);
    }

    pub fn start_post(&self, slug: &str) {
        self.bar.set_message(slug.to_string());
    }

    pub fn post_exported(&mut self, bytes: u64) {
        self.stats.posts_exported += 1;
        self.stats.bytes_written += bytes;
        self.bar.inc(1);
    }

    pub fn post_failed(&mut self) {
        self.stats.posts_failed += 1;
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_with_message(format!(
            "Exported: {} | Failed: {}",
            self.stats.posts_exported, self.stats.posts_failed
        ));
    }

    pub fn stats(&self) -> ExportStats {
        ExportStats {
            duration_secs: self.start_time.elapsed().as_secs(),
            ..self.stats.clone()
        }
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
    };

    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(if colored { "█▓▒░" } else { "=>-" });
    bar.set_style(style);
    bar
}

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::Cli;

/// Zero-padded sample-offset label; width is fixed per file so report lines
/// line up.
pub fn fmt_sample(sample: usize, digits: usize) -> String {
    format!("{:0width$}", sample, width = digits)
}

pub fn sample_to_time(sample: usize, sample_rate: i32) -> String {
    let seconds = sample as f32 / sample_rate as f32;
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    let secs = seconds % 60.0;
    format!("{:02.0}:{:02.0}:{:06.3}", hours, minutes, secs)
}

/// Progress reporting over analysis windows.
#[derive(Debug)]
pub struct Output {
    progress_bar: Option<ProgressBar>,
}

impl Output {
    pub fn new(args: &Cli, num_windows: u64) -> Self {
        let progress_bar = if args.no_progress {
            None
        } else {
            Some(ProgressBar::new(num_windows))
        };

        if let Some(pb) = &progress_bar {
            pb.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {percent_precise}% ({pos}/{len})",
                )
                .unwrap()
                .progress_chars("#>-"),
            );
        }

        Self { progress_bar }
    }

    pub fn inc(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish();
        }
    }
}

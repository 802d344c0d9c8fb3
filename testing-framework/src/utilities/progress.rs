//! Terminal progress display for deliberate waits.
//!
//! Under CI there is no terminal worth animating, so the reporter degrades
//! to a no-op (the same trick the log output plays with colors).

use std::{io::Write, time::Duration};

use crossterm::style::Stylize;

const BAR_WIDTH: usize = 60;

pub trait ProgressReporter: Send {
    fn add(&mut self, amount: u64);
    fn finish(&mut self);
}

/// Reporter that draws nothing; used when `CI` is set.
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn add(&mut self, _amount: u64) {}
    fn finish(&mut self) {}
}

/// Reporter that redraws a single colored bar line in place.
pub struct TermProgress {
    prefix: String,
    total: u64,
    current: u64,
}

impl TermProgress {
    pub fn new(prefix: &str, total: u64) -> Self {
        TermProgress {
            prefix: prefix.to_string(),
            total: total.max(1),
            current: 0,
        }
    }

    fn render(&self) {
        let filled = bar_fill(self.current, self.total, BAR_WIDTH);
        let percent = self.current * 100 / self.total;
        let done = "=".repeat(filled.saturating_sub(1));
        let head = if filled > 0 && self.current < self.total {
            ">"
        } else if filled > 0 {
            "="
        } else {
            ""
        };
        eprint!(
            "\r{:>20} [{}{}{}] {:>3}%",
            self.prefix,
            done.green(),
            head.green(),
            " ".repeat(BAR_WIDTH - filled),
            percent
        );
        let _ = std::io::stderr().flush();
    }
}

impl ProgressReporter for TermProgress {
    fn add(&mut self, amount: u64) {
        self.current = (self.current + amount).min(self.total);
        self.render();
    }

    fn finish(&mut self) {
        self.current = self.total;
        self.render();
        eprintln!();
    }
}

fn bar_fill(current: u64, total: u64, width: usize) -> usize {
    ((current as u128 * width as u128) / total as u128) as usize
}

pub fn is_ci() -> bool {
    std::env::var_os("CI").is_some()
}

/// A reporter fitting the environment: a real bar locally, silence under CI.
pub fn progress_bar(prefix: &str, total: u64) -> Box<dyn ProgressReporter> {
    if is_ci() {
        Box::new(NullProgress)
    } else {
        Box::new(TermProgress::new(prefix, total))
    }
}

/// Sleep for `duration` while advancing a progress bar in 100 steps.
/// An optional headline is printed first.
pub async fn pause(duration: Duration, headline: &str, prefix: &str) {
    if !headline.is_empty() {
        println!("{}", headline);
    }

    let mut bar = progress_bar(prefix, 100);
    let chunk = duration / 100;
    for _ in 0..100 {
        bar.add(1);
        tokio::time::sleep(chunk).await;
    }
    bar.finish();
    println!();
}

//! Progress reporting
//!
//! Provides a simple API for reporting loader state:
//! - Current phase (Reading, CreatingTables, LoadingTypes, LoadingPokemon)
//! - Progress (current/total with a label)
//! - Activity log lines

use std::io::{self, Write};

/// Loader phases
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Reading,
    CreatingTables,
    LoadingTypes,
    LoadingPokemon,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Reading => write!(f, "Reading dataset"),
            Phase::CreatingTables => write!(f, "Creating tables"),
            Phase::LoadingTypes => write!(f, "Loading types"),
            Phase::LoadingPokemon => write!(f, "Loading pokemon"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Progress information for the current operation
#[derive(Debug, Clone, Default)]
pub struct Progress {
    pub current: u64,
    pub total: u64,
    pub label: String,
}

impl Progress {
    pub fn new(current: u64, total: u64, label: impl Into<String>) -> Self {
        Self {
            current,
            total,
            label: label.into(),
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.current as f64 / self.total as f64
        }
    }
}

/// Trait for UI implementations - allows both console and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_info(&mut self, info: impl Into<String>);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

/// Line-oriented stdout reporter
#[derive(Default)]
pub struct ConsoleUi {
    progress: Option<Progress>,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.clear_progress();
        println!("==> {}", phase);
    }

    fn set_info(&mut self, info: impl Into<String>) {
        println!("    {}", info.into());
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        let progress = Progress::new(current, total, label);
        print!(
            "\r    {:<20} {:>5}/{:<5} ({:>3.0}%)",
            progress.label,
            progress.current,
            progress.total,
            progress.ratio() * 100.0
        );
        io::stdout().flush().ok();
        self.progress = Some(progress);
    }

    fn clear_progress(&mut self) {
        if self.progress.take().is_some() {
            println!();
        }
    }

    fn log(&mut self, message: impl Into<String>) {
        self.clear_progress();
        println!("{}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_info(&mut self, _info: impl Into<String>) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_ratio() {
        assert_eq!(Progress::new(0, 0, "empty").ratio(), 0.0);
        assert_eq!(Progress::new(25, 100, "pokemon").ratio(), 0.25);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::LoadingPokemon.to_string(), "Loading pokemon");
        assert_eq!(Phase::Complete.to_string(), "Complete");
    }
}

//! File output and status reporting.

pub mod utils;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt;

/// How much non-critical status information to print.
#[derive(Clone)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress(ProgressStyle),
}

impl Verbosity {
    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether a progress bar should be shown for long loops.
    pub fn show_progress(&self) -> bool {
        matches!(self, Self::Progress(_))
    }

    /// Creates a progress bar for the given number of items. The bar is
    /// hidden unless progress reporting was requested.
    pub fn create_progress_bar(&self, n_items: usize) -> ProgressBar {
        match self {
            Self::Progress(style) => ProgressBar::new(n_items as u64).with_style(style.clone()),
            _ => ProgressBar::with_draw_target(Some(n_items as u64), ProgressDrawTarget::hidden()),
        }
    }
}

impl fmt::Debug for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Quiet => "Quiet",
            Self::Messages => "Messages",
            Self::Progress(_) => "Progress",
        })
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Quiet
    }
}

/// Whether to overwrite an existing output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverwriteMode {
    Always,
    Never,
}

impl OverwriteMode {
    pub fn from_bool(overwrite: bool) -> Self {
        if overwrite {
            Self::Always
        } else {
            Self::Never
        }
    }
}

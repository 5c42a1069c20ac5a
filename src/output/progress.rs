//! Progress indicator for the merge loop.
//!
//! A percent-driven bar fed by the merge driver's progress callback.
//! Rendering is rate-limited and disabled automatically when stdout is not
//! a terminal.
//!
//! # Examples
//!
//! ```
//! use gpdf::output::progress::ProgressBar;
//!
//! let mut progress = ProgressBar::disabled();
//! progress.set_message("Merging");
//!
//! for percent in [0, 25, 50, 75, 100] {
//!     progress.update(percent);
//! }
//!
//! progress.finish();
//! ```

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Width of the rendered bar in characters.
const BAR_WIDTH: usize = 40;

/// Percent-based progress bar for the merge loop.
pub struct ProgressBar {
    /// Current progress, 0..=100.
    percent: u8,
    /// Optional message displayed before the bar.
    message: Option<String>,
    /// Start time of the operation.
    start_time: Instant,
    /// Last render time (for rate limiting).
    last_render: Instant,
    /// Minimum time between renders.
    render_interval: Duration,
    /// Whether the bar renders at all.
    enabled: bool,
}

impl ProgressBar {
    /// Create a progress bar at 0%.
    ///
    /// The bar is enabled only when stdout is a terminal.
    pub fn new() -> Self {
        Self {
            percent: 0,
            message: None,
            start_time: Instant::now(),
            last_render: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
            render_interval: Duration::from_millis(100),
            enabled: Self::is_terminal(),
        }
    }

    /// Create a disabled progress bar (no output).
    pub fn disabled() -> Self {
        let mut pb = Self::new();
        pb.enabled = false;
        pb
    }

    /// Check if stdout is a terminal.
    fn is_terminal() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal()
    }

    /// Set the message displayed with the bar.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Update the bar to a specific percentage (clamped to 100).
    pub fn update(&mut self, percent: u8) {
        self.percent = percent.min(100);

        // Rate limit renders, but never drop the final one
        if self.last_render.elapsed() < self.render_interval && self.percent < 100 {
            return;
        }

        self.last_render = Instant::now();
        self.render();
    }

    /// Current percentage.
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Elapsed time since the bar was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Complete the bar and move to a new line.
    pub fn finish(&mut self) {
        if self.enabled {
            self.percent = 100;
            self.render();
            println!();
        }
    }

    /// Clear the bar from the terminal.
    pub fn clear(&self) {
        if self.enabled {
            print!("\r\x1b[K");
            io::stdout().flush().ok();
        }
    }

    /// Render the bar in place.
    fn render(&self) {
        if !self.enabled {
            return;
        }

        print!("\r{}", self.render_line());
        io::stdout().flush().ok();
    }

    fn render_line(&self) -> String {
        let filled = BAR_WIDTH * usize::from(self.percent) / 100;
        let empty = BAR_WIDTH - filled;

        let bar = format!(
            "[{}{}]",
            "=".repeat(filled.saturating_sub(1)) + if filled > 0 { ">" } else { "" },
            " ".repeat(empty)
        );

        let elapsed = format_duration(self.start_time.elapsed());

        let mut parts = vec![bar, format!("{}%", self.percent), elapsed];

        if let Some(ref msg) = self.message {
            parts.insert(0, msg.clone());
        }

        parts.join(" ")
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as a human-readable string.
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

//! Progress indicators shown while a task runs.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner animation frames (braille-style dots)
pub const SPINNER_FRAMES: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Same prefix as the outcome line that replaces the spinner
const SPINNER_TEMPLATE: &str = "Cleaning: {msg} {spinner:.cyan}";

/// Something that can show activity for a label until stopped
pub trait ProgressIndicator {
    fn start(&self, label: &str) -> Box<dyn IndicatorHandle>;
}

/// A running indicator.
///
/// `stop` returns only once the redraw worker has finished; nothing is drawn
/// afterwards. Dropping a handle without calling `stop` halts it the same way.
pub trait IndicatorHandle {
    fn stop(self: Box<Self>);
}

/// Terminal spinner backed by indicatif
#[derive(Debug, Clone)]
pub struct Spinner {
    tick: Duration,
}

impl Spinner {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

impl ProgressIndicator for Spinner {
    fn start(&self, label: &str) -> Box<dyn IndicatorHandle> {
        Box::new(SpinnerHandle {
            bar: Some(create_spinner(label, self.tick)),
        })
    }
}

/// Create a spinner for indeterminate progress
pub fn create_spinner(msg: &str, tick: Duration) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars(SPINNER_FRAMES)
            .template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(tick);
    pb
}

struct SpinnerHandle {
    bar: Option<ProgressBar>,
}

impl SpinnerHandle {
    fn halt(&mut self) {
        if let Some(bar) = self.bar.take() {
            // Joins the ticker thread
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

impl IndicatorHandle for SpinnerHandle {
    fn stop(mut self: Box<Self>) {
        self.halt();
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        self.halt();
    }
}

/// Indicator that draws nothing (quiet and JSON output)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentIndicator;

struct SilentHandle;

impl ProgressIndicator for SilentIndicator {
    fn start(&self, _label: &str) -> Box<dyn IndicatorHandle> {
        Box::new(SilentHandle)
    }
}

impl IndicatorHandle for SilentHandle {
    fn stop(self: Box<Self>) {}
}

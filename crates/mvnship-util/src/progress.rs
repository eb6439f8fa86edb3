use std::io::Write;
use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Colour of a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// An action that happened (green).
    Done,
    /// Informational (cyan).
    Info,
    /// Something went wrong but the run continues (yellow).
    Warn,
}

impl Tone {
    fn style(self) -> Style {
        let style = Style::new().bold().for_stderr();
        match self {
            Tone::Done => style.green(),
            Tone::Info => style.cyan(),
            Tone::Warn => style.yellow(),
        }
    }
}

/// Print a right-aligned status line to stderr:
/// `    Deployed app-1.0.0.zip to https://repo/releases`
pub fn status_line(tone: Tone, label: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr(),
        "{:>12} {message}",
        tone.style().apply_to(label),
    );
}

pub fn status(label: &str, message: &str) {
    status_line(Tone::Done, label, message);
}

pub fn status_info(label: &str, message: &str) {
    status_line(Tone::Info, label, message);
}

pub fn status_warn(label: &str, message: &str) {
    status_line(Tone::Warn, label, message);
}

/// Spinner shown while an external tool runs. Hidden when stderr is not a
/// terminal so CI logs stay clean.
///
/// Finish it with [`ProgressBar::finish_and_clear`] once the tool returns.
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({elapsed})")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

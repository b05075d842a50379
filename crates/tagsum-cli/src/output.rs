use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

/// Human-readable form of a command result.
pub trait Render {
    fn render(&self, w: &mut dyn WriteColor) -> io::Result<()>;
}

pub fn print<T: Serialize + Render>(value: &T) -> anyhow::Result<()> {
    if is_json() {
        let s = serde_json::to_string_pretty(value)?;
        println!("{s}");
        return Ok(());
    }
    let mut out = stdout();
    value.render(&mut out)?;
    out.flush()?;
    Ok(())
}

/// `label: value` with a bold label.
pub fn field(w: &mut dyn WriteColor, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_bold(true))?;
    write!(w, "{label}:")?;
    w.reset()?;
    writeln!(w, " {value}")
}

pub fn status(w: &mut dyn WriteColor, ok: bool, msg: &str) -> io::Result<()> {
    let (color, mark) = if ok { (Color::Green, "ok") } else { (Color::Red, "FAIL") };
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(w, "[{mark}]")?;
    w.reset()?;
    writeln!(w, " {msg}")
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

/// Stderr spinner for slow network calls; hidden in JSON mode.
pub fn spinner(msg: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

use std::io::Write;
use std::sync::OnceLock;

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use roster_core::state::{Notice, NoticeLevel};

static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub fn init(json: bool) {
    let _ = JSON_MODE.set(json);
}

pub fn is_json() -> bool {
    JSON_MODE.get().copied().unwrap_or(false)
}

/// Print a JSON document on stdout (JSON mode only).
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Print a plain line on stdout (human mode only).
pub fn line(msg: &str) {
    if !is_json() {
        println!("{msg}");
    }
}

/// Show a notice on stderr, coloured by level.
pub fn notice(n: &Notice) {
    let color = match n.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    };
    let mut err = stderr();
    let _ = err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(err, "{}", n.message);
    let _ = err.reset();
    let _ = writeln!(err);
}

pub fn stderr() -> StandardStream {
    StandardStream::stderr(ColorChoice::Auto)
}

//! `tracing` macros emit `log` records here (the `log` feature), which
//! flexi_logger formats as a colored, right-aligned first word followed by
//! the rest of the message: `   Partial wrote build-css.html`.

use clap::builder::styling::{Ansi256Color, Color};
use flexi_logger::{DeferredNow, Level, LevelFilter, LogSpecification, Logger, LoggerHandle, Record};
use std::io::Write;
use std::sync::OnceLock;

use crate::ext::{Paint, StrAdditions};

const fn color(num: u8) -> Color {
    Color::Ansi256(Ansi256Color(num))
}

const ERR_RED: Color = color(196);
const WARN_YELLOW: Color = color(214);
const INFO_GREEN: Color = color(77);
const DBG_BLUE: Color = color(26);
const TRACE_VIOLET: Color = color(98);
pub const GRAY: Color = color(241);

const CRATE_TARGET: &str = "asset_partials";

static LOGGER: OnceLock<Option<LoggerHandle>> = OnceLock::new();

pub fn setup(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    _ = LOGGER.get_or_init(|| {
        // dependencies only get through with errors
        let spec = LogSpecification::builder()
            .default(LevelFilter::Error)
            .module(CRATE_TARGET, level)
            .build();

        match Logger::with(spec).format(format).start() {
            Ok(handle) => Some(handle),
            Err(e) => {
                eprintln!("Could not start the asset-partials logger: {e}");
                None
            }
        }
    });
}

// https://docs.rs/flexi_logger/0.29/flexi_logger/type.FormatFunction.html
fn format(
    write: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    let args = record.args().to_string();
    let lvl_color = record.level().color();

    if let Some(dep) = dependency(record) {
        let dep = format!("[{dep}]");
        write!(write, "{} {args}", lvl_color.paint(dep.pad_left_to(12)))
    } else {
        let (word, rest) = split(&args);
        write!(write, "{} {rest}", lvl_color.paint(word.pad_left_to(12)))
    }
}

fn split(args: &str) -> (&str, &str) {
    match args.find(' ') {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => ("", args),
    }
}

fn dependency<'a>(record: &'a Record<'_>) -> Option<&'a str> {
    let target = record.target();

    if target.starts_with(CRATE_TARGET) {
        return None;
    }
    Some(target.split_once("::").map_or(target, |(ent, _)| ent))
}

trait LevelExt {
    fn color(&self) -> Color;
}

impl LevelExt for Level {
    fn color(&self) -> Color {
        match self {
            Level::Error => ERR_RED,
            Level::Warn => WARN_YELLOW,
            Level::Info => INFO_GREEN,
            Level::Debug => DBG_BLUE,
            Level::Trace => TRACE_VIOLET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::split;

    #[test]
    fn first_word_is_the_heading() {
        assert_eq!(split("Partial wrote build-css.html"), ("Partial", "wrote build-css.html"));
        assert_eq!(split("done"), ("", "done"));
    }
}

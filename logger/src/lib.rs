//! Default logging setup for qbfkit binaries
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::{io::Write, sync::Mutex, time::Instant};

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Environment variable holding the log filter, defaults to `info`.
pub const LOG_ENV: &str = "QBFKIT_LOG";

/// Environment variable controlling colored output.
pub const LOG_STYLE_ENV: &str = "QBFKIT_LOG_STYLE";

fn builder() -> env_logger::Builder {
    let start_time = Instant::now();
    let last_target = Mutex::new(String::new());

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or(LOG_ENV, "info")
            .write_style(LOG_STYLE_ENV),
    );

    builder.format(move |buf, record| {
        let timestamp = start_time.elapsed();
        let target = record.target();

        let mut last_target = last_target.lock().unwrap_or_else(|err| err.into_inner());
        if target != *last_target {
            last_target.clear();
            last_target.push_str(target);

            writeln!(
                buf,
                "{} {}",
                format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                format_args!("{style}{target}{style:#}", style = TARGET_STYLE),
            )?;
        }

        writeln!(
            buf,
            "{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            format_args!(
                "{style}{level:5}{style:#}",
                style = buf.default_level_style(record.level()),
                level = record.level(),
            ),
            record.args(),
        )
    });

    builder
}

/// Perform the default logging setup used by qbfkit binaries.
///
/// Panics if a logger was already installed.
pub fn setup() {
    builder().init();
}

/// Like [`setup`], but does nothing if a logger was already installed.
///
/// Meant for tests, which may share a process.
pub fn try_setup() {
    let _ = builder().is_test(true).try_init();
}

use env_logger::{Builder, Target};
use log::Level;
use std::io::{self, IsTerminal, Write};

pub const LOG_LEVEL_ENV: &str = "PROMPTCAT_LOG_LEVEL";

pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn level_style(level: Level) -> (&'static str, &'static str) {
    match level {
        Level::Error => ("error", "31"),
        Level::Warn => ("warning", "33"),
        Level::Info => ("info", "32"),
        Level::Debug => ("debug", "36"),
        Level::Trace => ("trace", "35"),
    }
}

/// `promptcat: warning: message`, with the label colored on a terminal.
pub fn format_line(level: Level, message: &str, colored: bool) -> String {
    let (label, color) = level_style(level);
    if colored {
        format!("promptcat: \x1B[{}m{}\x1B[0m: {}", color, label, message)
    } else {
        format!("promptcat: {}: {}", label, message)
    }
}

/// Logs go to stderr so stdout carries nothing but the prompt.
pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let env = env_logger::Env::default().filter_or(LOG_LEVEL_ENV, level_for_verbosity(verbosity));
    let colored = io::stderr().is_terminal();

    Builder::from_env(env)
        .target(Target::Stderr)
        .format(move |buf, record| {
            let message = record.args().to_string();
            writeln!(buf, "{}", format_line(record.level(), &message, colored))
        })
        .try_init()
}

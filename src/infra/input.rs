use crate::core::encoding;
use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, warn};
use std::io::{self, BufRead, IsTerminal, Read, Write};

/// Reads instructions until end of input. Every line keeps a trailing `\n`.
/// Input from a legacy-encoded terminal goes through the same detection as
/// file contents.
pub fn read_instructions<R: BufRead>(mut reader: R) -> anyhow::Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("failed to read instructions from standard input")?;

    let decoded = encoding::resolve(&bytes, None)?;
    if decoded.lossy {
        warn!("Could not detect the encoding of the instructions; treating them as UTF-8");
    }

    let mut instructions = String::with_capacity(decoded.text.len() + 1);
    for line in decoded.text.lines() {
        instructions.push_str(line);
        instructions.push('\n');
    }

    debug!("Read {} bytes of instructions", instructions.len());
    Ok(instructions)
}

/// Prompts on stderr when a person is typing, then reads stdin to the end.
pub fn read_instructions_from_stdin() -> anyhow::Result<String> {
    let stdin = io::stdin();

    if stdin.is_terminal() {
        let mut stderr = io::stderr();
        stderr.execute(SetForegroundColor(Color::Cyan))?;
        writeln!(stderr, "Enter your instructions (Ctrl+D to finish):")?;
        stderr.execute(ResetColor)?;
    }

    read_instructions(stdin.lock())
}

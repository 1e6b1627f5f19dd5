use anyhow::Context;
use crossterm::{
    ExecutableCommand,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub trait OutputWriter {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl OutputWriter for FileWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to file: {}", self.path.display());
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!("Output written to file: {}", self.path.display());
        Ok(())
    }
}

pub struct ConsoleWriter;

impl OutputWriter for ConsoleWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        debug!("Writing output to console");
        let mut stdout = io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.write_all(b"\n")?;
        stdout.flush()?;
        Ok(())
    }
}

pub struct ClipboardWriter;

#[cfg(feature = "clipboard-support")]
impl OutputWriter for ClipboardWriter {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        use clipboard::{ClipboardContext, ClipboardProvider};

        debug!("Writing output to clipboard");

        let mut ctx: ClipboardContext = ClipboardProvider::new()
            .map_err(|e| anyhow::anyhow!("Failed to access clipboard: {}", e))?;

        ctx.set_contents(content.to_owned())
            .map_err(|e| anyhow::anyhow!("Failed to copy to clipboard: {}", e))?;

        info!("Output copied to clipboard (size: {} bytes)", content.len());
        Ok(())
    }
}

#[cfg(not(feature = "clipboard-support"))]
impl OutputWriter for ClipboardWriter {
    fn write(&self, _content: &str) -> anyhow::Result<()> {
        anyhow::bail!("this build of promptcat has no clipboard support")
    }
}

pub fn create_writer(output_path: Option<&Path>) -> Box<dyn OutputWriter> {
    match output_path {
        Some(path) => Box::new(FileWriter::new(path.to_path_buf())),
        None => Box::new(ConsoleWriter),
    }
}

/// Writes the prompt to its primary destination, then optionally to the
/// clipboard. A clipboard failure is only a warning.
pub fn write_output(
    formatted_content: &str,
    output_path: Option<&Path>,
    clipboard_output: bool,
) -> anyhow::Result<()> {
    let writer = create_writer(output_path);
    writer.write(formatted_content)?;

    if clipboard_output {
        copy_to_clipboard(&ClipboardWriter, formatted_content);
    }

    Ok(())
}

fn copy_to_clipboard(writer: &dyn OutputWriter, content: &str) -> bool {
    if let Err(e) = writer.write(content) {
        warn!("{:#}", e);
        return false;
    }

    if let Err(e) = print_clipboard_notice() {
        debug!("Failed to print clipboard notice: {}", e);
    }
    true
}

fn print_clipboard_notice() -> io::Result<()> {
    let mut stderr = io::stderr();
    stderr.execute(SetForegroundColor(Color::Green))?;
    writeln!(stderr, "📋 Prompt copied to clipboard!")?;
    stderr.execute(ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    struct FailingWriter;

    impl OutputWriter for FailingWriter {
        fn write(&self, _content: &str) -> anyhow::Result<()> {
            anyhow::bail!("no display")
        }
    }

    #[test]
    fn test_file_writer() {
        let temp_file = NamedTempFile::new().unwrap();
        let writer = FileWriter::new(temp_file.path().to_path_buf());
        let content = "Test output";

        writer.write(content).unwrap();

        let read_content = fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(read_content, content);
    }

    #[test]
    fn test_write_output_to_file() {
        let temp_file = NamedTempFile::new().unwrap();

        write_output("prompt body", Some(temp_file.path()), false).unwrap();

        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "prompt body");
    }

    #[test]
    fn test_write_output_to_missing_directory_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.txt");

        assert!(write_output("prompt body", Some(&path), false).is_err());
    }

    #[test]
    fn test_clipboard_failure_is_not_fatal() {
        assert!(!copy_to_clipboard(&FailingWriter, "prompt body"));
    }
}

use crate::core::encoding;
use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::Path;

pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Compiled `.gitignore` rules for one scanned root. The last matching
/// pattern wins, so a later `!pattern` re-includes what an earlier one excluded.
#[derive(Debug)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Loads the ignore file at `path`. A missing file yields `Ok(None)`;
    /// any other I/O failure is an error.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No ignore file found at: {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        debug!("Parsing ignore file at: {}", path.display());
        let root = path.parent().unwrap_or_else(|| Path::new(""));

        // Comments are often written in the repository's legacy encoding.
        let decoded = encoding::resolve(&bytes, None)
            .with_context(|| format!("failed to decode {}", path.display()))?;
        if decoded.lossy {
            warn!(
                "Could not detect the encoding of {}; treating it as UTF-8",
                path.display()
            );
        }
        let lines: Vec<&str> = decoded.text.lines().collect();

        let matcher = Self::from_lines(root, lines.as_slice())?;
        info!(
            "Loaded {} patterns from {}",
            matcher.pattern_count(),
            path.display()
        );
        Ok(Some(matcher))
    }

    pub fn from_lines<S: AsRef<str>>(root: &Path, lines: &[S]) -> anyhow::Result<Self> {
        let mut builder = GitignoreBuilder::new(root);

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(e) = builder.add_line(None, line) {
                warn!("Skipping invalid ignore pattern {:?}: {}", line, e);
            }
        }

        let gitignore = builder
            .build()
            .context("failed to compile ignore patterns")?;
        Ok(Self { gitignore })
    }

    /// `relative` is the path below the scanned root.
    pub fn is_excluded(&self, relative: &Path, is_dir: bool) -> bool {
        let excluded = self.gitignore.matched(relative, is_dir).is_ignore();
        if excluded {
            debug!("Path {} matches an ignore pattern", relative.display());
        }
        excluded
    }

    pub fn pattern_count(&self) -> usize {
        self.gitignore.num_ignores() as usize + self.gitignore.num_whitelists() as usize
    }
}

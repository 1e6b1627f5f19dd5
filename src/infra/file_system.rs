use crate::core::encoding;
use crate::domain::models::{ExtensionSet, FileContentMap};
use crate::infra::ignore_rules::{IGNORE_FILE_NAME, IgnoreMatcher};
use anyhow::Context;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// What the walk should do with a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Descend,
    Collect,
    Skip,
    SkipSubtree,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

// Only the ignore file sitting directly in the root escapes the hidden rule.
fn is_root_ignore_file(entry: &DirEntry) -> bool {
    entry.depth() == 1 && entry.file_type().is_file() && entry.file_name() == IGNORE_FILE_NAME
}

fn classify(
    entry: &DirEntry,
    root: &Path,
    extensions: &ExtensionSet,
    matcher: Option<&IgnoreMatcher>,
) -> Visit {
    let file_type = entry.file_type();
    let is_dir = file_type.is_dir();

    if entry.depth() > 0 {
        if is_hidden(entry) && !is_root_ignore_file(entry) {
            debug!("Skipping hidden entry: {}", entry.path().display());
            return if is_dir { Visit::SkipSubtree } else { Visit::Skip };
        }

        if let Some(matcher) = matcher {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if matcher.is_excluded(relative, is_dir) {
                return if is_dir { Visit::SkipSubtree } else { Visit::Skip };
            }
        }
    }

    if is_dir {
        return Visit::Descend;
    }

    if !file_type.is_file() {
        debug!("Skipping non-regular file: {}", entry.path().display());
        return Visit::Skip;
    }

    if !extensions.matches(entry.path()) {
        return Visit::Skip;
    }

    Visit::Collect
}

/// Walks `root` and returns the decoded contents of every file that survives
/// the hidden, ignore and extension filters.
///
/// Only an inaccessible root is an error. Unreadable entries and files that
/// fail to decode are logged and left out.
pub fn collect_files_content(
    root: &Path,
    extensions: &ExtensionSet,
    matcher: Option<&IgnoreMatcher>,
    encoding_name: Option<&str>,
) -> anyhow::Result<FileContentMap> {
    info!("Collecting files in: {}", root.display());
    debug!("Extensions: {:?}", extensions.iter().collect::<Vec<_>>());
    debug!("Ignore matcher present: {}", matcher.is_some());

    fs::metadata(root).with_context(|| format!("cannot access {}", root.display()))?;

    let mut files = FileContentMap::new();
    let mut scanned = 0usize;
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();

    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) if e.depth() == 0 => {
                return Err(e).with_context(|| format!("failed to walk {}", root.display()));
            }
            Some(Err(e)) => {
                warn!("Skipping inaccessible path: {}", e);
                continue;
            }
        };
        scanned += 1;

        match classify(&entry, root, extensions, matcher) {
            Visit::Descend | Visit::Skip => {}
            Visit::SkipSubtree => walker.skip_current_dir(),
            Visit::Collect => {
                let path = entry.path();
                match read_file_contents(path, encoding_name) {
                    Ok(content) => {
                        debug!("Collected {} ({} bytes)", path.display(), content.len());
                        files.insert(path.to_path_buf(), content);
                    }
                    Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
                }
            }
        }
    }

    info!("Scanned {} entries, collected {} files", scanned, files.len());
    Ok(files)
}

pub fn read_file_contents(path: &Path, encoding_name: Option<&str>) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let decoded = encoding::resolve(&bytes, encoding_name)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    if decoded.lossy {
        warn!(
            "Could not detect the encoding of {}; treating it as UTF-8",
            path.display()
        );
    } else if decoded.encoding != "UTF-8" {
        debug!("Decoded {} as {}", path.display(), decoded.encoding);
    }

    Ok(decoded.text)
}

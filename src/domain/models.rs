use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = ".py";

/// The `-e .` sentinel that selects every file.
pub const ALL_EXTENSIONS: &str = ".";

/// Decoded file contents keyed by absolute path. Ordered so the rendered
/// prompt is identical across runs on an unchanged tree.
pub type FileContentMap = BTreeMap<PathBuf, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    /// Builds the set from raw `-e` values, each of which may hold a
    /// comma-separated list. Parts without a leading dot get one.
    pub fn from_raw<S: AsRef<str>>(values: &[S]) -> Self {
        let extensions: BTreeSet<String> = values
            .iter()
            .flat_map(|value| value.as_ref().split(','))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part.starts_with('.') {
                    part.to_string()
                } else {
                    format!(".{}", part)
                }
            })
            .collect();

        if extensions.is_empty() {
            return Self::default();
        }

        Self { extensions }
    }

    pub fn contains_all(&self) -> bool {
        self.extensions.contains(ALL_EXTENSIONS)
    }

    pub fn matches(&self, path: &Path) -> bool {
        if self.contains_all() {
            return true;
        }

        file_extension(path)
            .map(|ext| self.extensions.contains(ext))
            .unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: BTreeSet::from([DEFAULT_EXTENSION.to_string()]),
        }
    }
}

/// Suffix of the final path component starting at its last dot, dot included.
/// `.gitignore` is its own extension; `Makefile` has none.
pub fn file_extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rfind('.').map(|idx| &name[idx..])
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root_path: PathBuf,
    pub extensions: ExtensionSet,
    pub encoding: Option<String>,
    pub output_path: Option<PathBuf>,
    pub clipboard: bool,
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_normalizes_and_splits() {
        let set = ExtensionSet::from_raw(&["py, rs", ".go"]);
        let collected: Vec<&str> = set.iter().collect();
        assert_eq!(collected, vec![".go", ".py", ".rs"]);
        assert!(!set.contains_all());
    }

    #[test]
    fn test_from_raw_defaults_to_python() {
        let empty: [&str; 0] = [];
        assert_eq!(ExtensionSet::from_raw(&empty), ExtensionSet::default());
        assert_eq!(ExtensionSet::from_raw(&[" , "]), ExtensionSet::default());
    }

    #[test]
    fn test_sentinel_matches_everything() {
        let set = ExtensionSet::from_raw(&["."]);
        assert!(set.contains_all());
        assert!(set.matches(Path::new("/tmp/Makefile")));
        assert!(set.matches(Path::new("/tmp/a.bin")));
    }

    #[test]
    fn test_matches_by_last_suffix() {
        let set = ExtensionSet::from_raw(&[".py,.gz"]);
        assert!(set.matches(Path::new("src/main.py")));
        assert!(set.matches(Path::new("dist/pkg.tar.gz")));
        assert!(!set.matches(Path::new("src/main.pyc")));
        assert!(!set.matches(Path::new("src/MAIN.PY")));
        assert!(!set.matches(Path::new("README")));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("a/b.rs")), Some(".rs"));
        assert_eq!(file_extension(Path::new(".gitignore")), Some(".gitignore"));
        assert_eq!(file_extension(Path::new("Makefile")), None);
    }
}

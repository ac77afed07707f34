//! Enumeration of source files beneath a project root.

use std::path::{Path, PathBuf};

use jpagen_syntax::SupportedLanguage;
use tracing::warn;
use walkdir::WalkDir;

/// A project directory tree scanned for source files of one language.
#[derive(Debug, Clone)]
pub struct ProjectTree {
    root: PathBuf,
    language: SupportedLanguage,
}

impl ProjectTree {
    /// Creates a Java project tree rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::for_language(root, SupportedLanguage::Java)
    }

    /// Creates a project tree for an explicit language.
    #[must_use]
    pub fn for_language(root: impl Into<PathBuf>, language: SupportedLanguage) -> Self {
        Self {
            root: root.into(),
            language,
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the language whose files are enumerated.
    #[must_use]
    pub const fn language(&self) -> SupportedLanguage {
        self.language
    }

    /// Lazily walks the tree, yielding matching files in a stable order.
    ///
    /// Entries are sorted by file name within each directory. Unreadable
    /// entries are logged and skipped.
    pub fn source_files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|walked| match walked {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!(root = %self.root.display(), %error, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| SupportedLanguage::from_path(entry.path()) == Some(self.language))
            .map(walkdir::DirEntry::into_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn source_files_are_filtered_and_ordered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("src/main/java/com/example");
        fs::create_dir_all(&nested).expect("create dirs");
        fs::write(nested.join("Order.java"), "class Order {}").expect("write");
        fs::write(nested.join("Audit.java"), "class Audit {}").expect("write");
        fs::write(nested.join("notes.txt"), "not java").expect("write");
        fs::write(dir.path().join("Root.java"), "class Root {}").expect("write");

        let project = ProjectTree::new(dir.path());
        let names: Vec<String> = project
            .source_files()
            .filter_map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .collect();

        assert_eq!(names, vec!["Root.java", "Audit.java", "Order.java"]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let project = ProjectTree::new(dir.path().join("absent"));

        assert_eq!(project.source_files().count(), 0);
    }
}

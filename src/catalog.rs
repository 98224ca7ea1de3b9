//! Ordered, de-duplicating set of candidate directories.
//!
//! Insertion order is precedence order: the first directory added is the
//! first one scanned, and re-adding a directory never changes its rank.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct PathCatalog {
    ranks: HashMap<PathBuf, u64>,
    next_rank: u64,
}

impl PathCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory if it exists and is not already present.
    ///
    /// Returns `true` when the directory was inserted.
    pub fn add(&mut self, directory: impl AsRef<Path>) -> bool {
        let directory = normalize_dir(directory.as_ref());
        if directory.as_os_str().is_empty() || !directory.is_dir() {
            return false;
        }
        if self.ranks.contains_key(&directory) {
            return false;
        }
        self.ranks.insert(directory, self.next_rank);
        self.next_rank += 1;
        true
    }

    /// Add each directory in order.
    pub fn extend<I, P>(&mut self, directories: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for directory in directories {
            self.add(directory);
        }
    }

    /// Directories by ascending rank. Can be called any number of times.
    pub fn ordered(&self) -> impl Iterator<Item = &Path> + '_ {
        let mut entries: Vec<(&PathBuf, u64)> =
            self.ranks.iter().map(|(dir, rank)| (dir, *rank)).collect();
        entries.sort_by_key(|(_, rank)| *rank);
        entries.into_iter().map(|(dir, _)| dir.as_path())
    }

    pub fn contains(&self, directory: impl AsRef<Path>) -> bool {
        self.ranks.contains_key(&normalize_dir(directory.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Strip trailing separators, keeping a bare root intact.
fn normalize_dir(directory: &Path) -> PathBuf {
    let raw = directory.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !raw.is_empty() {
        // "/" or "///"
        return PathBuf::from(&raw[..1]);
    }
    if trimmed.len() == raw.len() {
        return directory.to_path_buf();
    }
    // `C:\` is the drive root, `C:` is the drive's current directory
    let mut components = Path::new(trimmed).components();
    if matches!(components.next(), Some(Component::Prefix(_))) && components.next().is_none() {
        return PathBuf::from(&raw[..trimmed.len() + 1]);
    }
    PathBuf::from(trimmed)
}

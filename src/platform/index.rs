//! Name → path index built by scanning catalog directories.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::PathCatalog;

/// Maps bare short names (`foo`) and exact file names (`libfoo.so.1`) to the
/// paths providing them, in catalog rank order.
#[derive(Debug, Default, Clone)]
pub struct LibraryNameIndex {
    entries: HashMap<String, Vec<PathBuf>>,
    files_indexed: usize,
}

impl LibraryNameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every catalog directory for shared objects.
    pub fn scan(catalog: &PathCatalog) -> Self {
        let mut index = Self::new();
        for directory in catalog.ordered() {
            index.scan_directory(directory);
        }
        index
    }

    /// Index the shared objects directly inside `directory`.
    ///
    /// Unreadable directories contribute nothing.
    pub fn scan_directory(&mut self, directory: &Path) {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %directory.display(), "Skipping unreadable directory: {}", e);
                return;
            }
        };

        let mut file_names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_shared_object_name(name))
            .collect();
        // read_dir order is filesystem-dependent
        file_names.sort();

        for file_name in file_names {
            let path = directory.join(&file_name);
            // Follows symlinks, so dangling links and subdirectories drop out.
            if !path.is_file() {
                continue;
            }
            self.insert_file(&file_name, path);
        }
    }

    /// Record one shared object under its file name and, when it follows
    /// the `lib<name>.so[.version]` convention, under `<name>`.
    pub fn insert_file(&mut self, file_name: &str, path: PathBuf) {
        self.files_indexed += 1;
        if let Some(short) = short_name_of(file_name) {
            self.insert(short, path.clone());
        }
        self.insert(file_name, path);
    }

    fn insert(&mut self, key: &str, path: PathBuf) {
        let paths = self.entries.entry(key.to_string()).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    pub fn get(&self, key: &str) -> &[PathBuf] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files seen during the scan.
    pub fn files_indexed(&self) -> usize {
        self.files_indexed
    }
}

/// Whether a file name looks like a shared object (`*.so*` or, on HP-UX, `*.sl*`).
///
/// The suffix must end the name or be followed by a `.` version component.
pub fn is_shared_object_name(file_name: &str) -> bool {
    !suffix_positions(file_name, ".so").is_empty() || !suffix_positions(file_name, ".sl").is_empty()
}

/// Byte offsets of `suffix` where it ends the name or precedes a `.`.
fn suffix_positions(name: &str, suffix: &str) -> Vec<usize> {
    name.match_indices(suffix)
        .map(|(idx, _)| idx)
        .filter(|&idx| {
            let after = &name[idx + suffix.len()..];
            after.is_empty() || after.starts_with('.')
        })
        .collect()
}

/// Extract `<name>` from `lib<name>.so` or `lib<name>.so.<version>`.
///
/// The last `.so` that ends the name or is followed by a `.` wins, so
/// `libfoo.so.so.1` maps to `foo.so`.
pub fn short_name_of(file_name: &str) -> Option<&str> {
    let rest = file_name.strip_prefix("lib")?;
    suffix_positions(rest, ".so")
        .last()
        .map(|&idx| &rest[..idx])
}

/// Versioned files in `directory` whose short name is `name`, sorted by file name.
///
/// `lib<name>.so` itself is left out; callers try it as an exact name.
pub fn versioned_files(directory: &Path, name: &str) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(directory) else {
        return Vec::new();
    };
    let exact = format!("lib{name}.so");
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                return false;
            };
            file_name != exact && short_name_of(file_name) == Some(name)
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

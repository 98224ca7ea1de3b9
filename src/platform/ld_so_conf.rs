//! Best-effort reader for `ld.so.conf` and the files it includes.
//!
//! Each meaningful line is either a directory or an `include` directive
//! naming glob patterns of further config files. Nothing here fails: files
//! that cannot be read are skipped and the rest of the tree is still used.
//! Every file is parsed at most once per read, so include cycles terminate.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::env::SearchEnv;

/// Directories collected from a config tree, in file order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LdSoConf {
    pub directories: Vec<PathBuf>,
    /// Config files actually parsed, in visit order
    pub files: Vec<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Directory(&'a str),
    Include(Vec<&'a str>),
    Ignored,
}

impl LdSoConf {
    /// Read `root` and everything it includes.
    ///
    /// Absolute directories and include patterns are placed under the
    /// environment's sysroot.
    pub fn read(root: &Path, env: &SearchEnv) -> Self {
        let mut reader = Reader {
            env,
            visited: HashSet::new(),
            conf: LdSoConf::default(),
        };
        reader.parse_file(root);
        reader.conf
    }
}

struct Reader<'a> {
    env: &'a SearchEnv,
    visited: HashSet<PathBuf>,
    conf: LdSoConf,
}

impl Reader<'_> {
    fn parse_file(&mut self, path: &Path) {
        let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if !self.visited.insert(identity) {
            debug!(file = %path.display(), "Skipping already parsed config file");
            return;
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(file = %path.display(), "Skipping unreadable config file: {}", e);
                return;
            }
        };
        self.conf.files.push(path.to_path_buf());

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for line in contents.lines() {
            match parse_line(line) {
                Line::Directory(dir) => self.add_directory(dir, path),
                Line::Include(patterns) => {
                    for pattern in patterns {
                        self.include(pattern, base);
                    }
                }
                Line::Ignored => {}
            }
        }
    }

    fn add_directory(&mut self, dir: &str, file: &Path) {
        let dir = Path::new(dir);
        if !dir.has_root() {
            debug!(
                file = %file.display(),
                entry = %dir.display(),
                "Ignoring relative directory entry"
            );
            return;
        }
        self.conf.directories.push(self.env.reroot(dir));
    }

    fn include(&mut self, pattern: &str, base: &Path) {
        let pattern = if Path::new(pattern).has_root() {
            self.env.reroot(pattern)
        } else {
            base.join(pattern)
        };
        let pattern = pattern.to_string_lossy();

        let matches = match glob::glob(&pattern) {
            Ok(paths) => paths,
            Err(e) => {
                debug!(pattern = %pattern, "Skipping bad include pattern: {}", e);
                return;
            }
        };
        let mut files: Vec<PathBuf> = matches.filter_map(Result::ok).collect();
        files.sort();

        for file in files {
            self.parse_file(&file);
        }
    }
}

fn parse_line(line: &str) -> Line<'_> {
    let line = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let line = line.trim();
    if line.is_empty() {
        return Line::Ignored;
    }

    let mut words = line.split_whitespace();
    match words.next() {
        Some("include") => {
            let patterns: Vec<&str> = words.collect();
            if patterns.is_empty() {
                Line::Ignored
            } else {
                Line::Include(patterns)
            }
        }
        Some("hwcap") => Line::Ignored,
        _ => {
            // Legacy "dir=TYPE" entries
            let dir = line.split('=').next().unwrap_or(line).trim_end();
            if dir.is_empty() {
                Line::Ignored
            } else {
                Line::Directory(dir)
            }
        }
    }
}

//! Snapshot of the process state the search depends on.
//!
//! Strategies never read `std::env` directly. Everything they consult is
//! captured once in a [`SearchEnv`], which keeps the search deterministic for
//! a given snapshot and lets callers describe a foreign system (a sysroot, a
//! different architecture, a synthetic environment).

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SearchEnv {
    vars: HashMap<String, String>,
    /// Prefix applied to system directories and ld.so.conf entries
    pub sysroot: PathBuf,
    /// Directory holding the running executable
    pub exe_dir: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
    /// Rust target architecture name (`std::env::consts::ARCH`)
    pub arch: String,
    pub is_64bit: bool,
}

impl Default for SearchEnv {
    fn default() -> Self {
        Self::empty()
    }
}

impl SearchEnv {
    /// An environment with no variables, no known directories and `/` as sysroot.
    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
            sysroot: PathBuf::from("/"),
            exe_dir: None,
            current_dir: None,
            home_dir: None,
            arch: std::env::consts::ARCH.to_string(),
            is_64bit: cfg!(target_pointer_width = "64"),
        }
    }

    /// Capture the running process.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self {
            vars,
            exe_dir,
            current_dir: std::env::current_dir().ok(),
            home_dir: dirs::home_dir(),
            ..Self::empty()
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn without_var(mut self, name: &str) -> Self {
        self.vars.remove(name);
        self
    }

    pub fn with_sysroot(mut self, sysroot: impl Into<PathBuf>) -> Self {
        self.sysroot = sysroot.into();
        self
    }

    pub fn with_exe_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exe_dir = Some(dir.into());
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn with_home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    pub fn with_arch(mut self, arch: impl Into<String>, is_64bit: bool) -> Self {
        self.arch = arch.into();
        self.is_64bit = is_64bit;
        self
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Split a path-list variable on `separator`, dropping empty entries.
    pub fn path_list(&self, name: &str, separator: char) -> Vec<PathBuf> {
        self.var(name)
            .map(|value| {
                value
                    .split(separator)
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Place an absolute system path under the sysroot.
    ///
    /// Relative paths are returned unchanged.
    pub fn reroot(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if !path.has_root() {
            return path.to_path_buf();
        }
        let relative: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.sysroot.join(relative)
    }

    /// Make a path absolute against the executable's directory, or the
    /// current directory when the executable location is unknown.
    pub fn absolutize(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.exe_dir.as_ref().or(self.current_dir.as_ref()) {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

//! Per-OS library search strategies.
//!
//! - `unix` - ELF systems: env paths, ld.so.conf and default dirs, scanned into an index
//! - `apple` - macOS: dyld variables, app bundle and fallback dirs
//! - `windows` - DLL naming over `PATH`
//! - `index` - the name/filename index used by the Unix-like strategy
//! - `ld_so_conf` - recursive, cycle-safe ld.so.conf reader
//!
//! The set of platforms is closed, so dispatch is an enum rather than a trait
//! object. [`Platform::current`] is the dispatch table's key.

mod apple;
mod index;
mod ld_so_conf;
mod unix;
mod windows;

pub use apple::{AppleStrategy, bundle_directories};
pub use index::{LibraryNameIndex, is_shared_object_name, short_name_of, versioned_files};
pub use ld_so_conf::LdSoConf;
pub use unix::{UnixStrategy, default_directories};
pub use windows::WindowsStrategy;

use std::fmt;
use std::path::PathBuf;

use crate::config::LoaderConfig;
use crate::constants::{APPLE_SUFFIXES, WINDOWS_SUFFIX};
use crate::env::SearchEnv;

/// OS family, selecting naming conventions and the search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    UnixLike,
    Apple,
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_vendor = "apple") {
            Platform::Apple
        } else {
            Platform::UnixLike
        }
    }

    /// File names a library called `name` may have, most likely first.
    ///
    /// Names that are already decorated, or contain a path separator, are
    /// returned verbatim.
    pub fn library_file_names(self, name: &str) -> Vec<String> {
        if name.is_empty() {
            return Vec::new();
        }
        if name.contains(['/', '\\']) {
            return vec![name.to_string()];
        }
        match self {
            Platform::UnixLike => {
                if is_shared_object_name(name) {
                    vec![name.to_string()]
                } else {
                    vec![format!("lib{name}.so"), format!("{name}.so"), name.to_string()]
                }
            }
            Platform::Apple => {
                if APPLE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
                    vec![name.to_string()]
                } else {
                    vec![
                        format!("lib{name}.dylib"),
                        format!("lib{name}.so"),
                        format!("lib{name}.bundle"),
                        format!("{name}.dylib"),
                        format!("{name}.so"),
                        format!("{name}.bundle"),
                        name.to_string(),
                    ]
                }
            }
            Platform::Windows => {
                if name.to_ascii_lowercase().ends_with(WINDOWS_SUFFIX) {
                    vec![name.to_string()]
                } else {
                    vec![
                        format!("{name}.dll"),
                        format!("lib{name}.dll"),
                        format!("{name}lib.dll"),
                        name.to_string(),
                    ]
                }
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::UnixLike => "unix",
            Platform::Apple => "apple",
            Platform::Windows => "windows",
        })
    }
}

/// One strategy per platform, each with its own candidate generation.
#[derive(Debug)]
pub enum SearchStrategy {
    UnixLike(UnixStrategy),
    Apple(AppleStrategy),
    Windows(WindowsStrategy),
}

impl SearchStrategy {
    pub fn for_platform(platform: Platform, config: &LoaderConfig) -> Self {
        match platform {
            Platform::UnixLike => SearchStrategy::UnixLike(UnixStrategy::new(config)),
            Platform::Apple => SearchStrategy::Apple(AppleStrategy),
            Platform::Windows => SearchStrategy::Windows(WindowsStrategy),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            SearchStrategy::UnixLike(_) => Platform::UnixLike,
            SearchStrategy::Apple(_) => Platform::Apple,
            SearchStrategy::Windows(_) => Platform::Windows,
        }
    }

    /// Platform-specific candidate paths for `short_name`, highest priority first.
    pub fn candidates(&self, short_name: &str, env: &SearchEnv) -> Vec<PathBuf> {
        match self {
            SearchStrategy::UnixLike(unix) => unix.candidates(short_name, env),
            SearchStrategy::Apple(apple) => apple.candidates(short_name, env),
            SearchStrategy::Windows(windows) => windows.candidates(short_name, env),
        }
    }
}

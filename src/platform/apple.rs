//! Search strategy for macOS, following dyld's documented search order.

use std::path::{Path, PathBuf};

use crate::constants::{
    APPLE_FALLBACK_DIRS, DYLD_FALLBACK_LIBRARY_PATH, DYLD_LIBRARY_PATH, LD_LIBRARY_PATH,
};
use crate::env::SearchEnv;
use crate::platform::Platform;

#[derive(Debug, Default, Clone, Copy)]
pub struct AppleStrategy;

impl AppleStrategy {
    pub fn candidates(&self, short_name: &str, env: &SearchEnv) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        let explicit = short_name.contains('/');
        if explicit || Path::new(short_name).is_absolute() {
            candidates.push(PathBuf::from(short_name));
        }

        let Some(base) = Path::new(short_name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
        else {
            return candidates;
        };
        let file_names = Platform::Apple.library_file_names(&base);

        for dir in search_directories(explicit, env) {
            candidates.extend(file_names.iter().map(|file| dir.join(file)));
        }
        candidates
    }
}

/// dyld directories in priority order.
fn search_directories(explicit: bool, env: &SearchEnv) -> Vec<PathBuf> {
    let mut dirs = env.path_list(DYLD_LIBRARY_PATH, ':');
    if !explicit {
        dirs.extend(env.path_list(DYLD_FALLBACK_LIBRARY_PATH, ':'));
        dirs.extend(env.path_list(LD_LIBRARY_PATH, ':'));
    }

    if let Some(exe_dir) = &env.exe_dir {
        dirs.extend(bundle_directories(exe_dir));
    }

    if !env.is_set(DYLD_FALLBACK_LIBRARY_PATH) {
        if let Some(home) = &env.home_dir {
            dirs.push(home.join("lib"));
        }
        dirs.extend(APPLE_FALLBACK_DIRS.iter().map(|d| env.reroot(d)));
    }
    dirs
}

/// Library directories of the enclosing `.app` bundle, if any.
///
/// An executable at `Foo.app/Contents/MacOS/foo` yields
/// `Foo.app/Contents/Frameworks` and `Foo.app/Contents/Resources/lib`.
pub fn bundle_directories(exe_dir: &Path) -> Vec<PathBuf> {
    let in_bundle = exe_dir.file_name().is_some_and(|n| n == "MacOS")
        && exe_dir
            .parent()
            .filter(|contents| contents.file_name().is_some_and(|n| n == "Contents"))
            .and_then(Path::parent)
            .and_then(Path::extension)
            .is_some_and(|ext| ext == "app");
    if !in_bundle {
        return Vec::new();
    }

    let Some(contents) = exe_dir.parent() else {
        return Vec::new();
    };
    vec![
        contents.join("Frameworks"),
        contents.join("Resources").join("lib"),
    ]
}

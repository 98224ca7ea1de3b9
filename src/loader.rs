//! Library loader: turns a short name into an opened [`LibraryLookup`].
//!
//! Candidates are produced in stages, cheapest and most explicit first:
//!
//! 1. `Literal` - the name itself when it is an absolute path
//! 2. `Registered` - directories added with [`LibraryLoader::add_search_directories`]
//! 3. `CoLocated` - the directory of the running executable
//! 4. `System` - bare file names, resolved by the native loader's own search
//! 5. `Platform` - the platform strategy (index, dyld paths, `PATH`)
//! 6. `WorkingDir` - the current directory
//!
//! A stage is only generated once every earlier candidate has failed, so the
//! Unix-like index is never built when an earlier stage succeeds.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::LoaderConfig;
use crate::env::SearchEnv;
use crate::error::{LoaderError, LoaderResult, OpenAttempt};
use crate::lookup::LibraryLookup;
use crate::platform::{Platform, SearchStrategy, versioned_files};

/// Where a candidate path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStage {
    Literal,
    Registered,
    CoLocated,
    System,
    Platform,
    WorkingDir,
}

impl SearchStage {
    /// Stages in precedence order.
    pub const ORDER: [SearchStage; 6] = [
        SearchStage::Literal,
        SearchStage::Registered,
        SearchStage::CoLocated,
        SearchStage::System,
        SearchStage::Platform,
        SearchStage::WorkingDir,
    ];
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchStage::Literal => "literal",
            SearchStage::Registered => "registered",
            SearchStage::CoLocated => "co-located",
            SearchStage::System => "system",
            SearchStage::Platform => "platform",
            SearchStage::WorkingDir => "working-dir",
        })
    }
}

pub struct LibraryLoader {
    env: SearchEnv,
    strategy: SearchStrategy,
    search_dirs: RwLock<Vec<PathBuf>>,
}

impl fmt::Debug for LibraryLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryLoader")
            .field("platform", &self.platform())
            .field("search_dirs", &*self.search_dirs.read())
            .finish()
    }
}

impl LibraryLoader {
    /// A loader for the platform this binary was compiled for.
    pub fn new(env: SearchEnv, config: LoaderConfig) -> Self {
        Self::for_platform(Platform::current(), env, config)
    }

    /// A loader using `platform`'s naming and search rules.
    pub fn for_platform(platform: Platform, env: SearchEnv, config: LoaderConfig) -> Self {
        let strategy = SearchStrategy::for_platform(platform, &config);
        let loader = Self {
            env,
            strategy,
            search_dirs: RwLock::new(Vec::new()),
        };
        loader.add_search_directories(&config.search_dirs);
        loader
    }

    /// A loader for the running process and the default config file.
    pub fn from_process() -> Self {
        Self::new(SearchEnv::from_process(), LoaderConfig::load_default())
    }

    pub fn env(&self) -> &SearchEnv {
        &self.env
    }

    pub fn platform(&self) -> Platform {
        self.strategy.platform()
    }

    pub fn strategy(&self) -> &SearchStrategy {
        &self.strategy
    }

    /// Register extra directories, searched before any system location.
    ///
    /// Relative paths are resolved against the executable's directory.
    pub fn add_search_directories<I, P>(&self, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut search_dirs = self.search_dirs.write();
        for dir in dirs {
            let dir = self.env.absolutize(dir);
            debug!(dir = %dir.display(), "Registered search directory");
            search_dirs.push(dir);
        }
    }

    /// Registered directories, in registration order.
    pub fn search_directories(&self) -> Vec<PathBuf> {
        self.search_dirs.read().clone()
    }

    /// Candidates produced by a single stage.
    pub fn stage_candidates(&self, stage: SearchStage, name: &str) -> Vec<PathBuf> {
        let platform = self.platform();
        let in_dir = |dir: &Path| -> Vec<PathBuf> {
            let mut paths: Vec<PathBuf> = platform
                .library_file_names(name)
                .into_iter()
                .map(|file| dir.join(file))
                .collect();
            // lib<name>.so.<version> after the exact names
            if platform == Platform::UnixLike && !name.contains(['/', '\\']) {
                paths.extend(versioned_files(dir, name));
            }
            paths
        };

        match stage {
            SearchStage::Literal => {
                let path = Path::new(name);
                if path.is_absolute() {
                    vec![path.to_path_buf()]
                } else {
                    Vec::new()
                }
            }
            SearchStage::Registered => self
                .search_dirs
                .read()
                .iter()
                .flat_map(|dir| in_dir(dir))
                .collect(),
            SearchStage::CoLocated => self.env.exe_dir.as_deref().map(in_dir).unwrap_or_default(),
            SearchStage::System => {
                // Only bare names reach the native loader's own search.
                if name.contains(['/', '\\']) {
                    Vec::new()
                } else {
                    platform
                        .library_file_names(name)
                        .into_iter()
                        .map(PathBuf::from)
                        .collect()
                }
            }
            SearchStage::Platform => self.strategy.candidates(name, &self.env),
            SearchStage::WorkingDir => self
                .env
                .current_dir
                .as_deref()
                .map(in_dir)
                .unwrap_or_default(),
        }
    }

    /// Every candidate for `name`, in the order `load` tries them.
    pub fn candidates(&self, name: &str) -> Vec<(SearchStage, PathBuf)> {
        SearchStage::ORDER
            .iter()
            .flat_map(|&stage| {
                self.stage_candidates(stage, name)
                    .into_iter()
                    .map(move |path| (stage, path))
            })
            .collect()
    }

    /// Open the first candidate for `name` that the native loader accepts.
    pub fn load(&self, name: &str) -> LoaderResult<LibraryLookup> {
        let name = name.trim();
        let mut attempts = Vec::new();
        if name.is_empty() {
            return Err(LoaderError::NotFound {
                name: name.to_string(),
                attempts,
            });
        }

        let mut tried = HashSet::new();
        for stage in SearchStage::ORDER {
            for path in self.stage_candidates(stage, name) {
                if !tried.insert(path.clone()) {
                    continue;
                }
                match LibraryLookup::open(&path) {
                    Ok(lookup) => {
                        info!(
                            library = name,
                            path = %path.display(),
                            %stage,
                            "Loaded library"
                        );
                        return Ok(lookup);
                    }
                    Err(e) => {
                        debug!(
                            library = name,
                            path = %path.display(),
                            %stage,
                            "Candidate failed: {}",
                            e
                        );
                        attempts.push(OpenAttempt {
                            path,
                            stage,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        Err(LoaderError::NotFound {
            name: name.to_string(),
            attempts,
        })
    }
}

static GLOBAL: Lazy<LibraryLoader> = Lazy::new(LibraryLoader::from_process);

/// The process-wide loader, created on first use.
pub fn global() -> &'static LibraryLoader {
    &GLOBAL
}

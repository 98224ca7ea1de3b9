//! Search strategy for ELF systems (Linux, the BSDs, Solaris).
//!
//! Mirrors the directories the system loader itself would consult, then
//! answers lookups from a one-time scan of those directories.

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::PathCatalog;
use crate::config::LoaderConfig;
use crate::constants::{
    LD_SO_CONF, UNIX_LIB64_DIRS, UNIX_LIB_DIRS, UNIX_MULTIARCH_PARENTS, multiarch_tuple,
};
use crate::env::SearchEnv;
use crate::perf::{ScopedTimer, measure_and_log};
use crate::platform::index::LibraryNameIndex;
use crate::platform::ld_so_conf::LdSoConf;

#[derive(Debug)]
pub struct UnixStrategy {
    ld_so_conf: Option<PathBuf>,
    path_vars: Vec<String>,
    slow_scan_ms: f64,
    index: OnceCell<LibraryNameIndex>,
}

impl UnixStrategy {
    pub fn new(config: &LoaderConfig) -> Self {
        Self {
            ld_so_conf: config.ld_so_conf.clone(),
            path_vars: config.path_vars.clone(),
            slow_scan_ms: config.slow_scan_ms,
            index: OnceCell::new(),
        }
    }

    /// Paths indexed under `short_name`, in directory precedence order.
    pub fn candidates(&self, short_name: &str, env: &SearchEnv) -> Vec<PathBuf> {
        self.index(env).get(short_name).to_vec()
    }

    /// The name index, built on first use.
    ///
    /// Concurrent first callers block until a single build finishes.
    pub fn index(&self, env: &SearchEnv) -> &LibraryNameIndex {
        self.index.get_or_init(|| {
            let _timer = ScopedTimer::new("build_library_index", self.slow_scan_ms);
            let catalog = self.catalog(env);
            let index = LibraryNameIndex::scan(&catalog);
            debug!(
                directories = catalog.len(),
                files = index.files_indexed(),
                keys = index.len(),
                "Built library name index"
            );
            index
        })
    }

    /// Whether the index has already been built.
    pub fn is_indexed(&self) -> bool {
        self.index.get().is_some()
    }

    /// Directories to scan, highest precedence first.
    pub fn catalog(&self, env: &SearchEnv) -> PathCatalog {
        let mut catalog = PathCatalog::new();

        for var in &self.path_vars {
            catalog.extend(env.path_list(var, ':'));
        }

        let root = self
            .ld_so_conf
            .clone()
            .unwrap_or_else(|| env.sysroot.join(LD_SO_CONF));
        let conf = measure_and_log("read_ld_so_conf", self.slow_scan_ms, || {
            LdSoConf::read(&root, env)
        });
        debug!(
            root = %root.display(),
            files = conf.files.len(),
            directories = conf.directories.len(),
            "Read linker config"
        );
        catalog.extend(&conf.directories);

        catalog.extend(default_directories(env));
        catalog
    }
}

/// Architecture-dependent system directories, most specific first.
pub fn default_directories(env: &SearchEnv) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if env.is_64bit {
        dirs.extend(UNIX_LIB64_DIRS.iter().map(|d| env.reroot(d)));
    }
    dirs.extend(UNIX_LIB_DIRS.iter().map(|d| env.reroot(d)));
    if let Some(tuple) = multiarch_tuple(&env.arch) {
        dirs.extend(
            UNIX_MULTIARCH_PARENTS
                .iter()
                .map(|parent| env.reroot(parent).join(tuple)),
        );
    }
    dirs
}

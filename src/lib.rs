//! Locate and open native shared libraries by short name.
//!
//! ```ignore
//! dylib_resolver::add_search_directories(["vendor/lib"]);
//! let pdfium = dylib_resolver::load("pdfium")?;
//! let init = unsafe { pdfium.symbol::<unsafe extern "C" fn()>("FPDF_InitLibrary")? };
//! ```
//!
//! - `loader` - staged candidate generation and the process-wide loader
//! - `platform` - Unix-like, Apple and Windows search strategies
//! - `lookup` - opened handles and calling-convention views
//! - `catalog` - ordered, de-duplicating directory set
//! - `env` - snapshot of the process state the search reads
//! - `config` - JSON loader settings

pub mod catalog;
pub mod config;
pub mod constants;
pub mod env;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod perf;
pub mod platform;

pub use catalog::PathCatalog;
pub use config::{LoaderConfig, default_config_path};
pub use env::SearchEnv;
pub use error::{LoaderError, LoaderResult, OpenAttempt};
pub use loader::{LibraryLoader, SearchStage, global};
pub use lookup::{CallingConvention, ConventionView, LibraryLookup};
pub use platform::{Platform, SearchStrategy};

use std::path::Path;

/// Register directories with the process-wide loader.
pub fn add_search_directories<I, P>(dirs: I)
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    global().add_search_directories(dirs);
}

/// Load `name` through the process-wide loader.
pub fn load(name: &str) -> LoaderResult<LibraryLookup> {
    global().load(name)
}

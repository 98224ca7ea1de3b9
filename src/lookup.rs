//! An opened library and its calling-convention views.
//!
//! The lookup owns every native handle. On Windows a second handle is opened
//! for the same file and exposed as the `stdcall` view; everywhere else only
//! the default (C) view exists.

use libloading::{Library, Symbol};
use std::collections::HashMap;
use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{LoaderError, LoaderResult};

/// ABI used when invoking a resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CallingConvention {
    /// The C convention
    #[default]
    Default,
    /// Win32 `__stdcall`
    Stdcall,
}

impl CallingConvention {
    /// Parse a convention tag (`"default"`, `"c"`, `"cdecl"` or `"stdcall"`).
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "default" | "c" | "cdecl" => Some(CallingConvention::Default),
            "stdcall" => Some(CallingConvention::Stdcall),
            _ => None,
        }
    }
}

impl fmt::Display for CallingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallingConvention::Default => "default",
            CallingConvention::Stdcall => "stdcall",
        })
    }
}

pub struct LibraryLookup {
    path: PathBuf,
    library: Library,
    /// Secondary handles for conventions other than the default
    views: HashMap<CallingConvention, Library>,
}

impl fmt::Debug for LibraryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryLookup")
            .field("path", &self.path)
            .field("conventions", &self.conventions())
            .finish()
    }
}

impl LibraryLookup {
    /// Open `path` with the native loader.
    ///
    /// A bare file name is resolved by the loader's own search.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, libloading::Error> {
        let path = path.as_ref();
        // SAFETY: opening runs the library's initializers; callers choose
        // which libraries to trust by choosing the name and search dirs.
        let library = unsafe { Library::new(path) }?;

        #[allow(unused_mut)]
        let mut views = HashMap::new();
        #[cfg(windows)]
        {
            // SAFETY: same file as above, already initialized.
            match unsafe { libloading::os::windows::Library::new(path) } {
                Ok(stdcall) => {
                    views.insert(CallingConvention::Stdcall, Library::from(stdcall));
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), "No stdcall view: {}", e);
                }
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            library,
            views,
        })
    }

    /// The path the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Conventions available on this handle, default first.
    pub fn conventions(&self) -> Vec<CallingConvention> {
        let mut conventions = vec![CallingConvention::Default];
        conventions.extend(self.views.keys().copied());
        conventions.sort();
        conventions
    }

    pub fn has_convention(&self, convention: CallingConvention) -> bool {
        convention == CallingConvention::Default || self.views.contains_key(&convention)
    }

    /// Borrow the view for `convention`.
    pub fn view(&self, convention: CallingConvention) -> LoaderResult<ConventionView<'_>> {
        let library = match convention {
            CallingConvention::Default => &self.library,
            other => self
                .views
                .get(&other)
                .ok_or_else(|| LoaderError::NoSuchConvention {
                    convention: other,
                    path: self.path.clone(),
                })?,
        };
        Ok(ConventionView {
            convention,
            path: &self.path,
            library,
        })
    }

    /// Resolve `symbol` under `convention`.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the export.
    pub unsafe fn get<T>(
        &self,
        symbol: &str,
        convention: CallingConvention,
    ) -> LoaderResult<Symbol<'_, T>> {
        let view = self.view(convention)?;
        unsafe { view.get(symbol) }
    }

    /// Resolve `symbol` under a convention given by tag (`"default"`, `"stdcall"`).
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the export.
    pub unsafe fn get_tagged<T>(&self, symbol: &str, tag: &str) -> LoaderResult<Symbol<'_, T>> {
        let convention =
            CallingConvention::parse(tag).ok_or_else(|| LoaderError::UnknownConvention {
                tag: tag.to_string(),
                path: self.path.clone(),
            })?;
        unsafe { self.get(symbol, convention) }
    }

    /// Whether `symbol` resolves under `convention`.
    pub fn has(&self, symbol: &str, convention: CallingConvention) -> bool {
        self.view(convention)
            .map(|view| view.has(symbol))
            .unwrap_or(false)
    }

    /// Like [`has`](Self::has), with the convention given by tag.
    pub fn has_tagged(&self, symbol: &str, tag: &str) -> bool {
        CallingConvention::parse(tag).is_some_and(|convention| self.has(symbol, convention))
    }

    /// Resolve `symbol` under the default convention.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the export.
    pub unsafe fn symbol<T>(&self, symbol: &str) -> LoaderResult<Symbol<'_, T>> {
        unsafe { self.get(symbol, CallingConvention::Default) }
    }
}

/// A non-owning view of a [`LibraryLookup`] under one calling convention.
#[derive(Clone, Copy)]
pub struct ConventionView<'a> {
    convention: CallingConvention,
    path: &'a Path,
    library: &'a Library,
}

impl fmt::Debug for ConventionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConventionView")
            .field("convention", &self.convention)
            .field("path", &self.path)
            .finish()
    }
}

impl<'a> ConventionView<'a> {
    pub fn convention(&self) -> CallingConvention {
        self.convention
    }

    /// # Safety
    ///
    /// `T` must match the actual type of the export.
    pub unsafe fn get<T>(&self, symbol: &str) -> LoaderResult<Symbol<'a, T>> {
        unsafe { self.library.get(symbol.as_bytes()) }.map_err(|e| LoaderError::SymbolNotFound {
            symbol: symbol.to_string(),
            path: self.path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn has(&self, symbol: &str) -> bool {
        // SAFETY: the address is only compared, never called or dereferenced.
        unsafe { self.get::<*const c_void>(symbol) }.is_ok()
    }
}

//! Resolver-wide constants.
//!
//! Centralizes environment variable names, default directories and
//! thresholds so the platform strategies share one source of truth.

// ============================================================================
// Environment Variables
// ============================================================================

/// Path variables seeding the Unix-like catalog, highest priority first.
pub const UNIX_PATH_VARS: &[&str] = &[
    "LD_LIBRARY_PATH",
    // HP-UX
    "SHLIB_PATH",
    // AIX, OS/2
    "LIBPATH",
    // Haiku, BeOS
    "LIBRARY_PATH",
];

/// Runtime search path consulted by dyld.
pub const DYLD_LIBRARY_PATH: &str = "DYLD_LIBRARY_PATH";

/// Fallback search path consulted by dyld.
pub const DYLD_FALLBACK_LIBRARY_PATH: &str = "DYLD_FALLBACK_LIBRARY_PATH";

/// Also honoured on macOS for libraries built with an rpath layout.
pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Directories the Windows loader searches after the application directory.
pub const WINDOWS_PATH_VAR: &str = "PATH";

/// Overrides the location of the JSON config file.
pub const CONFIG_PATH_VAR: &str = "DYLIB_RESOLVER_CONFIG";

// ============================================================================
// Default Directories
// ============================================================================

/// Root linker configuration, relative to the sysroot.
pub const LD_SO_CONF: &str = "etc/ld.so.conf";

/// Searched before the generic directories on 64-bit targets.
pub const UNIX_LIB64_DIRS: &[&str] = &["/lib64", "/usr/lib64"];

/// Generic library directories.
pub const UNIX_LIB_DIRS: &[&str] = &["/lib", "/usr/lib"];

/// Parent directories for multiarch tuples (`/lib/x86_64-linux-gnu`).
pub const UNIX_MULTIARCH_PARENTS: &[&str] = &["/lib", "/usr/lib"];

/// dyld's fallback directories after `~/lib`.
pub const APPLE_FALLBACK_DIRS: &[&str] = &["/usr/local/lib", "/usr/lib"];

// ============================================================================
// Platform Naming
// ============================================================================

/// Suffixes that mark a name as already decorated on macOS.
pub const APPLE_SUFFIXES: &[&str] = &[".dylib", ".so", ".bundle"];

/// Suffix that marks a name as already decorated on Windows.
pub const WINDOWS_SUFFIX: &str = ".dll";

// ============================================================================
// Timing
// ============================================================================

/// Index builds slower than this are logged as warnings.
pub const SLOW_SCAN_MS: f64 = 250.0;

/// Map a Rust target architecture to its Debian multiarch tuple.
pub fn multiarch_tuple(arch: &str) -> Option<&'static str> {
    match arch {
        "x86_64" => Some("x86_64-linux-gnu"),
        "x86" => Some("i386-linux-gnu"),
        "aarch64" => Some("aarch64-linux-gnu"),
        "arm" => Some("arm-linux-gnueabihf"),
        "riscv64" => Some("riscv64-linux-gnu"),
        "powerpc64" => Some("powerpc64le-linux-gnu"),
        "s390x" => Some("s390x-linux-gnu"),
        _ => None,
    }
}

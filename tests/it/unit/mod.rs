//! Unit tests for dylib-resolver.

mod config_tests;
mod ld_so_conf_tests;
mod loader_tests;
mod perf_tests;

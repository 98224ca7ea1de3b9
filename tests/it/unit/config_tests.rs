//! Unit tests for config module.

use crate::helpers::LibTree;
use dylib_resolver::{LibraryLoader, LoaderConfig, LoaderError, Platform, SearchEnv, default_config_path};
use std::path::PathBuf;

#[test]
fn test_empty_json_is_default() {
    let config = LoaderConfig::from_json("{}").unwrap();
    assert_eq!(config, LoaderConfig::default());
    assert_eq!(
        config.path_vars,
        vec!["LD_LIBRARY_PATH", "SHLIB_PATH", "LIBPATH", "LIBRARY_PATH"]
    );
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = LoaderConfig::from_json(
        r#"{ "search_dirs": ["/opt/vendor/lib"], "slow_scan_ms": 5.0 }"#,
    )
    .unwrap();
    assert_eq!(config.search_dirs, vec![PathBuf::from("/opt/vendor/lib")]);
    assert_eq!(config.slow_scan_ms, 5.0);
    assert!(config.ld_so_conf.is_none());
    assert_eq!(config.path_vars, LoaderConfig::default().path_vars);
}

#[test]
fn test_invalid_json_is_config_error() {
    let err = LoaderConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, LoaderError::Config(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let tree = LibTree::new();
    let err = LoaderConfig::from_file(tree.path("missing.json")).unwrap_err();
    assert!(matches!(err, LoaderError::Io(_)));
}

#[test]
fn test_from_file_round_trip() {
    let config = LoaderConfig {
        ld_so_conf: Some(PathBuf::from("/etc/custom.conf")),
        search_dirs: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        path_vars: vec!["LD_LIBRARY_PATH".to_string()],
        slow_scan_ms: 10.0,
    };
    let tree = LibTree::new().with_file("config.json", serde_json::to_string(&config).unwrap());

    let loaded = LoaderConfig::from_file(tree.path("config.json")).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_search_dirs_are_registered() {
    let config = LoaderConfig {
        search_dirs: vec![PathBuf::from("/opt/first"), PathBuf::from("bundled")],
        ..LoaderConfig::default()
    };
    let env = SearchEnv::empty().with_exe_dir("/opt/app");
    let loader = LibraryLoader::for_platform(Platform::UnixLike, env, config);

    assert_eq!(
        loader.search_directories(),
        vec![PathBuf::from("/opt/first"), PathBuf::from("/opt/app/bundled")]
    );
}

#[test]
fn test_default_config_path() {
    // Present on any system with a config dir or with the override set
    let path = default_config_path();
    assert!(path.is_some() || cfg!(target_os = "unknown"));
}

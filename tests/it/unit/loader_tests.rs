//! Unit tests for candidate generation in the loader.

use crate::helpers::{LibTree, isolated_env, unix_loader};
use dylib_resolver::{LibraryLoader, LoaderConfig, LoaderError, Platform, SearchEnv, SearchStage, SearchStrategy};
use std::path::PathBuf;

#[test]
fn test_stage_order() {
    assert_eq!(
        SearchStage::ORDER,
        [
            SearchStage::Literal,
            SearchStage::Registered,
            SearchStage::CoLocated,
            SearchStage::System,
            SearchStage::Platform,
            SearchStage::WorkingDir,
        ]
    );
}

#[test]
fn test_relative_directories_resolve_against_exe_dir() {
    let loader = unix_loader(SearchEnv::empty().with_exe_dir("/opt/app/bin"));
    loader.add_search_directories(["vendor/lib", "/abs/lib"]);
    loader.add_search_directories(["later"]);

    assert_eq!(
        loader.search_directories(),
        vec![
            PathBuf::from("/opt/app/bin/vendor/lib"),
            PathBuf::from("/abs/lib"),
            PathBuf::from("/opt/app/bin/later"),
        ]
    );
}

#[test]
fn test_candidates_follow_stage_precedence() {
    let tree = LibTree::new().with_file("etc/ld.so.conf", "");
    let env = isolated_env(tree.root())
        .with_exe_dir("/exe")
        .with_current_dir("/cwd");
    let loader = unix_loader(env);
    loader.add_search_directories(["/reg1", "/reg2"]);

    let candidates = loader.candidates("foo");
    let stages: Vec<SearchStage> = candidates.iter().map(|(stage, _)| *stage).collect();
    let paths: Vec<PathBuf> = candidates.into_iter().map(|(_, path)| path).collect();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("/reg1/libfoo.so"),
            PathBuf::from("/reg1/foo.so"),
            PathBuf::from("/reg1/foo"),
            PathBuf::from("/reg2/libfoo.so"),
            PathBuf::from("/reg2/foo.so"),
            PathBuf::from("/reg2/foo"),
            PathBuf::from("/exe/libfoo.so"),
            PathBuf::from("/exe/foo.so"),
            PathBuf::from("/exe/foo"),
            PathBuf::from("libfoo.so"),
            PathBuf::from("foo.so"),
            PathBuf::from("foo"),
            PathBuf::from("/cwd/libfoo.so"),
            PathBuf::from("/cwd/foo.so"),
            PathBuf::from("/cwd/foo"),
        ]
    );
    assert_eq!(stages[0], SearchStage::Registered);
    assert_eq!(stages[6], SearchStage::CoLocated);
    assert_eq!(stages[9], SearchStage::System);
    assert_eq!(stages[12], SearchStage::WorkingDir);
}

#[test]
fn test_versioned_files_follow_exact_names() {
    let tree = LibTree::new()
        .with_file("vendor/libfoo.so.2", "")
        .with_file("vendor/libfoo.so.1", "")
        .with_file("vendor/libfoo.so", "")
        .with_file("vendor/libfoobar.so.1", "")
        .with_file("vendor/notes.solution", "");
    let loader = unix_loader(SearchEnv::empty());
    loader.add_search_directories([tree.path("vendor")]);

    assert_eq!(
        loader.stage_candidates(SearchStage::Registered, "foo"),
        vec![
            tree.path("vendor/libfoo.so"),
            tree.path("vendor/foo.so"),
            tree.path("vendor/foo"),
            tree.path("vendor/libfoo.so.1"),
            tree.path("vendor/libfoo.so.2"),
        ]
    );
}

#[test]
fn test_absolute_name_is_tried_first() {
    let loader = unix_loader(SearchEnv::empty());
    loader.add_search_directories(["/reg"]);

    let candidates = loader.candidates("/opt/lib/libfoo.so");
    assert_eq!(
        candidates[0],
        (SearchStage::Literal, PathBuf::from("/opt/lib/libfoo.so"))
    );
    // Paths never go through the native loader's own search
    assert!(!candidates.iter().any(|(stage, _)| *stage == SearchStage::System));
}

#[test]
fn test_windows_loader_uses_dll_names() {
    let loader = LibraryLoader::for_platform(
        Platform::Windows,
        SearchEnv::empty().with_var("PATH", "/sys32"),
        LoaderConfig::default(),
    );
    loader.add_search_directories(["/reg"]);

    let candidates = loader.candidates("foo");
    assert_eq!(candidates[0], (SearchStage::Registered, PathBuf::from("/reg/foo.dll")));
    assert!(candidates.contains(&(SearchStage::Platform, PathBuf::from("/sys32/foolib.dll"))));
}

#[test]
fn test_empty_name_is_not_found() {
    let loader = unix_loader(SearchEnv::empty());
    let err = loader.load("   ").unwrap_err();
    assert!(matches!(err, LoaderError::NotFound { ref attempts, .. } if attempts.is_empty()));
}

#[test]
fn test_unix_strategy_is_selected() {
    let loader = unix_loader(SearchEnv::empty());
    assert_eq!(loader.platform(), Platform::UnixLike);
    assert!(matches!(loader.strategy(), SearchStrategy::UnixLike(_)));
}

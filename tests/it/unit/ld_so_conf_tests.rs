//! Unit tests for the ld.so.conf reader.

use crate::helpers::{LibTree, isolated_env};
use dylib_resolver::platform::LdSoConf;

#[test]
fn test_directories_in_file_order() {
    let tree = LibTree::new().with_file(
        "etc/ld.so.conf",
        "# system\n/usr/local/lib\n\n/opt/vendor/lib=libc6 # legacy type\nhwcap 0 nosegneg\n",
    );
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);

    assert_eq!(
        conf.directories,
        vec![tree.path("usr/local/lib"), tree.path("opt/vendor/lib")]
    );
    assert_eq!(conf.files, vec![tree.path("etc/ld.so.conf")]);
}

#[test]
fn test_include_is_relative_to_including_file() {
    let tree = LibTree::new()
        .with_file("etc/ld.so.conf", "/first\ninclude ld.so.conf.d/*.conf\n/last\n")
        .with_file("etc/ld.so.conf.d/b.conf", "/from/b\n")
        .with_file("etc/ld.so.conf.d/a.conf", "/from/a\n")
        .with_file("etc/ld.so.conf.d/ignored.txt", "/never\n");
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);

    assert_eq!(
        conf.directories,
        vec![
            tree.path("first"),
            tree.path("from/a"),
            tree.path("from/b"),
            tree.path("last"),
        ]
    );
    assert_eq!(conf.files.len(), 3);
}

#[test]
fn test_absolute_include_is_under_sysroot() {
    let tree = LibTree::new()
        .with_file("etc/ld.so.conf", "include /etc/extra/*.conf\n")
        .with_file("etc/extra/x.conf", "/x/lib\n");
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);
    assert_eq!(conf.directories, vec![tree.path("x/lib")]);
}

#[test]
fn test_self_include_terminates() {
    let tree = LibTree::new()
        .with_file("etc/ld.so.conf", "include conf.d/*.conf\n")
        .with_file(
            "etc/conf.d/a.conf",
            "include a.conf\ninclude ../ld.so.conf\ninclude conf.d/a.conf\n/opt/lib\n",
        );
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);

    assert_eq!(conf.directories, vec![tree.path("opt/lib")]);
    assert_eq!(conf.files.len(), 2);
}

#[test]
fn test_mutual_include_terminates() {
    let tree = LibTree::new()
        .with_file("etc/ld.so.conf", "include one.conf\n")
        .with_file("etc/one.conf", "/one\ninclude two.conf\n")
        .with_file("etc/two.conf", "/two\ninclude one.conf\n");
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);
    assert_eq!(conf.directories, vec![tree.path("one"), tree.path("two")]);
}

#[test]
fn test_malformed_files_are_skipped() {
    let tree = LibTree::new()
        .with_file(
            "etc/ld.so.conf",
            "include broken.conf\ninclude [unclosed\n%%% not a path\n/good\n",
        )
        .with_file("etc/broken.conf", [0xff, 0xfe, 0x00, 0x9f]);
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);
    assert_eq!(conf.directories, vec![tree.path("good")]);
}

#[test]
fn test_missing_root_is_empty() {
    let tree = LibTree::new();
    let env = isolated_env(tree.root());

    let conf = LdSoConf::read(&tree.path("etc/ld.so.conf"), &env);
    assert_eq!(conf, LdSoConf::default());
}

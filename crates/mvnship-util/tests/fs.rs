use mvnship_util::fs::{
    collect_matching, ensure_dir, find_ancestor_with, join_slash, PatternSet,
};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Mvnship.toml"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Mvnship.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Mvnship.toml"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Mvnship.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_ensure_dir_creates_nested() {
    let tmp = TempDir::new().unwrap();
    let deep = tmp.path().join("x").join("y").join("z");
    assert!(!deep.exists());
    ensure_dir(&deep).unwrap();
    assert!(deep.is_dir());
}

#[test]
fn test_ensure_dir_idempotent() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("already");
    std::fs::create_dir(&dir).unwrap();
    ensure_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn test_pattern_set_negation() {
    let set = PatternSet::new(&["**", "!node_modules/**"]).unwrap();
    assert!(set.is_match("index.js"));
    assert!(set.is_match("lib/util.js"));
    assert!(!set.is_match("node_modules/left-pad/index.js"));
}

#[test]
fn test_pattern_set_single_star_stays_in_directory() {
    let set = PatternSet::new(&["*.txt"]).unwrap();
    assert!(set.is_match("notes.txt"));
    assert!(!set.is_match("docs/notes.txt"));
}

#[test]
fn test_pattern_set_rejects_invalid_glob() {
    assert!(PatternSet::new(&["a[b"]).is_err());
}

#[test]
fn test_collect_matching_sorted_and_filtered() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    std::fs::create_dir_all(root.join("script")).unwrap();
    std::fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    std::fs::write(root.join("somefile.txt"), "somedata").unwrap();
    std::fs::write(root.join("script/run.sh"), "#!/bin/sh").unwrap();
    std::fs::write(root.join("node_modules/dep/index.js"), "").unwrap();

    let set = PatternSet::new(&["**", "!node_modules/**"]).unwrap();
    let files = collect_matching(root, &set).unwrap();
    assert_eq!(files, vec!["script/run.sh", "somefile.txt"]);
}

#[test]
fn test_collect_matching_missing_root_is_empty() {
    let tmp = TempDir::new().unwrap();
    let set = PatternSet::new(&["**"]).unwrap();
    let files = collect_matching(&tmp.path().join("absent"), &set).unwrap();
    assert!(files.is_empty());
}

#[test]
fn test_join_slash_skips_empty_segments() {
    assert_eq!(join_slash(&["app-1.0.0", ""]), "app-1.0.0");
    assert_eq!(join_slash(&["app-1.0.0/", "./", "lib/a.js"]), "app-1.0.0/lib/a.js");
}

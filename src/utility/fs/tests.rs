// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_file, copy_tree};
use super::relocate::move_dir;
use super::remove::{remove_dir_if_exists, remove_file_if_exists};
use std::fs;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

#[tokio::test]
async fn test_copy_tree_recursive() {
    let temp = temp_dir();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("nested/deep")).unwrap();
    fs::write(src.join("a.png"), "a").unwrap();
    fs::write(src.join("nested/b.png"), "b").unwrap();
    fs::write(src.join("nested/deep/c.png"), "c").unwrap();

    let dst = temp.path().join("dst");
    let copied = copy_tree(&src, &dst).await.unwrap();

    assert_eq!(copied, 3);
    assert_eq!(fs::read_to_string(dst.join("nested/deep/c.png")).unwrap(), "c");
}

#[tokio::test]
async fn test_copy_tree_merges_and_overwrites() {
    let temp = temp_dir();
    let src = temp.path().join("src");
    let dst = temp.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("shared.txt"), "new").unwrap();
    fs::write(dst.join("shared.txt"), "old").unwrap();
    fs::write(dst.join("keep.txt"), "keep").unwrap();

    copy_tree(&src, &dst).await.unwrap();
    copy_tree(&src, &dst).await.unwrap();

    assert_eq!(fs::read_to_string(dst.join("shared.txt")).unwrap(), "new");
    assert_eq!(fs::read_to_string(dst.join("keep.txt")).unwrap(), "keep");
}

#[tokio::test]
async fn test_copy_tree_missing_source() {
    let temp = temp_dir();
    let err = copy_tree(&temp.path().join("missing"), &temp.path().join("dst"))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("failed to read directory"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_copy_tree_error_names_failing_entry() {
    let temp = temp_dir();
    let src = temp.path().join("src");
    fs::create_dir_all(src.join("ui")).unwrap();
    fs::write(src.join("ui/ok.png"), "ok").unwrap();
    std::os::unix::fs::symlink(temp.path().join("gone.png"), src.join("ui/broken.png")).unwrap();

    let err = copy_tree(&src, &temp.path().join("dst")).await.unwrap_err();

    let msg = format!("{err:#}");
    assert!(msg.contains("failed to copy"), "got: {msg}");
    assert!(msg.contains("broken.png"), "got: {msg}");
}

#[tokio::test]
async fn test_copy_file_creates_parent() {
    let temp = temp_dir();
    let src = temp.path().join("lib.so");
    fs::write(&src, "elf").unwrap();

    let dst = temp.path().join("out/deep/lib.so");
    copy_file(&src, &dst).await.unwrap();
    assert!(dst.is_file());
}

#[tokio::test]
async fn test_remove_if_exists() {
    let temp = temp_dir();
    let dir = temp.path().join("dir");
    fs::create_dir_all(dir.join("child")).unwrap();
    let file = temp.path().join("file.pdb");
    fs::write(&file, "").unwrap();

    assert!(remove_dir_if_exists(&dir).await.unwrap());
    assert!(!remove_dir_if_exists(&dir).await.unwrap());
    assert!(remove_file_if_exists(&file).await.unwrap());
    assert!(!remove_file_if_exists(&file).await.unwrap());
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_move_dir_renames() {
    let temp = temp_dir();
    let from = temp.path().join("publish");
    fs::create_dir_all(from.join("Shaders")).unwrap();
    fs::write(from.join("Shaders/shader.vert.spv"), "spv").unwrap();

    let to = temp.path().join("Sierra Engine Game (linux-x64)");
    move_dir(&from, &to).await.unwrap();

    assert!(!from.exists());
    assert!(to.join("Shaders/shader.vert.spv").is_file());
}

#[tokio::test]
async fn test_move_dir_refuses_existing_destination() {
    let temp = temp_dir();
    let from = temp.path().join("a");
    let to = temp.path().join("b");
    fs::create_dir_all(&from).unwrap();
    fs::create_dir_all(&to).unwrap();

    assert!(move_dir(&from, &to).await.is_err());
    assert!(from.exists());
}

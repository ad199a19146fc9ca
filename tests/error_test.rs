//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use qr_kit_rust::codec::{self, EncodeOptions};
use qr_kit_rust::error::QrKitError;
use qr_kit_rust::scan;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 存在しないフォルダの列挙はFolderNotFound
#[test]
fn test_collect_images_nonexistent_folder() {
    let result = scan::collect_images(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, QrKitError::FolderNotFound(_)));
}

/// 空のフォルダはエラーではなく空のリストを返す
#[test]
fn test_collect_images_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scan::collect_images(dir.path());

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像以外のファイルしかないフォルダも空のリスト
#[test]
fn test_collect_images_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("test.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scan::collect_images(dir.path());
    assert!(result.unwrap().is_empty());
}

/// 容量超過のエンコードはEncodeエラー
#[test]
fn test_encode_capacity_error() {
    let oversized = "x".repeat(10_000);
    let result = codec::encode(&oversized, &EncodeOptions::default());

    assert!(matches!(result, Err(QrKitError::Encode(_))));
}

/// 壊れた画像ファイルのデコードは読み取り失敗として扱われスキップされる
#[tokio::test]
async fn test_scan_corrupt_file_is_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");

    let bad = dir.path().join("broken.png");
    std::fs::write(&bad, b"not a png").unwrap();

    let results = scan::scan_files(&[bad], false).await.unwrap();
    assert!(results.is_empty());
}

/// 上限超過エラーのメッセージには件数と上限が含まれる
#[test]
fn test_too_many_files_message() {
    let err = QrKitError::TooManyFiles { count: 11, max: 10 };
    let message = err.to_string();

    assert!(message.contains("11"));
    assert!(message.contains("10"));
}

/// ファイル指定とフォルダ指定の混在では存在チェックが働く
#[test]
fn test_expand_sources_checks_existence() {
    let dir = tempdir().expect("Failed to create temp dir");
    let real = dir.path().join("real.png");
    image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 255, 255, 255]))
        .save(&real)
        .unwrap();

    let paths = vec![real, PathBuf::from("/nonexistent/ghost.png")];
    let result = scan::expand_sources(&paths);

    assert!(matches!(result, Err(QrKitError::FileNotFound(_))));
}

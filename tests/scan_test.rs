//! ファイル読み取りの統合テスト

use qr_kit_rust::codec::{self, EncodeOptions};
use qr_kit_rust::error::QrKitError;
use qr_kit_rust::scan;
use std::path::PathBuf;
use tempfile::tempdir;

fn write_qr_png(dir: &std::path::Path, name: &str, text: &str) -> PathBuf {
    let img = codec::encode(text, &EncodeOptions::default()).expect("QR生成失敗");
    let path = dir.join(name);
    img.save(&path).expect("PNG保存失敗");
    path
}

fn write_blank_png(dir: &std::path::Path, name: &str) -> PathBuf {
    let img = image::RgbaImage::from_pixel(100, 100, image::Rgba([255, 255, 255, 255]));
    let path = dir.join(name);
    img.save(&path).expect("PNG保存失敗");
    path
}

/// QR入り画像は読み取られ、ラベルはファイル名になる
#[tokio::test]
async fn test_scan_files_success() {
    let dir = tempdir().expect("Failed to create temp dir");

    let paths = vec![
        write_qr_png(dir.path(), "a.png", "https://a.com"),
        write_qr_png(dir.path(), "b.png", "hello"),
    ];

    let results = scan::scan_files(&paths, false).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].source_label, "a.png");
    assert_eq!(results[0].decoded_text, "https://a.com");
    assert_eq!(results[1].source_label, "b.png");
    assert_eq!(results[1].decoded_text, "hello");
}

/// シンボルのないファイルはスキップされ、バッチは継続する
#[tokio::test]
async fn test_scan_files_partial_failure() {
    let dir = tempdir().expect("Failed to create temp dir");

    let paths = vec![
        write_blank_png(dir.path(), "blank.png"),
        write_qr_png(dir.path(), "qr.png", "https://x.com"),
    ];

    let results = scan::scan_files(&paths, false).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_label, "qr.png");
}

/// 全ファイル失敗でもエラーにはならず空リスト（集約通知は呼び出し側）
#[tokio::test]
async fn test_scan_files_all_failed() {
    let dir = tempdir().expect("Failed to create temp dir");

    let paths = vec![
        write_blank_png(dir.path(), "blank1.png"),
        write_blank_png(dir.path(), "blank2.png"),
    ];

    let results = scan::scan_files(&paths, false).await.unwrap();
    assert!(results.is_empty());
}

/// 11件は実在するファイルでも拒否される
#[tokio::test]
async fn test_scan_files_rejects_over_limit() {
    let dir = tempdir().expect("Failed to create temp dir");

    let paths: Vec<PathBuf> = (0..11)
        .map(|i| write_blank_png(dir.path(), &format!("f{}.png", i)))
        .collect();

    let result = scan::scan_files(&paths, false).await;
    assert!(matches!(
        result,
        Err(QrKitError::TooManyFiles { count: 11, max: 10 })
    ));
}

/// 並行デコードでも結果は入力順
#[tokio::test]
async fn test_scan_files_preserves_input_order() {
    let dir = tempdir().expect("Failed to create temp dir");

    let texts = ["one", "two", "three", "four", "five"];
    let paths: Vec<PathBuf> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| write_qr_png(dir.path(), &format!("img{}.png", i), text))
        .collect();

    let results = scan::scan_files(&paths, false).await.unwrap();

    assert_eq!(results.len(), texts.len());
    for (result, expected) in results.iter().zip(texts.iter()) {
        assert_eq!(result.decoded_text, *expected);
    }
}

/// フォルダ指定は直下の画像にファイル名順で展開される
#[tokio::test]
async fn test_expand_folder_source() {
    let dir = tempdir().expect("Failed to create temp dir");

    write_qr_png(dir.path(), "b.png", "second");
    write_qr_png(dir.path(), "a.png", "first");
    std::fs::write(dir.path().join("note.txt"), "not an image").unwrap();

    let sources = scan::expand_sources(&[dir.path().to_path_buf()]).unwrap();
    assert_eq!(sources.len(), 2);

    let results = scan::scan_files(&sources, false).await.unwrap();
    assert_eq!(results[0].decoded_text, "first");
    assert_eq!(results[1].decoded_text, "second");
}

/// 存在しないファイル指定はFileNotFound
#[test]
fn test_expand_missing_file() {
    let paths = vec![PathBuf::from("/nonexistent/x.png"), PathBuf::from("/nonexistent/y.png")];
    let result = scan::expand_sources(&paths);
    assert!(matches!(result, Err(QrKitError::FileNotFound(_))));
}

//! 読み取りオーケストレータ（ファイルモード）
//!
//! 画像ファイル群を並行デコードし、失敗ファイルはスキップして成功分を
//! 入力順に集約する。ファイル数の上限超過はデコードを一切行わずに
//! バッチ全体を拒否する。ライブキャプチャは `camera` サブモジュール。

pub mod camera;

use crate::codec;
use crate::error::{QrKitError, Result};
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use walkdir::WalkDir;

/// 1回の読み取りで受け付けるファイル数の上限
pub const MAX_SCAN_FILES: usize = 10;

/// 1件分の読み取り結果
#[derive(Debug, Clone)]
pub struct DecodeResult {
    /// 入力元のラベル（ファイル名、またはカメラ読み取りの定数）
    pub source_label: String,
    /// デコードされたテキスト
    pub decoded_text: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext_str = ext.to_string_lossy();
            IMAGE_EXTENSIONS.iter().any(|&e| e == ext_str)
        })
        .unwrap_or(false)
}

/// フォルダ直下の画像ファイルをファイル名順に列挙する
pub fn collect_images(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(QrKitError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_path(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    // ファイル名でソート
    images.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    Ok(images)
}

/// CLI引数のパス群を読み取り対象ファイルリストに展開する
///
/// 単一のフォルダ指定はその直下の画像に展開し、それ以外はファイル指定と
/// して扱う。上限チェックは展開後に `scan_files` が行う。
pub fn expand_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if paths.len() == 1 && paths[0].is_dir() {
        return collect_images(&paths[0]);
    }

    for path in paths {
        if !path.exists() {
            return Err(QrKitError::FileNotFound(path.display().to_string()));
        }
    }

    Ok(paths.to_vec())
}

/// ファイル群を並行デコードし、成功分を入力順で返す
///
/// 上限超過は1件もデコードせずに `TooManyFiles` を返す。空リストは
/// 即座に空結果を返す。個々のデコード失敗はスキップされ、全滅時の
/// 集約通知は呼び出し側が行う。
pub async fn scan_files(paths: &[PathBuf], verbose: bool) -> Result<Vec<DecodeResult>> {
    if paths.len() > MAX_SCAN_FILES {
        return Err(QrKitError::TooManyFiles {
            count: paths.len(),
            max: MAX_SCAN_FILES,
        });
    }

    if paths.is_empty() {
        return Ok(Vec::new());
    }

    let mut tasks = JoinSet::new();

    for (index, path) in paths.iter().enumerate() {
        let path = path.clone();
        tasks.spawn_blocking(move || (index, decode_file(&path)));
    }

    let mut decoded: Vec<(usize, DecodeResult)> = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Ok(result))) => decoded.push((index, result)),
            Ok((index, Err(e))) => {
                // 失敗ファイルはスキップ（バッチは継続）
                if verbose {
                    eprintln!("  ⚠ 読み取りスキップ: {} ({})", paths[index].display(), e);
                }
            }
            Err(e) => {
                eprintln!("  ⚠ デコードタスクエラー: {}", e);
            }
        }
    }

    // 並行完了順から入力順に並べ直す
    decoded.sort_by_key(|(index, _)| *index);

    Ok(decoded.into_iter().map(|(_, result)| result).collect())
}

fn decode_file(path: &Path) -> Result<DecodeResult> {
    let img = image::open(path)?;
    let text = codec::decode_image(&img)?;

    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(DecodeResult {
        source_label: label,
        decoded_text: text,
    })
}

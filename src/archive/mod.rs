//! アーカイブ出力モジュール
//!
//! 一括生成の成功分をZIPアーカイブ1つにまとめる。組み立てはメモリ上で
//! 完結し、完成したバイト列を返すかエラーを返すかのどちらかで、
//! 部分的なアーカイブは呼び出し側に渡らない。

use crate::batch::EncodeResult;
use crate::error::{QrKitError, Result};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const MAX_NAME_LEN: usize = 50;

/// 元テキストからアーカイブ内ファイル名（拡張子なし）を導出する
///
/// 英数字以外を `_` に置換して50文字に切り詰める。置換後が空なら
/// `qrcode_<1始まり連番>` にフォールバックする。異なる入力が同じ名前に
/// 正規化されても重複解消は行わない（後の結果が前の結果を黙って
/// 上書きする）。
pub fn sanitize_file_name(text: &str, index: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_NAME_LEN)
        .collect();

    if sanitized.is_empty() {
        format!("qrcode_{}", index + 1)
    } else {
        sanitized
    }
}

/// 生成結果リストをZIPアーカイブのバイト列にまとめる
///
/// 同じ名前に正規化された入力は後の結果が前の結果を上書きする
/// （重複解消はしない）。
pub fn export_archive(results: &[EncodeResult]) -> Result<Vec<u8>> {
    if results.is_empty() {
        return Err(QrKitError::Export("出力対象がありません".to_string()));
    }

    // ZIPは同名エントリを受け付けないため、書き込み前に名前ごとに
    // 後勝ちで解決しておく
    let mut entries: Vec<(String, &[u8])> = Vec::new();
    for (index, result) in results.iter().enumerate() {
        let name = format!("{}.png", sanitize_file_name(&result.source_text, index));

        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = result.png.as_slice(),
            None => entries.push((name, result.png.as_slice())),
        }
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, png) in &entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| QrKitError::Export(e.to_string()))?;
        writer
            .write_all(png)
            .map_err(|e| QrKitError::Export(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| QrKitError::Export(e.to_string()))?;

    Ok(cursor.into_inner())
}

/// アーカイブを組み立ててファイルに書き出す
pub fn write_archive(results: &[EncodeResult], output: &Path) -> Result<()> {
    let blob = export_archive(results)?;
    std::fs::write(output, blob)?;
    Ok(())
}

/// デフォルトの出力ファイル名（タイムスタンプ付き）
pub fn default_archive_name() -> String {
    format!("qrcodes_{}.zip", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

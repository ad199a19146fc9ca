//! 一括生成オーケストレータ
//!
//! 入力行リストを1件ずつコーデックに渡し、失敗した行はスキップして
//! 成功分だけを集約する。1件の失敗でバッチ全体が失敗することはない。

use crate::codec::{self, EncodeOptions};
use crate::error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use sha2::{Digest, Sha256};

/// 1件分の生成結果
#[derive(Debug, Clone)]
pub struct EncodeResult {
    /// 元テキスト
    pub source_text: String,
    /// PNGバイト列
    pub png: Vec<u8>,
    /// 識別トークン（テキスト+連番のダイジェスト）
    pub id: String,
}

/// 入力テキストを行に分割し、トリムして空行を除外する
pub fn read_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// 行リストを順次エンコードし、成功分を入力順で返す
///
/// 失敗した行は診断ログに出力してスキップする。入力が空の場合は
/// コーデックを呼ばずに空リストを返す。
pub fn encode_batch(lines: &[String], options: &EncodeOptions, verbose: bool) -> Vec<EncodeResult> {
    if lines.is_empty() {
        return Vec::new();
    }

    let progress = if verbose {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(lines.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("  [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    };

    let mut results = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        match encode_one(line, index, options) {
            Ok(result) => {
                if verbose {
                    println!("  [{}/{}] ✔ {}", index + 1, lines.len(), line);
                }
                results.push(result);
            }
            Err(e) => {
                // 失敗行はスキップ（バッチは継続）
                eprintln!("  ⚠ エンコード失敗: {} ({})", line, e);
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    results
}

fn encode_one(line: &str, index: usize, options: &EncodeOptions) -> Result<EncodeResult> {
    let png = codec::encode_png(line, options)?;

    Ok(EncodeResult {
        source_text: line.to_string(),
        png,
        id: result_id(line, index),
    })
}

/// テキストと連番から短い識別トークンを生成
fn result_id(text: &str, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update(index.to_le_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..6])
}

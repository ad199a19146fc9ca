//! 読み取り結果の分類
//!
//! デコードされたテキストを「安全に開けるリンク」か「ただのテキスト」に
//! 分類する。リンクと判定するのは許可リストのスキームだけで、
//! パースに失敗した入力は常にテキスト扱いになる（分類は失敗しない）。

use regex::Regex;

/// 許可するURIスキーム
const ALLOWED_SCHEMES: &[&str] = &["https", "http", "mailto", "tel"];

/// 分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// 許可スキームのリンク
    Link(String),
    /// リンクとして扱わないテキスト
    PlainText,
}

/// テキストをリンクかテキストに分類する
pub fn classify(text: &str) -> Classification {
    lazy_static::lazy_static! {
        // scheme ":" rest （RFC 3986のスキーム文法）
        static ref URI_RE: Regex =
            Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.+)$").unwrap();
    }

    let Some(caps) = URI_RE.captures(text.trim()) else {
        return Classification::PlainText;
    };

    let scheme = caps[1].to_ascii_lowercase();
    let rest = &caps[2];

    if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
        return Classification::PlainText;
    }

    // http/httpsはホスト部が必要
    if (scheme == "http" || scheme == "https") && !has_authority(rest) {
        return Classification::PlainText;
    }

    Classification::Link(text.trim().to_string())
}

fn has_authority(rest: &str) -> bool {
    rest.strip_prefix("//")
        .map(|authority| !authority.is_empty() && !authority.starts_with('/'))
        .unwrap_or(false)
}

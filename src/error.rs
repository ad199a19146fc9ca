use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrKitError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("入力が空です: {0}")]
    EmptyInput(String),

    #[error("QRコード生成エラー: {0}")]
    Encode(String),

    #[error("QRコードが見つかりません: {0}")]
    SymbolNotFound(String),

    #[error("カメラにアクセスできません: {0}")]
    Permission(String),

    #[error("キャプチャセッションは既に実行中です")]
    CaptureActive,

    #[error("ファイル数が上限を超えています: {count}件（最大{max}件）")]
    TooManyFiles { count: usize, max: usize },

    #[error("アーカイブ出力エラー: {0}")]
    Export(String),

    #[error("色指定が不正: {0}（#RRGGBB形式で指定してください）")]
    InvalidColor(String),

    #[error("画像処理エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QrKitError>;

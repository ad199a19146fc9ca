use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qr-kit")]
#[command(about = "QRコード生成・一括生成・読み取りツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// テキストからQRコードを1枚生成
    Generate {
        /// エンコードするテキスト（URLなど）
        #[arg(required = true)]
        text: String,

        /// 出力PNGファイル（デフォルト: qrcode.png）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 画像幅（ピクセル）
        #[arg(long)]
        width: Option<u32>,

        /// 余白（モジュール数、0で余白なし）
        #[arg(long)]
        margin: Option<u32>,

        /// 前景色（#RRGGBB）
        #[arg(long)]
        fg: Option<String>,

        /// 背景色（#RRGGBB）
        #[arg(long)]
        bg: Option<String>,
    },

    /// URLリストから一括生成してZIPアーカイブに出力
    Batch {
        /// 入力テキストファイル（1行1URL、空行は無視）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ZIPファイル（デフォルト: qrcodes_<日時>.zip）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 画像幅（ピクセル）
        #[arg(long)]
        width: Option<u32>,

        /// 余白（モジュール数、0で余白なし）
        #[arg(long)]
        margin: Option<u32>,

        /// 前景色（#RRGGBB）
        #[arg(long)]
        fg: Option<String>,

        /// 背景色（#RRGGBB）
        #[arg(long)]
        bg: Option<String>,
    },

    /// 画像ファイルからQRコードを読み取り（最大10件）
    Scan {
        /// 画像ファイル、またはフォルダ1つ
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// フレームストリームから連続読み取り（最初の成功で停止）
    Camera {
        /// フレーム画像のフォルダ（キャプチャデバイスのフレームダンプ）
        #[arg(long, required = true)]
        frames: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// デフォルト画像幅を設定
        #[arg(long)]
        set_width: Option<u32>,

        /// デフォルト余白を設定
        #[arg(long)]
        set_margin: Option<u32>,

        /// デフォルト前景色を設定（#RRGGBB）
        #[arg(long)]
        set_fg: Option<String>,

        /// デフォルト背景色を設定（#RRGGBB）
        #[arg(long)]
        set_bg: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

use clap::Parser;
use qr_kit_rust::{archive, batch, classifier, cli, codec, config, error, scan};
use classifier::Classification;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use scan::camera::{CaptureController, FolderFrameSource};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { text, output, width, margin, fg, bg } => {
            println!("🔳 qr-kit - QRコード生成\n");

            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(error::QrKitError::EmptyInput("テキストを指定してください".into()));
            }

            let options = config.encode_options(width, margin, fg.as_deref(), bg.as_deref())?;
            let img = codec::encode(trimmed, &options)?;

            let output_path = output.unwrap_or_else(|| PathBuf::from("qrcode.png"));
            img.save(&output_path)?;

            println!("✔ 出力: {}", output_path.display());
            println!("\n✅ 完了");
        }

        Commands::Batch { input, output, width, margin, fg, bg } => {
            println!("📦 qr-kit - 一括生成\n");

            // 1. 入力読み込み
            println!("[1/3] 入力を読み込み中...");
            if !input.exists() {
                return Err(error::QrKitError::FileNotFound(input.display().to_string()));
            }
            let content = std::fs::read_to_string(&input)?;
            let lines = batch::read_lines(&content);
            println!("✔ {}件のURLを検出\n", lines.len());

            if lines.is_empty() {
                println!("⚠ 生成対象の行がありません");
                return Ok(());
            }

            // 2. 一括生成
            println!("[2/3] QRコードを生成中...");
            let options = config.encode_options(width, margin, fg.as_deref(), bg.as_deref())?;
            let results = batch::encode_batch(&lines, &options, cli.verbose);
            println!("✔ {}/{}件成功\n", results.len(), lines.len());

            if results.is_empty() {
                return Err(error::QrKitError::Encode(
                    "すべての行の生成に失敗しました".to_string(),
                ));
            }

            // 3. アーカイブ出力
            println!("[3/3] アーカイブを作成中...");
            let output_path =
                output.unwrap_or_else(|| PathBuf::from(archive::default_archive_name()));
            archive::write_archive(&results, &output_path)?;
            println!("✔ 出力: {}", output_path.display());

            println!("\n✅ 完了");
        }

        Commands::Scan { paths } => {
            println!("🔍 qr-kit - 読み取り\n");

            let sources = scan::expand_sources(&paths)?;
            if sources.is_empty() {
                println!("⚠ 対象の画像がありません");
                return Ok(());
            }

            println!("- {}件のファイルを読み取り中...", sources.len());
            let results = scan::scan_files(&sources, cli.verbose).await?;

            if results.is_empty() {
                println!("\n⚠ QRコードが見つかりませんでした");
                return Ok(());
            }

            println!("✔ {}件読み取り\n", results.len());
            for result in &results {
                print_decode_result(result);
            }

            println!("\n✅ 完了");
        }

        Commands::Camera { frames } => {
            println!("📷 qr-kit - カメラ読み取り\n");

            let controller = CaptureController::new();

            // Ctrl-Cで停止要求
            let stop_handle = controller.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop_handle.stop();
                }
            });

            println!("- キャプチャ開始（Ctrl-Cで停止）");
            let source = FolderFrameSource::new(&frames);

            match controller.capture(source).await? {
                Some(result) => {
                    println!("✔ 読み取り成功\n");
                    print_decode_result(&result);
                    println!("\n✅ 完了");
                }
                None => {
                    println!("\n⚠ QRコードが見つかりませんでした");
                }
            }
        }

        Commands::Config { set_width, set_margin, set_fg, set_bg, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(width) = set_width {
                config.default_width = width;
                changed = true;
            }
            if let Some(margin) = set_margin {
                config.default_margin = margin;
                changed = true;
            }
            if let Some(fg) = set_fg {
                codec::parse_color(&fg)?;
                config.foreground = fg;
                changed = true;
            }
            if let Some(bg) = set_bg {
                codec::parse_color(&bg)?;
                config.background = bg;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  画像幅: {}px", config.default_width);
                println!("  余白: {}モジュール", config.default_margin);
                println!("  前景色: {}", config.foreground);
                println!("  背景色: {}", config.background);
            }
        }
    }

    Ok(())
}

fn print_decode_result(result: &scan::DecodeResult) {
    match classifier::classify(&result.decoded_text) {
        Classification::Link(url) => {
            println!("  🔗 {}: {}", result.source_label, url);
        }
        Classification::PlainText => {
            println!("  📄 {}: {}", result.source_label, result.decoded_text);
        }
    }
}

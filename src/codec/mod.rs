//! QRコーデックアダプタ
//!
//! 外部コーデック（qrcode / rqrr）をラップし、テキスト⇄画像の変換だけを
//! 公開する。リトライは行わず、シンボル未検出を致命とするかどうかは
//! 呼び出し側が判断する。

use crate::error::{QrKitError, Result};
use image::{DynamicImage, GrayImage, Rgba, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;

/// エンコードオプション
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// 出力画像の目標幅（ピクセル）
    pub width: u32,
    /// 余白（モジュール数）
    pub margin: u32,
    /// 前景色 RGBA
    pub foreground: [u8; 4],
    /// 背景色 RGBA
    pub background: [u8; 4],
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: 300,
            margin: 4,
            foreground: [0x00, 0x00, 0x00, 0xFF],
            background: [0xFF, 0xFF, 0xFF, 0xFF],
        }
    }
}

/// `#RRGGBB` / `RRGGBB` 形式の色指定をRGBAに変換
pub fn parse_color(s: &str) -> Result<[u8; 4]> {
    let hex_part = s.strip_prefix('#').unwrap_or(s);

    if hex_part.len() != 6 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(QrKitError::InvalidColor(s.to_string()));
    }

    let bytes = hex::decode(hex_part).map_err(|_| QrKitError::InvalidColor(s.to_string()))?;
    Ok([bytes[0], bytes[1], bytes[2], 0xFF])
}

/// テキストをQRコード画像にエンコード
pub fn encode(text: &str, options: &EncodeOptions) -> Result<RgbaImage> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| QrKitError::Encode(e.to_string()))?;

    // 目標幅からモジュール1個あたりのピクセル数を逆算
    let modules = code.width() as u32;
    let margin_total = options.margin * 2;
    let module_px = (options.width / (modules + margin_total)).max(1);

    let symbol = code
        .render::<Rgba<u8>>()
        .module_dimensions(module_px, module_px)
        .quiet_zone(false)
        .dark_color(Rgba(options.foreground))
        .light_color(Rgba(options.background))
        .build();

    if options.margin == 0 {
        return Ok(symbol);
    }

    // 余白を背景色で付加
    let pad = options.margin * module_px;
    let size = symbol.width() + pad * 2;
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba(options.background));
    image::imageops::overlay(&mut canvas, &symbol, pad as i64, pad as i64);

    Ok(canvas)
}

/// テキストをエンコードしてPNGバイト列を返す
pub fn encode_png(text: &str, options: &EncodeOptions) -> Result<Vec<u8>> {
    let img = encode(text, options)?;
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img).write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// グレースケールフレームからQRコードをデコード
pub fn decode_frame(frame: GrayImage) -> Result<String> {
    let mut prepared = rqrr::PreparedImage::prepare(frame);
    let grids = prepared.detect_grids();

    let grid = grids
        .first()
        .ok_or_else(|| QrKitError::SymbolNotFound("シンボル未検出".to_string()))?;

    let (_meta, content) = grid
        .decode()
        .map_err(|e| QrKitError::SymbolNotFound(e.to_string()))?;

    Ok(content)
}

/// 画像からQRコードをデコード
pub fn decode_image(img: &DynamicImage) -> Result<String> {
    decode_frame(img.to_luma8())
}

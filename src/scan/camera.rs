//! ライブキャプチャモード
//!
//! キャプチャデバイスは外部能力として `FrameSource` トレイトの背後に
//! 置く。セッションは Idle → RequestingPermission → Capturing → Idle の
//! 状態機械で、最初の成功または明示的な停止でデバイスを解放する。
//! シンボルが検出されないフレームは探索中の定常ノイズであり、
//! エラーとして扱わない。

use crate::codec;
use crate::error::{QrKitError, Result};
use crate::scan::DecodeResult;
use image::GrayImage;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// カメラ読み取り結果のラベル
pub const CAMERA_SOURCE_LABEL: &str = "Camera Scan";

/// キャプチャセッションの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    RequestingPermission,
    Capturing,
}

/// キャプチャデバイスの抽象
///
/// `open` がパーミッション取得とデバイス確保、`next_frame` がフレーム
/// 取得（ストリーム終了は `Ok(None)`）、`close` がデバイス解放。
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<()>;
    fn next_frame(&mut self) -> Result<Option<GrayImage>>;
    fn close(&mut self);
}

#[derive(Default)]
struct Inner {
    state: CaptureState,
    cancel: Option<CancellationToken>,
}

/// キャプチャセッションの制御
///
/// 同時に実行できるセッションは1つだけ。実行中に `capture` を重ねて
/// 呼ぶと `CaptureActive` で拒否される。`stop` はいつでも呼べて、
/// セッションがなければ何もしない。
#[derive(Clone, Default)]
pub struct CaptureController {
    inner: Arc<Mutex<Inner>>,
}

impl CaptureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在のセッション状態
    pub fn state(&self) -> CaptureState {
        self.inner.lock().map(|inner| inner.state).unwrap_or_default()
    }

    /// 実行中のセッションを停止する（セッションがなければno-op）
    pub fn stop(&self) {
        if let Ok(inner) = self.inner.lock() {
            if let Some(token) = &inner.cancel {
                token.cancel();
            }
        }
    }

    /// キャプチャセッションを実行する
    ///
    /// 最初に空でないテキストをデコードしたフレームで成功として終了し、
    /// デバイスを解放する。停止要求またはストリーム終了で打ち切られた
    /// 場合は `Ok(None)` を返す。
    pub async fn capture<S: FrameSource>(&self, mut source: S) -> Result<Option<DecodeResult>> {
        let token = self.begin()?;

        if let Err(e) = source.open() {
            self.finish();
            return Err(QrKitError::Permission(e.to_string()));
        }

        self.set_capturing();

        let mut found = None;

        loop {
            if token.is_cancelled() {
                break;
            }

            match source.next_frame() {
                Ok(Some(frame)) => {
                    // シンボル未検出は無視して次のフレームへ
                    if let Ok(text) = codec::decode_frame(frame) {
                        if !text.is_empty() {
                            found = Some(DecodeResult {
                                source_label: CAMERA_SOURCE_LABEL.to_string(),
                                decoded_text: text,
                            });
                            break;
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    eprintln!("  ⚠ フレーム取得エラー: {}", e);
                    break;
                }
            }

            // フレームごとに協調的な中断ポイントを挟む
            tokio::task::yield_now().await;
        }

        source.close();
        self.finish();

        Ok(found)
    }

    fn begin(&self) -> Result<CancellationToken> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| QrKitError::Permission("セッション状態の取得に失敗".to_string()))?;

        if inner.state != CaptureState::Idle {
            return Err(QrKitError::CaptureActive);
        }

        inner.state = CaptureState::RequestingPermission;
        let token = CancellationToken::new();
        inner.cancel = Some(token.clone());
        Ok(token)
    }

    fn set_capturing(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.state = CaptureState::Capturing;
        }
    }

    fn finish(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.state = CaptureState::Idle;
            inner.cancel = None;
        }
    }
}

/// フォルダ内の画像をフレームとして順に再生するソース
///
/// キャプチャデバイスのフレームダンプを再生する用途。フォルダが
/// 存在しない・フレームが1枚もない場合は `open` が失敗し、
/// オーケストレータがパーミッションエラーとして報告する。
pub struct FolderFrameSource {
    folder: PathBuf,
    frames: Vec<PathBuf>,
    position: usize,
}

impl FolderFrameSource {
    pub fn new(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            frames: Vec::new(),
            position: 0,
        }
    }
}

impl FrameSource for FolderFrameSource {
    fn open(&mut self) -> Result<()> {
        let frames = crate::scan::collect_images(&self.folder)?;

        if frames.is_empty() {
            return Err(QrKitError::Permission(format!(
                "フレームがありません: {}",
                self.folder.display()
            )));
        }

        self.frames = frames;
        self.position = 0;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<GrayImage>> {
        while let Some(path) = self.frames.get(self.position) {
            self.position += 1;

            // 読めないフレームはスキップして次へ
            match image::open(path) {
                Ok(img) => return Ok(Some(img.to_luma8())),
                Err(e) => eprintln!("  ⚠ フレーム読み込みスキップ: {} ({})", path.display(), e),
            }
        }

        Ok(None)
    }

    fn close(&mut self) {
        self.frames.clear();
        self.position = 0;
    }
}

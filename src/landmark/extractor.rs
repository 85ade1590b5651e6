use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

use crate::config::DetectorConfig;

use super::detector::{HandLandmarker, PoseLandmarker, HAND_INPUT_SIZE, POSE_INPUT_SIZE};
use super::keypoint::ExtractionResult;
use super::preprocess::preprocess;

/// 画像 1 枚からハンド・ボディ両方のランドマークを抽出する
///
/// セッションは構築時に一度だけ作り、以降の抽出で使い回す。
/// 抽出は逐次ワンショット: 画像ロード → ハンド検出 → ポーズ検出。
pub struct LandmarkExtractor {
    hand: HandLandmarker,
    pose: PoseLandmarker,
}

impl LandmarkExtractor {
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        let hand = HandLandmarker::new(&config.hand_model, config.num_hands, config.min_presence)?;
        let pose = PoseLandmarker::new(&config.pose_model, config.min_presence)?;
        Ok(Self { hand, pose })
    }

    /// ファイルから抽出
    ///
    /// 画像のデコード失敗はこの抽出全体の失敗として呼び出し元に伝播する。
    pub fn extract_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ExtractionResult> {
        let image = image::open(path.as_ref())
            .with_context(|| format!("Failed to load image: {}", path.as_ref().display()))?;
        self.extract_image(&image.to_rgb8())
    }

    /// デコード済み画像から抽出
    pub fn extract_image(&mut self, frame: &RgbImage) -> Result<ExtractionResult> {
        let hands = self.hand.detect(preprocess(frame, HAND_INPUT_SIZE))?;
        log::debug!("Hand detections: {}", hands.len());

        let body = self.pose.detect(preprocess(frame, POSE_INPUT_SIZE))?;
        log::debug!("Body detected: {}", body.is_some());

        Ok(ExtractionResult { body, hands })
    }
}

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::keypoint::{
    BodyLandmarkIndex, BodyLandmarks, HandDetection, HandLandmarkIndex, HandLandmarks, Handedness,
    Landmark,
};

/// ポーズランドマーカーの入力サイズ
pub const POSE_INPUT_SIZE: u32 = 256;
/// ハンドランドマーカーの入力サイズ
pub const HAND_INPUT_SIZE: u32 = 224;

/// ボディランドマーク検出器
///
/// 出力は [1, 33*5] の (x, y, z, visibility, presence)。
pub struct PoseLandmarker {
    session: Session,
    min_presence: f32,
}

impl PoseLandmarker {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P, min_presence: f32) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .context("Failed to load pose landmarker ONNX model")?;

        Ok(Self {
            session,
            min_presence,
        })
    }

    /// 前処理済みテンソルからボディランドマークを検出
    ///
    /// presence の平均が閾値未満なら未検出として None。
    pub fn detect(&mut self, input: Array4<f32>) -> Result<Option<BodyLandmarks>> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input_1" => input_tensor])
            .context("Pose inference failed")?;

        let output: ndarray::ArrayViewD<f32> = outputs["Identity"]
            .try_extract_array()
            .context("Failed to extract pose output tensor")?;

        let mut landmarks = [Landmark::default(); BodyLandmarkIndex::COUNT];
        let mut presence_sum = 0.0;

        for i in 0..BodyLandmarkIndex::COUNT {
            let base = i * 5;
            landmarks[i] = Landmark::new(
                output[[0, base]],
                output[[0, base + 1]],
                output[[0, base + 2]],
                output[[0, base + 3]],
            );
            presence_sum += output[[0, base + 4]];
        }

        let presence = presence_sum / BodyLandmarkIndex::COUNT as f32;
        if presence < self.min_presence {
            log::debug!("Pose presence {:.2} below threshold", presence);
            return Ok(None);
        }

        Ok(Some(BodyLandmarks::new(landmarks)))
    }
}

/// ハンドランドマーク検出器
///
/// 出力: landmarks [1, N, 63], handedness [1, N, 2] (左/右スコア),
/// presence [1, N]。presence が閾値未満の手は捨てる。
pub struct HandLandmarker {
    session: Session,
    num_hands: usize,
    min_presence: f32,
}

impl HandLandmarker {
    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(model_path: P, num_hands: usize, min_presence: f32) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .context("Failed to load hand landmarker ONNX model")?;

        Ok(Self {
            session,
            num_hands,
            min_presence,
        })
    }

    /// 前処理済みテンソルから手を検出（0〜num_hands 件）
    pub fn detect(&mut self, input: Array4<f32>) -> Result<Vec<HandDetection>> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input_1" => input_tensor])
            .context("Hand inference failed")?;

        let landmarks_out: ndarray::ArrayViewD<f32> = outputs["Identity"]
            .try_extract_array()
            .context("Failed to extract hand landmark tensor")?;
        let handedness_out: ndarray::ArrayViewD<f32> = outputs["Identity_1"]
            .try_extract_array()
            .context("Failed to extract handedness tensor")?;
        let presence_out: ndarray::ArrayViewD<f32> = outputs["Identity_2"]
            .try_extract_array()
            .context("Failed to extract hand presence tensor")?;

        let slots = landmarks_out.shape()[1].min(self.num_hands);
        let mut hands = Vec::new();

        for h in 0..slots {
            let presence = presence_out[[0, h]];
            if presence < self.min_presence {
                continue;
            }

            let mut points = [Landmark::default(); HandLandmarkIndex::COUNT];
            for i in 0..HandLandmarkIndex::COUNT {
                let base = i * 3;
                points[i] = Landmark::new(
                    landmarks_out[[0, h, base]],
                    landmarks_out[[0, h, base + 1]],
                    landmarks_out[[0, h, base + 2]],
                    presence,
                );
            }

            let left_score = handedness_out[[0, h, 0]];
            let right_score = handedness_out[[0, h, 1]];
            let (handedness, score) = if left_score >= right_score {
                (Handedness::Left, left_score)
            } else {
                (Handedness::Right, right_score)
            };

            hands.push(HandDetection {
                handedness,
                score,
                landmarks: HandLandmarks::new(points),
            });
        }

        Ok(hands)
    }
}

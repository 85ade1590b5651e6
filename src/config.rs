use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub fk: FkConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// ポーズランドマーカーの ONNX モデルパス
    #[serde(default = "default_pose_model")]
    pub pose_model: String,
    /// ハンドランドマーカーの ONNX モデルパス
    #[serde(default = "default_hand_model")]
    pub hand_model: String,
    /// 検出する手の最大数
    #[serde(default = "default_num_hands")]
    pub num_hands: usize,
    /// 検出有効とみなす presence スコア閾値
    #[serde(default = "default_min_presence")]
    pub min_presence: f32,
    /// ソルバーが使うランドマーク可視度の閾値
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FkConfig {
    /// ボーンマーカー球の半径（メートル）
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,
    /// 非選択マーカーの不透明度
    #[serde(default = "default_dimmed_opacity")]
    pub dimmed_opacity: f32,
}

fn default_pose_model() -> String { "models/pose_landmarker.onnx".to_string() }
fn default_hand_model() -> String { "models/hand_landmarker.onnx".to_string() }
fn default_num_hands() -> usize { 2 }
fn default_min_presence() -> f32 { 0.5 }
fn default_min_visibility() -> f32 { 0.3 }
fn default_marker_radius() -> f32 { 0.05 }
fn default_dimmed_opacity() -> f32 { 0.3 }

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            pose_model: default_pose_model(),
            hand_model: default_hand_model(),
            num_hands: default_num_hands(),
            min_presence: default_min_presence(),
            min_visibility: default_min_visibility(),
        }
    }
}

impl Default for FkConfig {
    fn default() -> Self {
        Self {
            marker_radius: default_marker_radius(),
            dimmed_opacity: default_dimmed_opacity(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 読めなければデフォルト設定で続行
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Failed to load {} ({}); using defaults",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}

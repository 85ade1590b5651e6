use nalgebra::UnitQuaternion;
use serde::Serialize;

/// クォータニオンのキーフレームトラック
///
/// target は `<ボーン名>.quaternion`。このパイプラインは静止ポーズの
/// スナップショットを出力するため、タイムスタンプは 1 点のみ。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuaternionTrack {
    pub target: String,
    pub times: Vec<f32>,
    /// (x, y, z, w)
    pub values: Vec<[f32; 4]>,
}

impl QuaternionTrack {
    /// 単一スナップショットのトラックを作る
    pub fn single(bone: &str, quaternion: &UnitQuaternion<f32>) -> Self {
        Self {
            target: format!("{}.quaternion", bone),
            times: vec![0.0],
            values: vec![[quaternion.i, quaternion.j, quaternion.k, quaternion.w]],
        }
    }

    /// target からボーン名部分を取り出す
    pub fn bone_name(&self) -> &str {
        self.target
            .strip_suffix(".quaternion")
            .unwrap_or(&self.target)
    }
}

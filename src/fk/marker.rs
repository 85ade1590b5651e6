use nalgebra::Point3;

use crate::rig::Skeleton;

/// 選択中マーカーの不透明度
pub const FULL_OPACITY: f32 = 1.0;
/// 非選択マーカーの不透明度
pub const DIMMED_OPACITY: f32 = 0.3;

/// ボーン 1 本に対応するヒットテスト用マーカー球
///
/// FK モード中のみ存在する一時的なプロキシ。
#[derive(Debug, Clone)]
pub struct BoneMarker {
    /// 対応するボーンのインデックス
    pub bone: usize,
    /// ボーンの親インデックス（ギズモの取り付け先）
    pub parent: Option<usize>,
    pub position: Point3<f32>,
    pub radius: f32,
    pub opacity: f32,
}

impl BoneMarker {
    pub fn new(bone: usize, parent: Option<usize>, position: Point3<f32>, radius: f32) -> Self {
        Self {
            bone,
            parent,
            position,
            radius,
            opacity: FULL_OPACITY,
        }
    }
}

/// スケルトン可視化オーバーレイ（親→子の線分リスト）
#[derive(Debug, Clone, Default)]
pub struct SkeletonOverlay {
    pub segments: Vec<(Point3<f32>, Point3<f32>)>,
}

impl SkeletonOverlay {
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let mut segments = Vec::new();
        for (index, bone) in skeleton.bones().iter().enumerate() {
            if let Some(parent) = bone.parent {
                segments.push((skeleton.world_position(parent), skeleton.world_position(index)));
            }
        }
        Self { segments }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::mixamo_reference;

    #[test]
    fn test_marker_starts_full_opacity() {
        let marker = BoneMarker::new(0, None, Point3::origin(), 0.05);
        assert_eq!(marker.opacity, FULL_OPACITY);
    }

    #[test]
    fn test_overlay_one_segment_per_child_bone() {
        let skeleton = mixamo_reference();
        let overlay = SkeletonOverlay::from_skeleton(&skeleton);
        // ルート以外のボーン数だけ線分がある
        assert_eq!(overlay.segments.len(), skeleton.len() - 1);
    }
}

use crate::config::FkConfig;
use crate::rig::Skeleton;
use crate::solver::EulerRotation;

use super::marker::{BoneMarker, SkeletonOverlay, FULL_OPACITY};
use super::ray::Ray;

/// FK 操作の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FkState {
    /// 対象なし
    Idle,
    /// 対象リグあり、ボーン未選択
    TargetSelected,
    /// ボーン選択中（ギズモ装着済み）
    BoneSelected { bone: usize },
}

/// クリック処理の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// ドラッグ直後の合成クリックとして無視した
    Suppressed,
    /// マーカーにヒットしてボーンを選択した
    Selected(usize),
    /// ヒットなし、選択を解除した
    Cleared,
    /// 対象がないため何もしなかった
    Inactive,
}

/// 回転専用のトランスフォームギズモ
///
/// ヒットしたボーンの親に取り付ける。ルートボーンは自身に付く。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateGizmo {
    pub bone: usize,
}

/// ワンショットのクリック抑制（単一スロットのキュー）
#[derive(Debug, Clone, Copy)]
struct SuppressClick;

/// FK ボーン操作コントローラ
///
/// マーカー球へのレイキャストでボーンを選択し、回転ギズモの
/// 着脱とハイライトを管理する。ドラッグ終了時にホスト側が発行する
/// 合成クリックは、単一スロットの抑制キューで 1 回だけ無視する。
pub struct FkController {
    state: FkState,
    markers: Vec<BoneMarker>,
    overlay: Option<SkeletonOverlay>,
    gizmo: Option<RotateGizmo>,
    suppress_next_click: Option<SuppressClick>,
    dragging: bool,
    marker_radius: f32,
    dimmed_opacity: f32,
    on_drag_change: Option<Box<dyn FnMut(bool)>>,
}

impl FkController {
    pub fn new(config: &FkConfig) -> Self {
        Self {
            state: FkState::Idle,
            markers: Vec::new(),
            overlay: None,
            gizmo: None,
            suppress_next_click: None,
            dragging: false,
            marker_radius: config.marker_radius,
            dimmed_opacity: config.dimmed_opacity,
            on_drag_change: None,
        }
    }

    /// ドラッグ状態変化の通知先を登録
    pub fn set_on_drag_change(&mut self, callback: Box<dyn FnMut(bool)>) {
        self.on_drag_change = Some(callback);
    }

    pub fn state(&self) -> FkState {
        self.state
    }

    pub fn markers(&self) -> &[BoneMarker] {
        &self.markers
    }

    pub fn overlay(&self) -> Option<&SkeletonOverlay> {
        self.overlay.as_ref()
    }

    pub fn gizmo(&self) -> Option<RotateGizmo> {
        self.gizmo
    }

    pub fn selected_bone(&self) -> Option<usize> {
        match self.state {
            FkState::BoneSelected { bone } => Some(bone),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// 対象リグを設定し、ボーンごとのマーカーとオーバーレイを作る
    ///
    /// 既存の対象があれば先に破棄する。
    pub fn set_target(&mut self, skeleton: &Skeleton) {
        self.clear();

        for (index, bone) in skeleton.bones().iter().enumerate() {
            self.markers.push(BoneMarker::new(
                index,
                bone.parent,
                skeleton.world_position(index),
                self.marker_radius,
            ));
        }
        self.overlay = Some(SkeletonOverlay::from_skeleton(skeleton));
        self.state = FkState::TargetSelected;
    }

    /// クリック処理
    ///
    /// レイキャストの対象はマーカーのみ（シーン全体ではない）。
    /// ヒット時はそのマーカーを残して他を減光し、ギズモを付け替える。
    /// ヒットなしなら全マーカーを全不透明に戻してギズモを外す。
    pub fn on_click(&mut self, ray: &Ray) -> ClickOutcome {
        if self.suppress_next_click.take().is_some() {
            return ClickOutcome::Suppressed;
        }
        if self.state == FkState::Idle {
            return ClickOutcome::Inactive;
        }

        let mut best: Option<(usize, f32)> = None;
        for (i, marker) in self.markers.iter().enumerate() {
            if let Some(t) = ray.intersect_sphere(&marker.position, marker.radius) {
                if best.map_or(true, |(_, best_t)| t < best_t) {
                    best = Some((i, t));
                }
            }
        }

        match best {
            Some((hit, _)) => {
                let bone = self.markers[hit].bone;
                let parent = self.markers[hit].parent;
                for (i, marker) in self.markers.iter_mut().enumerate() {
                    marker.opacity = if i == hit {
                        FULL_OPACITY
                    } else {
                        self.dimmed_opacity
                    };
                }
                self.gizmo = Some(RotateGizmo {
                    bone: parent.unwrap_or(bone),
                });
                self.state = FkState::BoneSelected { bone };
                ClickOutcome::Selected(bone)
            }
            None => {
                for marker in self.markers.iter_mut() {
                    marker.opacity = FULL_OPACITY;
                }
                self.gizmo = None;
                self.state = FkState::TargetSelected;
                ClickOutcome::Cleared
            }
        }
    }

    /// ギズモのドラッグ状態変化
    ///
    /// 変化のたびに次のクリック 1 回分の抑制を積む。ドラッグ完了後に
    /// ホストウィンドウが合成クリックを発行するため、それを無視しないと
    /// 回転直後に選択が解除されてしまう。
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.suppress_next_click = Some(SuppressClick);
        if let Some(callback) = self.on_drag_change.as_mut() {
            callback(dragging);
        }
    }

    /// 選択中ボーンのローカル回転を手動で上書き（加算）
    ///
    /// スケルトンへの書き込みは同期的で、最後に書いた者が勝つ。
    pub fn apply_rotation(&mut self, skeleton: &mut Skeleton, delta: EulerRotation) -> bool {
        let Some(bone) = self.selected_bone() else {
            return false;
        };
        let target = skeleton.bone_mut(bone);
        target.local_rotation = target.local_rotation + delta;
        self.refresh_markers(skeleton);
        true
    }

    /// ボーン編集後にマーカー位置とオーバーレイを更新
    pub fn refresh_markers(&mut self, skeleton: &Skeleton) {
        for marker in self.markers.iter_mut() {
            marker.position = skeleton.world_position(marker.bone);
        }
        if self.overlay.is_some() {
            self.overlay = Some(SkeletonOverlay::from_skeleton(skeleton));
        }
    }

    /// 全て破棄して Idle に戻す
    ///
    /// 何も無い状態で呼んでも安全（冪等）。
    pub fn clear(&mut self) {
        self.markers.clear();
        self.overlay = None;
        self.gizmo = None;
        self.suppress_next_click = None;
        self.dragging = false;
        self.state = FkState::Idle;
    }
}

impl Default for FkController {
    fn default() -> Self {
        Self::new(&FkConfig::default())
    }
}

use crate::landmark::{ExtractionResult, Handedness};
use crate::rig::{body_mapping, hand_bone_name, Skeleton, BODY_MAPPINGS};
use crate::solver::{
    assign_hands, quaternion_from_euler, solve_hand, BodyJoint, BodyRotations, BodySolver,
    EulerRotation, HandJoint, HandRotations, RotationOrder,
};

use super::track::QuaternionTrack;

/// ハンドトラックのコンパイル順（左右共通）
const HAND_JOINT_ORDER: [HandJoint; 16] = [
    HandJoint::Wrist,
    HandJoint::ThumbProximal,
    HandJoint::ThumbIntermediate,
    HandJoint::ThumbDistal,
    HandJoint::IndexProximal,
    HandJoint::IndexIntermediate,
    HandJoint::IndexDistal,
    HandJoint::MiddleProximal,
    HandJoint::MiddleIntermediate,
    HandJoint::MiddleDistal,
    HandJoint::RingProximal,
    HandJoint::RingIntermediate,
    HandJoint::RingDistal,
    HandJoint::LittleProximal,
    HandJoint::LittleIntermediate,
    HandJoint::LittleDistal,
];

/// ポーズ → キーフレームトラックのコンパイラ
///
/// マッピングテーブルを走査し、ボーンごとに軸補正と加算合成を適用して
/// クォータニオントラックを 1 本ずつ出力する。ボーン未解決は
/// ログを残してスキップし、残りの処理は継続する。
pub struct TrackCompiler {
    min_visibility: f32,
}

impl TrackCompiler {
    pub fn new(min_visibility: f32) -> Self {
        Self { min_visibility }
    }

    pub fn from_config(config: &crate::config::DetectorConfig) -> Self {
        Self::new(config.min_visibility)
    }

    /// 抽出結果から一括でトラックを生成する
    ///
    /// ボディ未検出なら空。左右の手が揃わない場合はハンドトラックのみ
    /// スキップしてボディトラックを返す。
    pub fn compile_detection(
        &self,
        skeleton: &Skeleton,
        result: &ExtractionResult,
    ) -> Vec<QuaternionTrack> {
        let Some(body_landmarks) = &result.body else {
            log::warn!("No body detected; nothing to compile");
            return Vec::new();
        };

        let body = BodySolver::new(self.min_visibility).solve(body_landmarks);

        let hands = assign_hands(&result.hands).map(|pair| {
            (
                solve_hand(&pair.left, Handedness::Left),
                solve_hand(&pair.right, Handedness::Right),
            )
        });

        self.compile(skeleton, &body, hands.as_ref().map(|(l, r)| (l, r)))
    }

    /// 解けたジョイント回転からトラックを生成する
    pub fn compile(
        &self,
        skeleton: &Skeleton,
        body: &BodyRotations,
        hands: Option<(&HandRotations, &HandRotations)>,
    ) -> Vec<QuaternionTrack> {
        let mut tracks = Vec::new();

        for (joint, _) in BODY_MAPPINGS.iter() {
            self.compile_rotation(&mut tracks, skeleton, *joint, body.get(*joint));
        }

        if let Some((left, right)) = hands {
            self.compile_hand(&mut tracks, skeleton, Handedness::Left, body.left_hand, left);
            self.compile_hand(&mut tracks, skeleton, Handedness::Right, body.right_hand, right);
        }

        tracks
    }

    /// ボディジョイント 1 つ分のトラックを積む
    ///
    /// マッピングまたはボーンが見つからない場合はスキップ（非致命）。
    pub fn compile_rotation(
        &self,
        tracks: &mut Vec<QuaternionTrack>,
        skeleton: &Skeleton,
        joint: BodyJoint,
        rotation: EulerRotation,
    ) {
        let Some(mapping) = body_mapping(joint) else {
            log::warn!("No bone mapping for joint {:?}", joint);
            return;
        };
        let Some(index) = skeleton.find(mapping.bone) else {
            log::warn!("Bone not found with name: {}", mapping.bone);
            return;
        };

        // 加算合成: 現在のローカル回転 + 補正済みデルタ
        let delta = mapping.correct(&rotation);
        let euler = skeleton.bone(index).local_rotation + delta;
        let quaternion = quaternion_from_euler(euler, mapping.order);
        tracks.push(QuaternionTrack::single(mapping.bone, &quaternion));
    }

    /// ハンドジョイント 1 つ分のトラックを積む
    ///
    /// 手は名前マップのみで軸補正なし、合成順序は XYZ 固定。
    pub fn compile_hand_rotation(
        &self,
        tracks: &mut Vec<QuaternionTrack>,
        skeleton: &Skeleton,
        handedness: Handedness,
        joint: HandJoint,
        rotation: EulerRotation,
    ) {
        let Some(bone_name) = hand_bone_name(handedness, joint) else {
            log::warn!("No bone mapping for hand joint {:?}", joint);
            return;
        };
        let Some(index) = skeleton.find(bone_name) else {
            log::warn!("Bone not found with name: {}", bone_name);
            return;
        };

        let euler = skeleton.bone(index).local_rotation + rotation;
        let quaternion = quaternion_from_euler(euler, RotationOrder::Xyz);
        tracks.push(QuaternionTrack::single(bone_name, &quaternion));
    }

    /// 片手分: 手首はボディソルバーの回転、指はハンドソルバーの回転
    fn compile_hand(
        &self,
        tracks: &mut Vec<QuaternionTrack>,
        skeleton: &Skeleton,
        handedness: Handedness,
        wrist: EulerRotation,
        hand: &HandRotations,
    ) {
        for joint in HAND_JOINT_ORDER {
            let rotation = match joint {
                HandJoint::Wrist => wrist,
                other => hand.get(other),
            };
            self.compile_hand_rotation(tracks, skeleton, handedness, joint, rotation);
        }
    }
}

impl Default for TrackCompiler {
    fn default() -> Self {
        Self::new(0.3)
    }
}

use crate::landmark::Handedness;
use crate::solver::{Axis, BodyJoint, EulerRotation, HandJoint, RotationOrder};

/// 軸補正式
///
/// 旧実装が文字列式の動的評価で行っていた軸補正を、タグ付き列挙で
/// 直接評価する。入力回転の成分から出力成分を 1 つ作る純粋関数。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisExpr {
    /// 常に 0
    Zero,
    /// 指定軸の成分をそのまま
    Take(Axis),
    /// 指定軸の成分を反転
    Negate(Axis),
    /// 指定軸の成分を定数倍
    Scale(Axis, f32),
    /// 複数式の和
    Sum(&'static [AxisExpr]),
}

impl AxisExpr {
    pub fn eval(&self, rotation: &EulerRotation) -> f32 {
        match self {
            Self::Zero => 0.0,
            Self::Take(axis) => component(rotation, *axis),
            Self::Negate(axis) => -component(rotation, *axis),
            Self::Scale(axis, factor) => component(rotation, *axis) * factor,
            Self::Sum(terms) => terms.iter().map(|t| t.eval(rotation)).sum(),
        }
    }
}

fn component(rotation: &EulerRotation, axis: Axis) -> f32 {
    match axis {
        Axis::X => rotation.x,
        Axis::Y => rotation.y,
        Axis::Z => rotation.z,
    }
}

/// ボディジョイント 1 つ分のマッピング行
#[derive(Debug, Clone, Copy)]
pub struct BoneMapping {
    /// 対象ボーン名
    pub bone: &'static str,
    pub fx: AxisExpr,
    pub fy: AxisExpr,
    pub fz: AxisExpr,
    /// クォータニオン化に使う合成順序
    pub order: RotationOrder,
}

impl BoneMapping {
    /// ソルバー回転に軸補正を適用
    pub fn correct(&self, rotation: &EulerRotation) -> EulerRotation {
        EulerRotation::new(
            self.fx.eval(rotation),
            self.fy.eval(rotation),
            self.fz.eval(rotation),
        )
    }
}

use Axis::{X, Y, Z};
use AxisExpr::{Negate, Scale, Sum, Take, Zero};

/// ボディジョイント → ボーンの静的マッピングテーブル
///
/// 並び順はそのままトラックのコンパイル順になる。
/// 補正値はこのリグ向けのキャリブレーション。
pub static BODY_MAPPINGS: [(BodyJoint, BoneMapping); 10] = [
    (
        BodyJoint::Hips,
        BoneMapping {
            bone: "mixamorigHips",
            fx: Take(X),
            fy: Take(Y),
            fz: Take(Z),
            order: RotationOrder::Xyz,
        },
    ),
    (
        BodyJoint::Spine,
        BoneMapping {
            bone: "mixamorigSpine",
            fx: Scale(X, 0.7),
            fy: Sum(&[Take(Y), Scale(Z, 0.2)]),
            fz: Take(Z),
            order: RotationOrder::Xyz,
        },
    ),
    (
        BodyJoint::RightUpperArm,
        BoneMapping {
            bone: "mixamorigRightArm",
            fx: Take(X),
            fy: Negate(Y),
            fz: Take(Z),
            order: RotationOrder::Zxy,
        },
    ),
    (
        BodyJoint::RightLowerArm,
        BoneMapping {
            bone: "mixamorigRightForeArm",
            fx: Take(X),
            fy: Negate(Y),
            fz: Take(Z),
            order: RotationOrder::Zxy,
        },
    ),
    (
        BodyJoint::LeftUpperArm,
        BoneMapping {
            bone: "mixamorigLeftArm",
            fx: Take(X),
            fy: Take(Y),
            fz: Negate(Z),
            order: RotationOrder::Zxy,
        },
    ),
    (
        BodyJoint::LeftLowerArm,
        BoneMapping {
            bone: "mixamorigLeftForeArm",
            fx: Take(X),
            fy: Take(Y),
            fz: Negate(Z),
            order: RotationOrder::Zxy,
        },
    ),
    (
        BodyJoint::RightUpperLeg,
        BoneMapping {
            bone: "mixamorigRightUpLeg",
            fx: Negate(X),
            fy: Zero,
            fz: Take(Z),
            order: RotationOrder::Xyz,
        },
    ),
    (
        BodyJoint::RightLowerLeg,
        BoneMapping {
            bone: "mixamorigRightLeg",
            fx: Negate(X),
            fy: Zero,
            fz: Take(Z),
            order: RotationOrder::Xyz,
        },
    ),
    (
        BodyJoint::LeftUpperLeg,
        BoneMapping {
            bone: "mixamorigLeftUpLeg",
            fx: Negate(X),
            fy: Zero,
            fz: Negate(Z),
            order: RotationOrder::Xyz,
        },
    ),
    (
        BodyJoint::LeftLowerLeg,
        BoneMapping {
            bone: "mixamorigLeftLeg",
            fx: Negate(X),
            fy: Zero,
            fz: Negate(Z),
            order: RotationOrder::Xyz,
        },
    ),
];

/// テーブルからボディジョイントのマッピングを引く
pub fn body_mapping(joint: BodyJoint) -> Option<&'static BoneMapping> {
    BODY_MAPPINGS
        .iter()
        .find(|(j, _)| *j == joint)
        .map(|(_, m)| m)
}

/// ハンドジョイント → ボーン名の静的マップ
///
/// 手は名前のみの対応で、軸補正は持たない（合成順序は常に XYZ）。
pub fn hand_bone_name(handedness: Handedness, joint: HandJoint) -> Option<&'static str> {
    let name = match (handedness, joint) {
        (Handedness::Left, HandJoint::Wrist) => "mixamorigLeftHand",
        (Handedness::Left, HandJoint::ThumbProximal) => "mixamorigLeftHandThumb1",
        (Handedness::Left, HandJoint::ThumbIntermediate) => "mixamorigLeftHandThumb2",
        (Handedness::Left, HandJoint::ThumbDistal) => "mixamorigLeftHandThumb3",
        (Handedness::Left, HandJoint::IndexProximal) => "mixamorigLeftHandIndex1",
        (Handedness::Left, HandJoint::IndexIntermediate) => "mixamorigLeftHandIndex2",
        (Handedness::Left, HandJoint::IndexDistal) => "mixamorigLeftHandIndex3",
        (Handedness::Left, HandJoint::MiddleProximal) => "mixamorigLeftHandMiddle1",
        (Handedness::Left, HandJoint::MiddleIntermediate) => "mixamorigLeftHandMiddle2",
        (Handedness::Left, HandJoint::MiddleDistal) => "mixamorigLeftHandMiddle3",
        (Handedness::Left, HandJoint::RingProximal) => "mixamorigLeftHandRing1",
        (Handedness::Left, HandJoint::RingIntermediate) => "mixamorigLeftHandRing2",
        (Handedness::Left, HandJoint::RingDistal) => "mixamorigLeftHandRing3",
        (Handedness::Left, HandJoint::LittleProximal) => "mixamorigLeftHandPinky1",
        (Handedness::Left, HandJoint::LittleIntermediate) => "mixamorigLeftHandPinky2",
        (Handedness::Left, HandJoint::LittleDistal) => "mixamorigLeftHandPinky3",
        (Handedness::Right, HandJoint::Wrist) => "mixamorigRightHand",
        (Handedness::Right, HandJoint::ThumbProximal) => "mixamorigRightHandThumb1",
        (Handedness::Right, HandJoint::ThumbIntermediate) => "mixamorigRightHandThumb2",
        (Handedness::Right, HandJoint::ThumbDistal) => "mixamorigRightHandThumb3",
        (Handedness::Right, HandJoint::IndexProximal) => "mixamorigRightHandIndex1",
        (Handedness::Right, HandJoint::IndexIntermediate) => "mixamorigRightHandIndex2",
        (Handedness::Right, HandJoint::IndexDistal) => "mixamorigRightHandIndex3",
        (Handedness::Right, HandJoint::MiddleProximal) => "mixamorigRightHandMiddle1",
        (Handedness::Right, HandJoint::MiddleIntermediate) => "mixamorigRightHandMiddle2",
        (Handedness::Right, HandJoint::MiddleDistal) => "mixamorigRightHandMiddle3",
        (Handedness::Right, HandJoint::RingProximal) => "mixamorigRightHandRing1",
        (Handedness::Right, HandJoint::RingIntermediate) => "mixamorigRightHandRing2",
        (Handedness::Right, HandJoint::RingDistal) => "mixamorigRightHandRing3",
        (Handedness::Right, HandJoint::LittleProximal) => "mixamorigRightHandPinky1",
        (Handedness::Right, HandJoint::LittleIntermediate) => "mixamorigRightHandPinky2",
        (Handedness::Right, HandJoint::LittleDistal) => "mixamorigRightHandPinky3",
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::skeleton::mixamo_reference;

    #[test]
    fn test_axis_expr_eval() {
        let rot = EulerRotation::new(1.0, 2.0, -3.0);
        assert_eq!(Zero.eval(&rot), 0.0);
        assert_eq!(Take(X).eval(&rot), 1.0);
        assert_eq!(Negate(Y).eval(&rot), -2.0);
        assert_eq!(Scale(Z, 0.5).eval(&rot), -1.5);
        assert_eq!(Sum(&[Take(X), Negate(Z)]).eval(&rot), 4.0);
    }

    #[test]
    fn test_axis_expr_deterministic() {
        let rot = EulerRotation::new(0.123, -0.456, 0.789);
        let expr = Sum(&[Scale(X, 1.5), Negate(Y), Take(Z)]);
        assert_eq!(expr.eval(&rot), expr.eval(&rot));
    }

    #[test]
    fn test_body_mapping_lookup() {
        let mapping = body_mapping(BodyJoint::Hips).unwrap();
        assert_eq!(mapping.bone, "mixamorigHips");
        // 手首はボディテーブルには載っていない（ハンドマップ側）
        assert!(body_mapping(BodyJoint::LeftHand).is_none());
        assert!(body_mapping(BodyJoint::RightHand).is_none());
    }

    #[test]
    fn test_correct_applies_per_axis() {
        let mapping = body_mapping(BodyJoint::LeftUpperArm).unwrap();
        let rot = EulerRotation::new(0.1, 0.2, 0.3);
        let corrected = mapping.correct(&rot);
        assert!((corrected.x - 0.1).abs() < 1e-6);
        assert!((corrected.y - 0.2).abs() < 1e-6);
        assert!((corrected.z + 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_all_body_mappings_resolve_in_reference_rig() {
        let skeleton = mixamo_reference();
        for (joint, mapping) in BODY_MAPPINGS.iter() {
            assert!(
                skeleton.find(mapping.bone).is_some(),
                "bone {} for joint {:?} missing in reference rig",
                mapping.bone,
                joint
            );
        }
    }

    #[test]
    fn test_all_hand_names_resolve_in_reference_rig() {
        use HandJoint::*;
        let skeleton = mixamo_reference();
        let joints = [
            Wrist,
            ThumbProximal,
            ThumbIntermediate,
            ThumbDistal,
            IndexProximal,
            IndexIntermediate,
            IndexDistal,
            MiddleProximal,
            MiddleIntermediate,
            MiddleDistal,
            RingProximal,
            RingIntermediate,
            RingDistal,
            LittleProximal,
            LittleIntermediate,
            LittleDistal,
        ];
        for handedness in [Handedness::Left, Handedness::Right] {
            for joint in joints {
                let name = hand_bone_name(handedness, joint).unwrap();
                assert!(
                    skeleton.find(name).is_some(),
                    "bone {} missing in reference rig",
                    name
                );
            }
        }
    }
}

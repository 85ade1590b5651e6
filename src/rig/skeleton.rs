use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::solver::{quaternion_from_euler, EulerRotation, RotationOrder};

/// リグの単一ボーン
///
/// local_rotation は親に対するオイラー角。階層計算は XYZ 順で合成する。
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub parent: Option<usize>,
    pub local_position: Vector3<f32>,
    pub local_rotation: EulerRotation,
}

/// 名前付きボーン階層
///
/// ボーンはフラットな Vec に親インデックス付きで格納する。
/// 親は必ず子より前に追加されている前提。
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self { bones: Vec::new() }
    }

    pub fn add_bone(
        &mut self,
        name: &str,
        parent: Option<usize>,
        local_position: Vector3<f32>,
    ) -> usize {
        let index = self.bones.len();
        self.bones.push(Bone {
            name: name.to_string(),
            parent,
            local_position,
            local_rotation: EulerRotation::zero(),
        });
        index
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone(&self, index: usize) -> &Bone {
        &self.bones[index]
    }

    pub fn bone_mut(&mut self, index: usize) -> &mut Bone {
        &mut self.bones[index]
    }

    /// 名前でボーンを検索
    pub fn find(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// ルートからの累積変換
    pub fn world_transform(&self, index: usize) -> (UnitQuaternion<f32>, Point3<f32>) {
        let mut chain = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            chain.push(i);
            current = self.bones[i].parent;
        }

        let mut rotation = UnitQuaternion::identity();
        let mut position = Point3::origin();
        for &i in chain.iter().rev() {
            let bone = &self.bones[i];
            position += rotation * bone.local_position;
            rotation *= quaternion_from_euler(bone.local_rotation, RotationOrder::Xyz);
        }
        (rotation, position)
    }

    pub fn world_position(&self, index: usize) -> Point3<f32> {
        self.world_transform(index).1
    }
}

/// Mixamo 命名規則の標準リグ（Tポーズ、メートル単位のオフセット）
pub fn mixamo_reference() -> Skeleton {
    let mut s = Skeleton::new();

    let hips = s.add_bone("mixamorigHips", None, Vector3::new(0.0, 1.00, 0.0));
    let spine = s.add_bone("mixamorigSpine", Some(hips), Vector3::new(0.0, 0.10, 0.0));
    let spine1 = s.add_bone("mixamorigSpine1", Some(spine), Vector3::new(0.0, 0.12, 0.0));
    let spine2 = s.add_bone("mixamorigSpine2", Some(spine1), Vector3::new(0.0, 0.12, 0.0));
    let neck = s.add_bone("mixamorigNeck", Some(spine2), Vector3::new(0.0, 0.12, 0.0));
    s.add_bone("mixamorigHead", Some(neck), Vector3::new(0.0, 0.10, 0.0));

    for (side, sx) in [("Left", 1.0f32), ("Right", -1.0f32)] {
        let shoulder = s.add_bone(
            &format!("mixamorig{}Shoulder", side),
            Some(spine2),
            Vector3::new(sx * 0.07, 0.10, 0.0),
        );
        let arm = s.add_bone(
            &format!("mixamorig{}Arm", side),
            Some(shoulder),
            Vector3::new(sx * 0.12, 0.0, 0.0),
        );
        let forearm = s.add_bone(
            &format!("mixamorig{}ForeArm", side),
            Some(arm),
            Vector3::new(sx * 0.28, 0.0, 0.0),
        );
        let hand = s.add_bone(
            &format!("mixamorig{}Hand", side),
            Some(forearm),
            Vector3::new(sx * 0.27, 0.0, 0.0),
        );

        // 指: 親指のみ手のひら側にオフセット
        let fingers: [(&str, f32); 5] = [
            ("Thumb", 0.04),
            ("Index", 0.02),
            ("Middle", 0.0),
            ("Ring", -0.02),
            ("Pinky", -0.04),
        ];
        for (finger, dz) in fingers {
            let base = if finger == "Thumb" { 0.03 } else { 0.09 };
            let f1 = s.add_bone(
                &format!("mixamorig{}Hand{}1", side, finger),
                Some(hand),
                Vector3::new(sx * base, 0.0, dz),
            );
            let f2 = s.add_bone(
                &format!("mixamorig{}Hand{}2", side, finger),
                Some(f1),
                Vector3::new(sx * 0.035, 0.0, 0.0),
            );
            s.add_bone(
                &format!("mixamorig{}Hand{}3", side, finger),
                Some(f2),
                Vector3::new(sx * 0.03, 0.0, 0.0),
            );
        }

        let up_leg = s.add_bone(
            &format!("mixamorig{}UpLeg", side),
            Some(hips),
            Vector3::new(sx * 0.09, -0.05, 0.0),
        );
        let leg = s.add_bone(
            &format!("mixamorig{}Leg", side),
            Some(up_leg),
            Vector3::new(0.0, -0.42, 0.0),
        );
        let foot = s.add_bone(
            &format!("mixamorig{}Foot", side),
            Some(leg),
            Vector3::new(0.0, -0.40, 0.0),
        );
        s.add_bone(
            &format!("mixamorig{}ToeBase", side),
            Some(foot),
            Vector3::new(0.0, -0.07, 0.12),
        );
    }

    s
}

use nalgebra::Vector3;

use crate::landmark::{BodyLandmarkIndex, BodyLandmarks, Landmark};

use super::euler::EulerRotation;

/// ソルバーが出力する解剖学的ジョイント名
///
/// LeftHand / RightHand は手首の向き。指はハンドソルバー側。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyJoint {
    Hips,
    Spine,
    LeftUpperArm,
    LeftLowerArm,
    RightUpperArm,
    RightLowerArm,
    LeftUpperLeg,
    LeftLowerLeg,
    RightUpperLeg,
    RightLowerLeg,
    LeftHand,
    RightHand,
}

/// 1 フレーム分のボディジョイント回転
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyRotations {
    pub hips: EulerRotation,
    pub spine: EulerRotation,
    pub left_upper_arm: EulerRotation,
    pub left_lower_arm: EulerRotation,
    pub right_upper_arm: EulerRotation,
    pub right_lower_arm: EulerRotation,
    pub left_upper_leg: EulerRotation,
    pub left_lower_leg: EulerRotation,
    pub right_upper_leg: EulerRotation,
    pub right_lower_leg: EulerRotation,
    pub left_hand: EulerRotation,
    pub right_hand: EulerRotation,
}

impl BodyRotations {
    pub fn get(&self, joint: BodyJoint) -> EulerRotation {
        match joint {
            BodyJoint::Hips => self.hips,
            BodyJoint::Spine => self.spine,
            BodyJoint::LeftUpperArm => self.left_upper_arm,
            BodyJoint::LeftLowerArm => self.left_lower_arm,
            BodyJoint::RightUpperArm => self.right_upper_arm,
            BodyJoint::RightLowerArm => self.right_lower_arm,
            BodyJoint::LeftUpperLeg => self.left_upper_leg,
            BodyJoint::LeftLowerLeg => self.left_lower_leg,
            BodyJoint::RightUpperLeg => self.right_upper_leg,
            BodyJoint::RightLowerLeg => self.right_lower_leg,
            BodyJoint::LeftHand => self.left_hand,
            BodyJoint::RightHand => self.right_hand,
        }
    }
}

/// ランドマークの方向ベクトルからジョイント回転を解くソルバー
///
/// 単一フレームのヒューリスティック解法。可視度が閾値未満の
/// ランドマークに依存するジョイントはゼロ回転に退化する（エラーにはしない）。
pub struct BodySolver {
    min_visibility: f32,
}

impl BodySolver {
    pub fn new(min_visibility: f32) -> Self {
        Self { min_visibility }
    }

    pub fn solve(&self, body: &BodyLandmarks) -> BodyRotations {
        use BodyLandmarkIndex::*;

        let hips = self.solve_hips(body);
        let spine = self.solve_spine(body);

        // 腕: 上腕は絶対角、前腕は上腕に対する相対角（ヒンジ近似）
        let left_upper_arm = self.arm_segment(body, LeftShoulder, LeftElbow, 1.0);
        let left_lower_arm =
            relative(self.arm_segment(body, LeftElbow, LeftWrist, 1.0), left_upper_arm);
        let right_upper_arm = self.arm_segment(body, RightShoulder, RightElbow, -1.0);
        let right_lower_arm = relative(
            self.arm_segment(body, RightElbow, RightWrist, -1.0),
            right_upper_arm,
        );

        // 脚: 同様に大腿は絶対角、下腿は相対角
        let left_upper_leg = self.leg_segment(body, LeftHip, LeftKnee, 1.0);
        let left_lower_leg =
            relative(self.leg_segment(body, LeftKnee, LeftAnkle, 1.0), left_upper_leg);
        let right_upper_leg = self.leg_segment(body, RightHip, RightKnee, -1.0);
        let right_lower_leg = relative(
            self.leg_segment(body, RightKnee, RightAnkle, -1.0),
            right_upper_leg,
        );

        // 手首: 手首→人差し指根本の向き
        let left_hand = self.arm_segment(body, LeftWrist, LeftIndex, 1.0);
        let right_hand = self.arm_segment(body, RightWrist, RightIndex, -1.0);

        BodyRotations {
            hips,
            spine,
            left_upper_arm,
            left_lower_arm,
            right_upper_arm,
            right_lower_arm,
            left_upper_leg,
            left_lower_leg,
            right_upper_leg,
            right_lower_leg,
            left_hand,
            right_hand,
        }
    }

    /// 腰の回転: 左右ヒップのラインから yaw と roll を推定
    fn solve_hips(&self, body: &BodyLandmarks) -> EulerRotation {
        let lh = body.get(BodyLandmarkIndex::LeftHip);
        let rh = body.get(BodyLandmarkIndex::RightHip);
        if !self.visible(lh) || !self.visible(rh) {
            return EulerRotation::zero();
        }

        let d = delta(rh, lh);
        // 正面向き: d.x > 0, d.z ≈ 0 → yaw 0
        let yaw = f32::atan2(d.z, d.x);
        let roll = f32::atan2(-d.y, d.x);
        EulerRotation::new(0.0, yaw, roll)
    }

    /// 背骨の回転: 肩ラインと腰ラインの差分
    fn solve_spine(&self, body: &BodyLandmarks) -> EulerRotation {
        let ls = body.get(BodyLandmarkIndex::LeftShoulder);
        let rs = body.get(BodyLandmarkIndex::RightShoulder);
        let lh = body.get(BodyLandmarkIndex::LeftHip);
        let rh = body.get(BodyLandmarkIndex::RightHip);
        if !self.visible(ls) || !self.visible(rs) || !self.visible(lh) || !self.visible(rh) {
            return EulerRotation::zero();
        }

        let ds = delta(rs, ls);
        let dh = delta(rh, lh);

        // ねじれ: 肩ラインの yaw − 腰ラインの yaw
        let twist = f32::atan2(ds.z, ds.x) - f32::atan2(dh.z, dh.x);
        // 側屈: 肩ラインの roll − 腰ラインの roll
        let lean = f32::atan2(-ds.y, ds.x) - f32::atan2(-dh.y, dh.x);

        // 前屈: 肩中点が腰中点よりカメラ側にあると正
        let ms_y = (ls.y + rs.y) / 2.0;
        let ms_z = (ls.z + rs.z) / 2.0;
        let mh_y = (lh.y + rh.y) / 2.0;
        let mh_z = (lh.z + rh.z) / 2.0;
        let bend = f32::atan2(mh_z - ms_z, mh_y - ms_y);

        EulerRotation::new(bend, twist, lean)
    }

    /// 腕セグメントの回転（Tポーズ = 水平外向きが基準）
    ///
    /// side: 左 +1.0 / 右 -1.0。z は画像平面内の上下、y は前後。
    fn arm_segment(
        &self,
        body: &BodyLandmarks,
        from: BodyLandmarkIndex,
        to: BodyLandmarkIndex,
        side: f32,
    ) -> EulerRotation {
        let a = body.get(from);
        let b = body.get(to);
        if !self.visible(a) || !self.visible(b) {
            return EulerRotation::zero();
        }

        let d = delta(a, b);
        let z = f32::atan2(-d.y, side * d.x);
        let y = f32::atan2(-d.z, side * d.x);
        EulerRotation::new(0.0, y, z)
    }

    /// 脚セグメントの回転（直立 = 真下向きが基準）
    ///
    /// x は前後の蹴り出し、z は外転。
    fn leg_segment(
        &self,
        body: &BodyLandmarks,
        from: BodyLandmarkIndex,
        to: BodyLandmarkIndex,
        side: f32,
    ) -> EulerRotation {
        let a = body.get(from);
        let b = body.get(to);
        if !self.visible(a) || !self.visible(b) {
            return EulerRotation::zero();
        }

        let d = delta(a, b);
        let x = f32::atan2(-d.z, d.y);
        let z = f32::atan2(side * d.x, d.y);
        EulerRotation::new(x, 0.0, z)
    }

    fn visible(&self, lm: &Landmark) -> bool {
        lm.is_visible(self.min_visibility)
    }
}

impl Default for BodySolver {
    fn default() -> Self {
        Self::new(0.3)
    }
}

fn delta(a: &Landmark, b: &Landmark) -> Vector3<f32> {
    Vector3::new(b.x - a.x, b.y - a.y, b.z - a.z)
}

/// 親セグメントに対する相対回転
fn relative(child: EulerRotation, parent: EulerRotation) -> EulerRotation {
    EulerRotation::new(child.x - parent.x, child.y - parent.y, child.z - parent.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn set(body: &mut BodyLandmarks, index: BodyLandmarkIndex, x: f32, y: f32, z: f32) {
        body.landmarks[index as usize] = Landmark::new(x, y, z, 0.9);
    }

    /// 正面向きTポーズ（被写体の左側が画像右側に写る）
    fn t_pose() -> BodyLandmarks {
        use BodyLandmarkIndex::*;
        let mut body = BodyLandmarks::default();
        set(&mut body, LeftShoulder, 0.65, 0.30, 0.0);
        set(&mut body, RightShoulder, 0.35, 0.30, 0.0);
        set(&mut body, LeftElbow, 0.80, 0.30, 0.0);
        set(&mut body, RightElbow, 0.20, 0.30, 0.0);
        set(&mut body, LeftWrist, 0.95, 0.30, 0.0);
        set(&mut body, RightWrist, 0.05, 0.30, 0.0);
        set(&mut body, LeftIndex, 1.00, 0.30, 0.0);
        set(&mut body, RightIndex, 0.00, 0.30, 0.0);
        set(&mut body, LeftHip, 0.58, 0.55, 0.0);
        set(&mut body, RightHip, 0.42, 0.55, 0.0);
        set(&mut body, LeftKnee, 0.58, 0.75, 0.0);
        set(&mut body, RightKnee, 0.42, 0.75, 0.0);
        set(&mut body, LeftAnkle, 0.58, 0.95, 0.0);
        set(&mut body, RightAnkle, 0.42, 0.95, 0.0);
        body
    }

    fn assert_near_zero(rot: EulerRotation, name: &str) {
        assert!(
            rot.x.abs() < 0.05 && rot.y.abs() < 0.05 && rot.z.abs() < 0.05,
            "{} should be near zero, got ({}, {}, {})",
            name,
            rot.x,
            rot.y,
            rot.z
        );
    }

    #[test]
    fn test_t_pose_solves_near_zero() {
        let solver = BodySolver::default();
        let rotations = solver.solve(&t_pose());

        assert_near_zero(rotations.hips, "hips");
        assert_near_zero(rotations.spine, "spine");
        assert_near_zero(rotations.left_upper_arm, "left_upper_arm");
        assert_near_zero(rotations.right_upper_arm, "right_upper_arm");
        assert_near_zero(rotations.left_upper_leg, "left_upper_leg");
        assert_near_zero(rotations.right_upper_leg, "right_upper_leg");
    }

    #[test]
    fn test_arm_hanging_down() {
        use BodyLandmarkIndex::*;
        let mut body = t_pose();
        set(&mut body, LeftElbow, 0.65, 0.45, 0.0);
        set(&mut body, LeftWrist, 0.65, 0.60, 0.0);
        set(&mut body, LeftIndex, 0.65, 0.65, 0.0);

        let rotations = BodySolver::default().solve(&body);
        assert!(
            (rotations.left_upper_arm.z + FRAC_PI_2).abs() < 0.05,
            "arm down should give z ≈ -π/2, got {}",
            rotations.left_upper_arm.z
        );
        // 前腕はまっすぐなので相対角ゼロ
        assert_near_zero(rotations.left_lower_arm, "left_lower_arm");
    }

    #[test]
    fn test_elbow_bend_relative() {
        use BodyLandmarkIndex::*;
        let mut body = t_pose();
        // 上腕は水平のまま、前腕を真上に曲げる
        set(&mut body, LeftWrist, 0.80, 0.15, 0.0);

        let rotations = BodySolver::default().solve(&body);
        assert_near_zero(rotations.left_upper_arm, "left_upper_arm");
        assert!(
            (rotations.left_lower_arm.z - FRAC_PI_2).abs() < 0.05,
            "bent forearm should give relative z ≈ π/2, got {}",
            rotations.left_lower_arm.z
        );
    }

    #[test]
    fn test_leg_kick_forward() {
        use BodyLandmarkIndex::*;
        let mut body = t_pose();
        // 膝をカメラ側に出す
        set(&mut body, LeftKnee, 0.58, 0.70, -0.15);

        let rotations = BodySolver::default().solve(&body);
        assert!(
            rotations.left_upper_leg.x > 0.1,
            "forward kick should give positive x, got {}",
            rotations.left_upper_leg.x
        );
    }

    #[test]
    fn test_hip_turn() {
        use BodyLandmarkIndex::*;
        let mut body = t_pose();
        // 左に回る: 左ヒップが奥、右ヒップが手前
        set(&mut body, LeftHip, 0.56, 0.55, 0.08);
        set(&mut body, RightHip, 0.44, 0.55, -0.08);

        let rotations = BodySolver::default().solve(&body);
        assert!(
            rotations.hips.y > 0.1,
            "turning should give positive yaw, got {}",
            rotations.hips.y
        );
    }

    #[test]
    fn test_low_visibility_degrades_to_zero() {
        use BodyLandmarkIndex::*;
        let mut body = t_pose();
        body.landmarks[LeftElbow as usize].visibility = 0.1;

        let rotations = BodySolver::default().solve(&body);
        assert_eq!(rotations.left_upper_arm, EulerRotation::zero());
        assert_eq!(rotations.left_lower_arm, EulerRotation::zero());
        // 反対側の腕には影響しない
        assert_near_zero(rotations.right_upper_arm, "right_upper_arm");
    }

    #[test]
    fn test_deterministic_repeat() {
        let solver = BodySolver::default();
        let body = t_pose();
        let a = solver.solve(&body);
        let b = solver.solve(&body);
        assert_eq!(a.left_upper_arm, b.left_upper_arm);
        assert_eq!(a.hips, b.hips);
        assert_eq!(a.spine, b.spine);
    }
}

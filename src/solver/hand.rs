use nalgebra::Vector3;

use crate::landmark::{HandDetection, HandLandmarkIndex, HandLandmarks, Handedness, Landmark};

use super::euler::EulerRotation;

/// ハンドソルバーが出力するジョイント名（片手分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandJoint {
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
}

/// 1 フレーム分の片手ジョイント回転
#[derive(Debug, Clone, Copy, Default)]
pub struct HandRotations {
    pub wrist: EulerRotation,
    pub thumb_proximal: EulerRotation,
    pub thumb_intermediate: EulerRotation,
    pub thumb_distal: EulerRotation,
    pub index_proximal: EulerRotation,
    pub index_intermediate: EulerRotation,
    pub index_distal: EulerRotation,
    pub middle_proximal: EulerRotation,
    pub middle_intermediate: EulerRotation,
    pub middle_distal: EulerRotation,
    pub ring_proximal: EulerRotation,
    pub ring_intermediate: EulerRotation,
    pub ring_distal: EulerRotation,
    pub little_proximal: EulerRotation,
    pub little_intermediate: EulerRotation,
    pub little_distal: EulerRotation,
}

impl HandRotations {
    pub fn get(&self, joint: HandJoint) -> EulerRotation {
        match joint {
            HandJoint::Wrist => self.wrist,
            HandJoint::ThumbProximal => self.thumb_proximal,
            HandJoint::ThumbIntermediate => self.thumb_intermediate,
            HandJoint::ThumbDistal => self.thumb_distal,
            HandJoint::IndexProximal => self.index_proximal,
            HandJoint::IndexIntermediate => self.index_intermediate,
            HandJoint::IndexDistal => self.index_distal,
            HandJoint::MiddleProximal => self.middle_proximal,
            HandJoint::MiddleIntermediate => self.middle_intermediate,
            HandJoint::MiddleDistal => self.middle_distal,
            HandJoint::RingProximal => self.ring_proximal,
            HandJoint::RingIntermediate => self.ring_intermediate,
            HandJoint::RingDistal => self.ring_distal,
            HandJoint::LittleProximal => self.little_proximal,
            HandJoint::LittleIntermediate => self.little_intermediate,
            HandJoint::LittleDistal => self.little_distal,
        }
    }
}

/// 左右割り当て済みのハンドランドマークペア
#[derive(Debug, Clone)]
pub struct HandPair {
    pub left: HandLandmarks,
    pub right: HandLandmarks,
}

/// 検出結果から左右の手を割り当てる
///
/// 2 件未満なら None（ハンドトラック全体をスキップ、ボディ処理は継続）。
/// 最高スコアの検出が自分の分類側を取り、残りが反対側になる。
/// 両方が同じ側に分類された場合もこのルールのまま（フレーム間の平均化はしない）。
pub fn assign_hands(hands: &[HandDetection]) -> Option<HandPair> {
    if hands.len() < 2 {
        log::warn!("Not enough hands detected: {}", hands.len());
        return None;
    }

    // 先頭 2 件が対象（検出器側で num_hands 上限済み）
    let top = if hands[0].score >= hands[1].score { 0 } else { 1 };
    let other = 1 - top;

    let (left_index, right_index) = match hands[top].handedness {
        Handedness::Left => (top, other),
        Handedness::Right => (other, top),
    };

    if hands[0].handedness == hands[1].handedness {
        log::debug!(
            "Both hands classified as {:?}; assigned by top confidence",
            hands[top].handedness
        );
    }

    Some(HandPair {
        left: hands[left_index].landmarks.clone(),
        right: hands[right_index].landmarks.clone(),
    })
}

/// 片手のランドマークからジョイント回転を解く
///
/// 手首は手のひらフレーム（手首・人差し指根本・小指根本）から、
/// 各指は隣接する指節セグメント間の屈曲角から求める。
/// 屈曲は Z 軸回り、左手は負方向・右手は正方向。
pub fn solve_hand(hand: &HandLandmarks, handedness: Handedness) -> HandRotations {
    use HandLandmarkIndex::*;

    let side = match handedness {
        Handedness::Left => 1.0,
        Handedness::Right => -1.0,
    };
    let curl_sign = match handedness {
        Handedness::Left => -1.0,
        Handedness::Right => 1.0,
    };

    let wrist = solve_wrist(hand, side);

    let thumb = finger_curls(hand, [Wrist, ThumbCmc, ThumbMcp, ThumbIp, ThumbTip], curl_sign);
    let index = finger_curls(hand, [Wrist, IndexMcp, IndexPip, IndexDip, IndexTip], curl_sign);
    let middle = finger_curls(
        hand,
        [Wrist, MiddleMcp, MiddlePip, MiddleDip, MiddleTip],
        curl_sign,
    );
    let ring = finger_curls(hand, [Wrist, RingMcp, RingPip, RingDip, RingTip], curl_sign);
    let little = finger_curls(hand, [Wrist, PinkyMcp, PinkyPip, PinkyDip, PinkyTip], curl_sign);

    HandRotations {
        wrist,
        thumb_proximal: thumb[0],
        thumb_intermediate: thumb[1],
        thumb_distal: thumb[2],
        index_proximal: index[0],
        index_intermediate: index[1],
        index_distal: index[2],
        middle_proximal: middle[0],
        middle_intermediate: middle[1],
        middle_distal: middle[2],
        ring_proximal: ring[0],
        ring_intermediate: ring[1],
        ring_distal: ring[2],
        little_proximal: little[0],
        little_intermediate: little[1],
        little_distal: little[2],
    }
}

fn solve_wrist(hand: &HandLandmarks, side: f32) -> EulerRotation {
    use HandLandmarkIndex::*;

    let wrist = hand.get(Wrist);
    let index_mcp = hand.get(IndexMcp);
    let pinky_mcp = hand.get(PinkyMcp);
    let middle_mcp = hand.get(MiddleMcp);

    let d = delta(wrist, middle_mcp);
    let z = f32::atan2(-d.y, side * d.x);
    let y = f32::atan2(-d.z, side * d.x);

    // 手のひら法線から回内・回外を推定
    // 手のひらがカメラを向いているとき x = 0
    let v1 = delta(wrist, index_mcp);
    let v2 = delta(wrist, pinky_mcp);
    let n = v1.cross(&v2) * side;
    let x = if n.norm() > 1e-8 {
        f32::atan2(n.y, -n.z)
    } else {
        0.0
    };

    EulerRotation::new(x, y, z)
}

/// 5 点チェーンから proximal / intermediate / distal の屈曲角を求める
///
/// 各関節の角度は前後セグメントの成す角。伸びた指は 0。
fn finger_curls(
    hand: &HandLandmarks,
    chain: [HandLandmarkIndex; 5],
    curl_sign: f32,
) -> [EulerRotation; 3] {
    let mut curls = [EulerRotation::zero(); 3];
    for joint in 0..3 {
        let a = hand.get(chain[joint]);
        let b = hand.get(chain[joint + 1]);
        let c = hand.get(chain[joint + 2]);
        let angle = bend_angle(a, b, c);
        curls[joint] = EulerRotation::new(0.0, 0.0, curl_sign * angle);
    }
    curls
}

/// b を頂点とする屈曲角（ラジアン、0 = まっすぐ）
fn bend_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f32 {
    let v1 = delta(a, b);
    let v2 = delta(b, c);
    let n1 = v1.norm();
    let n2 = v2.norm();
    if n1 < 1e-8 || n2 < 1e-8 {
        return 0.0;
    }
    let cos = (v1.dot(&v2) / (n1 * n2)).clamp(-1.0, 1.0);
    cos.acos()
}

fn delta(a: &Landmark, b: &Landmark) -> Vector3<f32> {
    Vector3::new(b.x - a.x, b.y - a.y, b.z - a.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(hand: &mut HandLandmarks, index: HandLandmarkIndex, x: f32, y: f32) {
        hand.landmarks[index as usize] = Landmark::new(x, y, 0.0, 1.0);
    }

    /// 指を上に伸ばした左手（画像平面内、手のひらはカメラ向き）
    fn flat_hand() -> HandLandmarks {
        use HandLandmarkIndex::*;
        let mut hand = HandLandmarks::default();
        set(&mut hand, Wrist, 0.50, 0.90);

        // 中指は手首の真上に一直線
        set(&mut hand, MiddleMcp, 0.50, 0.70);
        set(&mut hand, MiddlePip, 0.50, 0.62);
        set(&mut hand, MiddleDip, 0.50, 0.54);
        set(&mut hand, MiddleTip, 0.50, 0.46);

        set(&mut hand, IndexMcp, 0.55, 0.70);
        set(&mut hand, IndexPip, 0.55, 0.62);
        set(&mut hand, IndexDip, 0.55, 0.54);
        set(&mut hand, IndexTip, 0.55, 0.46);

        set(&mut hand, RingMcp, 0.45, 0.70);
        set(&mut hand, RingPip, 0.45, 0.62);
        set(&mut hand, RingDip, 0.45, 0.54);
        set(&mut hand, RingTip, 0.45, 0.46);

        set(&mut hand, PinkyMcp, 0.40, 0.71);
        set(&mut hand, PinkyPip, 0.40, 0.64);
        set(&mut hand, PinkyDip, 0.40, 0.57);
        set(&mut hand, PinkyTip, 0.40, 0.50);

        set(&mut hand, ThumbCmc, 0.57, 0.84);
        set(&mut hand, ThumbMcp, 0.60, 0.78);
        set(&mut hand, ThumbIp, 0.63, 0.72);
        set(&mut hand, ThumbTip, 0.66, 0.66);
        hand
    }

    /// wrist_x で個体を区別できる検出結果を作る
    fn detection(handedness: Handedness, score: f32, wrist_x: f32) -> HandDetection {
        let mut landmarks = flat_hand();
        landmarks.landmarks[HandLandmarkIndex::Wrist as usize].x = wrist_x;
        HandDetection {
            handedness,
            score,
            landmarks,
        }
    }

    #[test]
    fn test_straight_fingers_no_curl() {
        let rotations = solve_hand(&flat_hand(), Handedness::Left);
        // 中指チェーンは完全に一直線
        assert!(rotations.middle_proximal.z.abs() < 1e-4);
        assert!(rotations.middle_intermediate.z.abs() < 1e-4);
        assert!(rotations.middle_distal.z.abs() < 1e-4);
        // 他の指も手首からほぼ一直線
        assert!(rotations.index_intermediate.z.abs() < 0.2);
        assert!(rotations.ring_distal.z.abs() < 0.2);
    }

    #[test]
    fn test_bent_finger_curls() {
        use HandLandmarkIndex::*;
        let mut hand = flat_hand();
        // 人差し指の第2関節から先を横に折る
        set(&mut hand, IndexDip, 0.60, 0.60);
        set(&mut hand, IndexTip, 0.65, 0.60);

        let rotations = solve_hand(&hand, Handedness::Left);
        assert!(
            rotations.index_intermediate.z < -1.0,
            "left-hand curl should be negative z, got {}",
            rotations.index_intermediate.z
        );
    }

    #[test]
    fn test_curl_sign_flips_by_handedness() {
        use HandLandmarkIndex::*;
        let mut hand = flat_hand();
        set(&mut hand, IndexDip, 0.60, 0.60);
        set(&mut hand, IndexTip, 0.65, 0.60);

        let left = solve_hand(&hand, Handedness::Left);
        let right = solve_hand(&hand, Handedness::Right);
        assert!(left.index_intermediate.z < 0.0);
        assert!(right.index_intermediate.z > 0.0);
        assert!(
            (left.index_intermediate.z + right.index_intermediate.z).abs() < 1e-6,
            "curl magnitude should match across handedness"
        );
    }

    #[test]
    fn test_wrist_neutral_for_flat_palm() {
        let rotations = solve_hand(&flat_hand(), Handedness::Left);
        // 画像平面内の手のひらは回内ゼロ
        assert!(rotations.wrist.x.abs() < 0.05);
    }

    fn wrist_x(hand: &HandLandmarks) -> f32 {
        hand.landmarks[HandLandmarkIndex::Wrist as usize].x
    }

    #[test]
    fn test_assign_hands_too_few() {
        assert!(assign_hands(&[]).is_none());
        assert!(assign_hands(&[detection(Handedness::Left, 0.9, 0.5)]).is_none());
    }

    #[test]
    fn test_assign_hands_top_confidence_wins() {
        let hands = vec![
            detection(Handedness::Left, 0.6, 0.3),
            detection(Handedness::Right, 0.9, 0.7),
        ];
        // 最高スコアが Right → index 1 が右、index 0 が左
        let pair = assign_hands(&hands).unwrap();
        assert_eq!(wrist_x(&pair.right), 0.7);
        assert_eq!(wrist_x(&pair.left), 0.3);
    }

    #[test]
    fn test_assign_hands_same_side_classification() {
        // 両方 Left と分類されても、最高スコアが Left を取り残りは Right
        let hands = vec![
            detection(Handedness::Left, 0.7, 0.3),
            detection(Handedness::Left, 0.95, 0.7),
        ];
        let pair = assign_hands(&hands).unwrap();
        assert_eq!(wrist_x(&pair.left), 0.7);
        assert_eq!(wrist_x(&pair.right), 0.3);
    }
}

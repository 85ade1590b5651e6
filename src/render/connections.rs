use crate::landmark::{BodyLandmarkIndex, HandLandmarkIndex};

/// ボディ骨格の接続定義 (開始ランドマーク, 終了ランドマーク)
pub const BODY_CONNECTIONS: [(BodyLandmarkIndex, BodyLandmarkIndex); 16] = [
    // 上半身
    (BodyLandmarkIndex::LeftShoulder, BodyLandmarkIndex::RightShoulder),
    (BodyLandmarkIndex::LeftShoulder, BodyLandmarkIndex::LeftElbow),
    (BodyLandmarkIndex::LeftElbow, BodyLandmarkIndex::LeftWrist),
    (BodyLandmarkIndex::RightShoulder, BodyLandmarkIndex::RightElbow),
    (BodyLandmarkIndex::RightElbow, BodyLandmarkIndex::RightWrist),
    (BodyLandmarkIndex::LeftWrist, BodyLandmarkIndex::LeftIndex),
    (BodyLandmarkIndex::RightWrist, BodyLandmarkIndex::RightIndex),
    // 胴体
    (BodyLandmarkIndex::LeftShoulder, BodyLandmarkIndex::LeftHip),
    (BodyLandmarkIndex::RightShoulder, BodyLandmarkIndex::RightHip),
    (BodyLandmarkIndex::LeftHip, BodyLandmarkIndex::RightHip),
    // 下半身
    (BodyLandmarkIndex::LeftHip, BodyLandmarkIndex::LeftKnee),
    (BodyLandmarkIndex::LeftKnee, BodyLandmarkIndex::LeftAnkle),
    (BodyLandmarkIndex::RightHip, BodyLandmarkIndex::RightKnee),
    (BodyLandmarkIndex::RightKnee, BodyLandmarkIndex::RightAnkle),
    (BodyLandmarkIndex::LeftAnkle, BodyLandmarkIndex::LeftFootIndex),
    (BodyLandmarkIndex::RightAnkle, BodyLandmarkIndex::RightFootIndex),
];

/// ハンド骨格の接続定義（手首から各指チェーン）
pub const HAND_CONNECTIONS: [(HandLandmarkIndex, HandLandmarkIndex); 20] = [
    (HandLandmarkIndex::Wrist, HandLandmarkIndex::ThumbCmc),
    (HandLandmarkIndex::ThumbCmc, HandLandmarkIndex::ThumbMcp),
    (HandLandmarkIndex::ThumbMcp, HandLandmarkIndex::ThumbIp),
    (HandLandmarkIndex::ThumbIp, HandLandmarkIndex::ThumbTip),
    (HandLandmarkIndex::Wrist, HandLandmarkIndex::IndexMcp),
    (HandLandmarkIndex::IndexMcp, HandLandmarkIndex::IndexPip),
    (HandLandmarkIndex::IndexPip, HandLandmarkIndex::IndexDip),
    (HandLandmarkIndex::IndexDip, HandLandmarkIndex::IndexTip),
    (HandLandmarkIndex::Wrist, HandLandmarkIndex::MiddleMcp),
    (HandLandmarkIndex::MiddleMcp, HandLandmarkIndex::MiddlePip),
    (HandLandmarkIndex::MiddlePip, HandLandmarkIndex::MiddleDip),
    (HandLandmarkIndex::MiddleDip, HandLandmarkIndex::MiddleTip),
    (HandLandmarkIndex::Wrist, HandLandmarkIndex::RingMcp),
    (HandLandmarkIndex::RingMcp, HandLandmarkIndex::RingPip),
    (HandLandmarkIndex::RingPip, HandLandmarkIndex::RingDip),
    (HandLandmarkIndex::RingDip, HandLandmarkIndex::RingTip),
    (HandLandmarkIndex::Wrist, HandLandmarkIndex::PinkyMcp),
    (HandLandmarkIndex::PinkyMcp, HandLandmarkIndex::PinkyPip),
    (HandLandmarkIndex::PinkyPip, HandLandmarkIndex::PinkyDip),
    (HandLandmarkIndex::PinkyDip, HandLandmarkIndex::PinkyTip),
];

/// ランドマークの色 (RGB)
pub const LANDMARK_COLOR: u32 = 0x00FF00; // 緑

/// 骨格線の色 (RGB)
pub const CONNECTION_COLOR: u32 = 0xFFFF00; // 黄色

/// 可視度が低いランドマークの色 (RGB)
pub const LOW_VISIBILITY_COLOR: u32 = 0xFF0000; // 赤

/// ハンド骨格線の色 (RGB)
pub const HAND_COLOR: u32 = 0x00FFFF; // シアン

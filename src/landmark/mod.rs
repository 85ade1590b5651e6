#[cfg(feature = "desktop")]
pub mod detector;
#[cfg(feature = "desktop")]
pub mod extractor;
pub mod keypoint;
#[cfg(feature = "desktop")]
pub mod preprocess;

#[cfg(feature = "desktop")]
pub use detector::{HandLandmarker, PoseLandmarker, HAND_INPUT_SIZE, POSE_INPUT_SIZE};
#[cfg(feature = "desktop")]
pub use extractor::LandmarkExtractor;
pub use keypoint::{
    BodyLandmarkIndex, BodyLandmarks, ExtractionResult, HandDetection, HandLandmarkIndex,
    HandLandmarks, Handedness, Landmark,
};
#[cfg(feature = "desktop")]
pub use preprocess::preprocess;

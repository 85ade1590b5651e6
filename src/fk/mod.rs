pub mod controller;
pub mod marker;
pub mod ray;

pub use controller::{ClickOutcome, FkController, FkState, RotateGizmo};
pub use marker::{BoneMarker, SkeletonOverlay, DIMMED_OPACITY, FULL_OPACITY};
pub use ray::Ray;

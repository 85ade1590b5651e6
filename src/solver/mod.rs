pub mod body;
pub mod euler;
pub mod hand;

pub use body::{BodyJoint, BodyRotations, BodySolver};
pub use euler::{quaternion_from_euler, Axis, EulerRotation, RotationOrder};
pub use hand::{assign_hands, solve_hand, HandJoint, HandPair, HandRotations};

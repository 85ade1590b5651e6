pub mod mapping;
pub mod skeleton;

pub use mapping::{body_mapping, hand_bone_name, AxisExpr, BoneMapping, BODY_MAPPINGS};
pub use skeleton::{mixamo_reference, Bone, Skeleton};

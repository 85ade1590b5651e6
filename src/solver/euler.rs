use nalgebra::{UnitQuaternion, Vector3};

/// ソルバー空間のオイラー回転（ラジアン）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerRotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl std::ops::Add for EulerRotation {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

/// 回転軸
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// オイラー角の合成順序（内因性）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub fn axes(&self) -> [Axis; 3] {
        match self {
            Self::Xyz => [Axis::X, Axis::Y, Axis::Z],
            Self::Xzy => [Axis::X, Axis::Z, Axis::Y],
            Self::Yxz => [Axis::Y, Axis::X, Axis::Z],
            Self::Yzx => [Axis::Y, Axis::Z, Axis::X],
            Self::Zxy => [Axis::Z, Axis::X, Axis::Y],
            Self::Zyx => [Axis::Z, Axis::Y, Axis::X],
        }
    }
}

/// オイラー角からクォータニオンを生成
///
/// 指定された順序で軸回転を右から合成する（XYZ なら q = qx * qy * qz）。
/// 同一入力に対してビット単位で同一の結果を返す。
pub fn quaternion_from_euler(rotation: EulerRotation, order: RotationOrder) -> UnitQuaternion<f32> {
    let mut q = UnitQuaternion::identity();
    for axis in order.axes() {
        let step = match axis {
            Axis::X => UnitQuaternion::from_axis_angle(&Vector3::x_axis(), rotation.x),
            Axis::Y => UnitQuaternion::from_axis_angle(&Vector3::y_axis(), rotation.y),
            Axis::Z => UnitQuaternion::from_axis_angle(&Vector3::z_axis(), rotation.z),
        };
        q *= step;
    }
    q
}

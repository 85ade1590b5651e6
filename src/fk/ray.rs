use nalgebra::{Point3, Unit, Vector3};

/// Picking ray in world space.
#[derive(Debug, Clone)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    /// Nearest positive hit distance against a sphere, if any.
    ///
    /// Standard quadratic form with a unit direction: t^2 + 2bt + c = 0.
    pub fn intersect_sphere(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(&self.direction);
        let c = oc.norm_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = -b - sqrt_d;
        if t > 1e-6 {
            return Some(t);
        }
        // Origin inside the sphere: take the exit point.
        let t = -b + sqrt_d;
        if t > 1e-6 {
            return Some(t);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_straight_on() {
        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        let t = ray.intersect_sphere(&Point3::origin(), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5, "expected t=4, got {}", t);
    }

    #[test]
    fn test_miss() {
        let ray = Ray::new(Point3::new(0.0, 3.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(&Point3::origin(), 1.0).is_none());
    }

    #[test]
    fn test_behind_origin_misses() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(&Point3::origin(), 1.0).is_none());
    }

    #[test]
    fn test_origin_inside_sphere_hits_exit() {
        let ray = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
        let t = ray.intersect_sphere(&Point3::origin(), 2.0).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_grazing_tangent() {
        let ray = Ray::new(Point3::new(0.0, 1.0, -5.0), Vector3::new(0.0, 0.0, 1.0));
        // Tangent ray: discriminant ~ 0, single touch point.
        let t = ray.intersect_sphere(&Point3::origin(), 1.0);
        assert!(t.is_some());
    }
}

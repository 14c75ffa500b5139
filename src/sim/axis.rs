//! The two horizontal motion axes
//!
//! Layers slide along X or Z and alternate every successful turn.

use glam::Vec3;

/// Horizontal axis a layer slides along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The axis the next layer slides along
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Component of `v` along this axis
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.z,
        }
    }

    /// Overwrite the component of `v` along this axis
    pub fn set_component(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Z => v.z = value,
        }
    }

    /// Unit vector along this axis
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_alternates() {
        assert_eq!(Axis::X.other(), Axis::Z);
        assert_eq!(Axis::Z.other(), Axis::X);
        assert_eq!(Axis::X.other().other(), Axis::X);
    }

    #[test]
    fn test_component_access() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::X.component(v), 1.0);
        assert_eq!(Axis::Z.component(v), 3.0);
    }

    #[test]
    fn test_set_component_leaves_others() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        Axis::Z.set_component(&mut v, 9.0);
        assert_eq!(v, Vec3::new(1.0, 2.0, 9.0));
        Axis::X.set_component(&mut v, -4.0);
        assert_eq!(v, Vec3::new(-4.0, 2.0, 9.0));
    }

    #[test]
    fn test_unit_vectors() {
        assert_eq!(Axis::X.unit(), Vec3::X);
        assert_eq!(Axis::Z.unit(), Vec3::Z);
    }
}

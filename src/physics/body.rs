//! Rigid bodies and box collision shapes

use glam::{Quat, Vec3};

/// Axis-aligned box shape built from half-extents.
///
/// Shapes are immutable once constructed; resizing a body means building
/// a new shape and swapping it in with [`RigidBody::replace_shape`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShape {
    half_extents: Vec3,
}

impl BoxShape {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }

    /// Build a shape from full box dimensions
    pub fn from_dims(dims: Vec3) -> Self {
        Self::new(dims / 2.0)
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

/// A rigid body: a box shape plus mass and motion state.
///
/// Mass 0 marks a kinematic body: the script moves it and gravity does not.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub mass: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub orientation: Quat,
    shape: BoxShape,
}

impl RigidBody {
    pub fn new(mass: f32, position: Vec3, shape: BoxShape) -> Self {
        Self {
            mass,
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            shape,
        }
    }

    pub fn shape(&self) -> &BoxShape {
        &self.shape
    }

    /// Swap in a freshly sized shape (shapes cannot be resized in place)
    pub fn replace_shape(&mut self, shape: BoxShape) {
        self.shape = shape;
    }

    pub fn is_kinematic(&self) -> bool {
        self.mass == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_from_dims() {
        let shape = BoxShape::from_dims(Vec3::new(2.0, 0.5, 1.0));
        assert_eq!(shape.half_extents(), Vec3::new(1.0, 0.25, 0.5));
    }

    #[test]
    fn test_replace_shape() {
        let mut body = RigidBody::new(5.0, Vec3::ZERO, BoxShape::from_dims(Vec3::splat(2.0)));
        body.replace_shape(BoxShape::from_dims(Vec3::new(1.5, 0.5, 2.0)));
        assert_eq!(body.shape().half_extents(), Vec3::new(0.75, 0.25, 1.0));
    }

    #[test]
    fn test_kinematic_flag() {
        let shape = BoxShape::from_dims(Vec3::ONE);
        assert!(RigidBody::new(0.0, Vec3::ZERO, shape).is_kinematic());
        assert!(!RigidBody::new(5.0, Vec3::ZERO, shape).is_kinematic());
    }
}

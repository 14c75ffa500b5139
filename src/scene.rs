//! Retained scene data consumed by the renderer
//!
//! The simulation addresses visuals through [`VisualHandle`]s and mutates
//! their position/scale directly; the renderer reads the scene each frame.
//! Boxes are never removed: placed layers and fallen off-cuts accumulate
//! for the whole session.

use glam::{Quat, Vec3};

/// Handle to a box in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualHandle(usize);

/// A rendered box
#[derive(Debug, Clone)]
pub struct BoxVisual {
    /// World-space center
    pub position: Vec3,
    /// Geometry dimensions at creation (width, height, depth)
    pub dims: Vec3,
    /// Scale applied on top of `dims`; a cut shrinks one component
    pub scale: Vec3,
    /// Orientation (identity for layers, physics-driven for off-cuts)
    pub rotation: Quat,
    /// Linear RGB
    pub color: [f32; 3],
}

/// All boxes of one session
#[derive(Debug, Default)]
pub struct Scene {
    boxes: Vec<BoxVisual>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a box and return its handle
    pub fn add_box(&mut self, position: Vec3, dims: Vec3, color: [f32; 3]) -> VisualHandle {
        self.boxes.push(BoxVisual {
            position,
            dims,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
            color,
        });
        VisualHandle(self.boxes.len() - 1)
    }

    pub fn get(&self, handle: VisualHandle) -> &BoxVisual {
        &self.boxes[handle.0]
    }

    pub fn get_mut(&mut self, handle: VisualHandle) -> &mut BoxVisual {
        &mut self.boxes[handle.0]
    }

    pub fn boxes(&self) -> &[BoxVisual] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Hue of the `n`-th layer in degrees: a slow ramp starting at orange
pub fn layer_hue(layer_index: usize) -> f32 {
    30.0 + layer_index as f32 * 4.0
}

/// Color of the `n`-th layer, `hsl(30 + 4n, 100%, 50%)`
pub fn layer_color(layer_index: usize) -> [f32; 3] {
    hsl_to_rgb(layer_hue(layer_index), 1.0, 0.5)
}

/// CSS color string for the `n`-th layer hue, for tinting the HUD text
pub fn layer_hue_css(layer_index: usize) -> String {
    format!("hsl({}, 100%, 50%)", layer_hue(layer_index))
}

/// Convert HSL (hue in degrees, saturation/lightness in [0,1]) to RGB
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb_eq(actual: [f32; 3], expected: [f32; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 0.001, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_hsl_primaries() {
        assert_rgb_eq(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]);
        assert_rgb_eq(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hsl_grays() {
        assert_rgb_eq(hsl_to_rgb(123.0, 0.0, 0.5), [0.5, 0.5, 0.5]);
        assert_rgb_eq(hsl_to_rgb(0.0, 1.0, 1.0), [1.0, 1.0, 1.0]);
        assert_rgb_eq(hsl_to_rgb(0.0, 1.0, 0.0), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_layer_color_ramp() {
        // Layer 0 sits at hue 30 (orange), full saturation
        assert_rgb_eq(layer_color(0), [1.0, 0.5, 0.0]);
        // Hue advances 4 degrees per layer
        assert!((layer_hue(10) - 70.0).abs() < 0.001);
        assert_eq!(layer_hue_css(0), "hsl(30, 100%, 50%)");
    }

    #[test]
    fn test_scene_handles() {
        let mut scene = Scene::new();
        let a = scene.add_box(Vec3::ZERO, Vec3::ONE, [1.0, 0.0, 0.0]);
        let b = scene.add_box(Vec3::X, Vec3::ONE, [0.0, 1.0, 0.0]);
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        scene.get_mut(a).position.y = 3.0;
        assert_eq!(scene.get(a).position.y, 3.0);
        assert_eq!(scene.get(b).position, Vec3::X);
        assert_eq!(scene.get(a).scale, Vec3::ONE);
    }
}

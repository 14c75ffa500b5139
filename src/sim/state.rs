//! Session state: the stack, the off-cut registry and the score

use glam::Vec3;

use super::axis::Axis;
use crate::consts::*;
use crate::physics::{BodyHandle, BoxShape, RigidBody, World};
use crate::scene::{self, Scene, VisualHandle};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first input
    NotStarted,
    /// Blocks sliding, turns being resolved
    Running,
    /// A drop missed the stack; terminal until the host reloads
    Ended,
}

/// A placed or sliding layer.
///
/// Pairs the visual box with its rigid body. Width/depth are mutated in
/// place when the layer is cut; layers stay on the stack forever.
#[derive(Debug, Clone)]
pub struct Block {
    pub width: f32,
    pub depth: f32,
    pub axis: Axis,
    pub visual: VisualHandle,
    pub body: BodyHandle,
}

impl Block {
    /// Extent along the motion axis
    pub fn extent(&self) -> f32 {
        match self.axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    /// Shrink the extent along the motion axis; the cross dimension is
    /// left unchanged
    pub fn set_extent(&mut self, value: f32) {
        match self.axis {
            Axis::X => self.width = value,
            Axis::Z => self.depth = value,
        }
    }
}

/// A cut-away sliver falling under gravity
#[derive(Debug, Clone)]
pub struct OffCut {
    pub visual: VisualHandle,
    pub body: BodyHandle,
}

/// Observable session events, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// First input arrived; the motion loop is live
    Started,
    /// A drop landed; `percent` is the kept share of the layer
    Placed { percent: f64, score: f64 },
    /// A drop missed; the session is over
    Missed { score: f64 },
}

/// Complete session state.
///
/// Constructing one (together with its scene and world) starts a session;
/// the only way back from [`GamePhase::Ended`] is dropping all three and
/// starting over.
#[derive(Debug)]
pub struct GameState {
    pub phase: GamePhase,
    /// Accumulated fractional points
    pub score: f64,
    /// Kept percentage of the most recent successful turn
    pub last_percent: f64,
    /// Placed layers, foundation first, sliding layer last
    pub stack: Vec<Block>,
    /// Fallen slivers, in spawn order
    pub overhangs: Vec<OffCut>,
    /// Camera height, eased upward as the tower grows
    pub camera_y: f32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Seed a fresh session: the static foundation layer at the origin
    /// plus the first sliding layer waiting off-stage on [`Axis::X`].
    pub fn new(scene: &mut Scene, world: &mut World) -> Self {
        let mut state = Self {
            phase: GamePhase::NotStarted,
            score: 0.0,
            last_percent: 0.0,
            stack: Vec::new(),
            overhangs: Vec::new(),
            camera_y: CAMERA_BASE_Y,
            events: Vec::new(),
        };

        state.add_layer(
            scene,
            world,
            0.0,
            0.0,
            ORIGINAL_BOX_SIZE,
            ORIGINAL_BOX_SIZE,
            Axis::X,
        );
        state.add_layer(
            scene,
            world,
            SPAWN_OFFSET,
            0.0,
            ORIGINAL_BOX_SIZE,
            ORIGINAL_BOX_SIZE,
            Axis::X,
        );

        state
    }

    /// Append a layer on top of the stack. Its body is kinematic: the
    /// per-frame step moves it, gravity does not.
    pub fn add_layer(
        &mut self,
        scene: &mut Scene,
        world: &mut World,
        x: f32,
        z: f32,
        width: f32,
        depth: f32,
        axis: Axis,
    ) {
        let y = BOX_HEIGHT * self.stack.len() as f32;
        let position = Vec3::new(x, y, z);
        let dims = Vec3::new(width, BOX_HEIGHT, depth);

        let visual = scene.add_box(position, dims, scene::layer_color(self.stack.len()));
        let body = world.add_body(RigidBody::new(0.0, position, BoxShape::from_dims(dims)));

        self.stack.push(Block {
            width,
            depth,
            axis,
            visual,
            body,
        });
    }

    /// Spawn an off-cut at the current top layer's height, with mass so
    /// gravity takes it.
    pub fn add_overhang(
        &mut self,
        scene: &mut Scene,
        world: &mut World,
        x: f32,
        z: f32,
        width: f32,
        depth: f32,
    ) {
        let y = BOX_HEIGHT * (self.stack.len() as f32 - 1.0);
        let position = Vec3::new(x, y, z);
        let dims = Vec3::new(width, BOX_HEIGHT, depth);

        let visual = scene.add_box(position, dims, scene::layer_color(self.stack.len()));
        let body = world.add_body(RigidBody::new(
            OFFCUT_MASS,
            position,
            BoxShape::from_dims(dims),
        ));

        self.overhangs.push(OffCut { visual, body });
    }

    /// Index of the sliding layer (the stack never has fewer than two
    /// entries)
    pub fn top_index(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events to the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session() -> (GameState, Scene, World) {
        let mut scene = Scene::new();
        let mut world = World::new(Vec3::new(0.0, GRAVITY_Y, 0.0), SOLVER_ITERATIONS);
        let state = GameState::new(&mut scene, &mut world);
        (state, scene, world)
    }

    #[test]
    fn test_foundation_pair_is_seeded() {
        let (state, scene, world) = new_session();

        assert_eq!(state.stack.len(), 2);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0.0);

        let foundation = scene.get(state.stack[0].visual);
        assert_eq!(foundation.position, Vec3::ZERO);
        assert_eq!(
            foundation.dims,
            Vec3::new(ORIGINAL_BOX_SIZE, BOX_HEIGHT, ORIGINAL_BOX_SIZE)
        );

        // The sliding layer waits off-stage, one layer up, moving on X
        let top = &state.stack[1];
        assert_eq!(top.axis, Axis::X);
        let top_visual = scene.get(top.visual);
        assert_eq!(top_visual.position, Vec3::new(SPAWN_OFFSET, BOX_HEIGHT, 0.0));

        // Both bodies are kinematic and co-located with their visuals
        for block in &state.stack {
            let body = world.body(block.body);
            assert!(body.is_kinematic());
            assert_eq!(body.position, scene.get(block.visual).position);
        }
    }

    #[test]
    fn test_layer_heights_stack_up() {
        let (mut state, mut scene, mut world) = new_session();
        state.add_layer(&mut scene, &mut world, 0.0, 0.0, 2.0, 2.0, Axis::Z);

        let third = state.stack[2].visual;
        assert_eq!(scene.get(third).position.y, BOX_HEIGHT * 2.0);
    }

    #[test]
    fn test_overhang_spawns_at_top_layer_height() {
        let (mut state, mut scene, mut world) = new_session();
        state.add_overhang(&mut scene, &mut world, 3.0, 0.0, 0.5, 2.0);

        assert_eq!(state.overhangs.len(), 1);
        let offcut = &state.overhangs[0];
        let visual = scene.get(offcut.visual);
        assert_eq!(visual.position, Vec3::new(3.0, BOX_HEIGHT, 0.0));

        let body = world.body(offcut.body);
        assert_eq!(body.mass, OFFCUT_MASS);
        assert!(!body.is_kinematic());
    }

    #[test]
    fn test_take_events_drains() {
        let (mut state, _, _) = new_session();
        state.push_event(GameEvent::Started);
        assert_eq!(state.take_events(), vec![GameEvent::Started]);
        assert!(state.take_events().is_empty());
    }
}

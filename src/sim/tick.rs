//! Per-frame motion and sync
//!
//! Advances the sliding layer at constant speed, steps the physics world
//! and copies every off-cut's simulated transform back onto its visual.
//! The sliding layer is script-driven: its visual and body move
//! identically, gravity never touches it.

use super::state::{GameEvent, GamePhase, GameState};
use super::turn::resolve_turn;
use crate::consts::*;
use crate::physics::World;
use crate::scene::Scene;

/// One-shot input flags for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Drop the sliding layer (click/tap). The first one starts the
    /// session instead.
    pub drop: bool,
}

/// Advance the session by one fixed timestep.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    scene: &mut Scene,
    world: &mut World,
    dt: f32,
) {
    if input.drop {
        match state.phase {
            GamePhase::NotStarted => {
                state.phase = GamePhase::Running;
                state.push_event(GameEvent::Started);
                log::info!("session started");
            }
            GamePhase::Running => {
                resolve_turn(state, scene, world);
            }
            GamePhase::Ended => {}
        }
    }

    if state.phase == GamePhase::NotStarted {
        return;
    }

    if state.phase == GamePhase::Running {
        slide_top_layer(state, scene, world, dt);
    }

    // Off-cuts keep falling while the game-over reload is pending
    world.step(dt);
    sync_overhangs(state, scene, world);
    raise_camera(state, dt);
}

/// Move the sliding layer's visual and body identically along its axis
fn slide_top_layer(state: &mut GameState, scene: &mut Scene, world: &mut World, dt: f32) {
    let top = &state.stack[state.top_index()];
    let step = top.axis.unit() * SLIDE_SPEED * dt;

    scene.get_mut(top.visual).position += step;
    world.body_mut(top.body).position += step;
}

/// Copy each off-cut's simulated position and orientation onto its visual
fn sync_overhangs(state: &GameState, scene: &mut Scene, world: &World) {
    for offcut in &state.overhangs {
        let body = world.body(offcut.body);
        let visual = scene.get_mut(offcut.visual);
        visual.position = body.position;
        visual.rotation = body.orientation;
    }
}

/// Ease the camera up toward a height tied to the stack size; frozen once
/// the session has ended
fn raise_camera(state: &mut GameState, dt: f32) {
    if state.phase == GamePhase::Ended {
        return;
    }
    let target = BOX_HEIGHT * (state.stack.len() as f32 - 2.0) + CAMERA_BASE_Y;
    if state.camera_y < target {
        state.camera_y = (state.camera_y + SLIDE_SPEED * dt).min(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::sim::axis::Axis;
    use crate::sim::state::GameState;

    const DT: f32 = SIM_DT;

    fn new_session() -> (GameState, Scene, World) {
        let mut scene = Scene::new();
        let mut world = World::new(Vec3::new(0.0, GRAVITY_Y, 0.0), SOLVER_ITERATIONS);
        let state = GameState::new(&mut scene, &mut world);
        (state, scene, world)
    }

    fn drop_input() -> TickInput {
        TickInput { drop: true }
    }

    #[test]
    fn test_nothing_moves_before_first_input() {
        let (mut state, mut scene, mut world) = new_session();
        let before = scene.get(state.stack[1].visual).position;

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(scene.get(state.stack[1].visual).position, before);
    }

    #[test]
    fn test_first_input_starts_the_session() {
        let (mut state, mut scene, mut world) = new_session();

        tick(&mut state, &drop_input(), &mut scene, &mut world, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.stack.len(), 2, "starting must not resolve a turn");
        assert!(state.take_events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_top_layer_slides_in_lockstep_with_its_body() {
        let (mut state, mut scene, mut world) = new_session();
        tick(&mut state, &drop_input(), &mut scene, &mut world, DT);

        let before = scene.get(state.stack[1].visual).position;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }

        let visual_pos = scene.get(state.stack[1].visual).position;
        let body_pos = world.body(state.stack[1].body).position;
        let expected = before.x + SLIDE_SPEED * DT * 30.0;

        assert!((visual_pos.x - expected).abs() < 1e-4);
        assert_eq!(visual_pos, body_pos);
        // Sliding is axis-only
        assert_eq!(visual_pos.y, before.y);
        assert_eq!(visual_pos.z, before.z);
    }

    #[test]
    fn test_second_input_resolves_a_turn() {
        let (mut state, mut scene, mut world) = new_session();
        tick(&mut state, &drop_input(), &mut scene, &mut world, DT);

        // Slide until the layer overlaps the foundation
        while scene.get(state.stack[1].visual).position.x < 0.0 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }
        tick(&mut state, &drop_input(), &mut scene, &mut world, DT);

        assert_eq!(state.stack.len(), 3);
        assert_eq!(state.stack[2].axis, Axis::Z);
        assert!(state.score > 0.0);
    }

    #[test]
    fn test_offcut_visuals_track_their_bodies() {
        let (mut state, mut scene, mut world) = new_session();
        state.phase = GamePhase::Running;
        state.add_overhang(&mut scene, &mut world, 2.0, 0.0, 0.5, 2.0);

        let spawn_y = scene.get(state.overhangs[0].visual).position.y;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }

        let body = world.body(state.overhangs[0].body);
        let visual = scene.get(state.overhangs[0].visual);
        assert!(body.position.y < spawn_y, "off-cut should be falling");
        assert_eq!(visual.position, body.position);
        assert_eq!(visual.rotation, body.orientation);
    }

    #[test]
    fn test_camera_rises_toward_clamped_target() {
        let (mut state, mut scene, mut world) = new_session();
        state.phase = GamePhase::Running;

        // Grow the tower so the target is above the starting height
        for _ in 0..4 {
            let top = state.top_index();
            let (w, d, axis) = (
                state.stack[top].width,
                state.stack[top].depth,
                state.stack[top].axis,
            );
            state.add_layer(&mut scene, &mut world, 0.0, 0.0, w, d, axis.other());
        }
        let target = BOX_HEIGHT * (state.stack.len() as f32 - 2.0) + CAMERA_BASE_Y;

        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }
        assert!((state.camera_y - target).abs() < 1e-4);
        assert!(state.camera_y <= target + 1e-6);
    }

    #[test]
    fn test_camera_freezes_after_game_over() {
        let (mut state, mut scene, mut world) = new_session();
        state.phase = GamePhase::Ended;
        state.camera_y = 1.0;

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), &mut scene, &mut world, DT);
        }
        assert_eq!(state.camera_y, 1.0);
    }

    #[test]
    fn test_input_after_game_over_is_ignored() {
        let (mut state, mut scene, mut world) = new_session();
        state.phase = GamePhase::Ended;
        let stack_before = state.stack.len();

        tick(&mut state, &drop_input(), &mut scene, &mut world, DT);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.stack.len(), stack_before);
    }
}

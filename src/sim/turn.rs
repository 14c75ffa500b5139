//! Turn resolution: the overlap cut
//!
//! One player action against the sliding layer and the layer beneath it:
//! measure the overlap, shrink the kept slice, spawn the falling off-cut
//! and seed the next layer on the other axis.

use glam::Vec3;

use super::axis::Axis;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::physics::{BoxShape, World};
use crate::scene::Scene;

/// Outcome of a resolved turn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnOutcome {
    /// The drop overlapped the layer below; the kept slice stays on top
    Placed { kept: f32, trimmed: f32, percent: f64 },
    /// No overlap; the session is over
    Missed,
}

/// Geometry of a successful cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlan {
    /// Extent of the kept slice along the motion axis
    pub kept: f32,
    /// Extent of the off-cut sliver
    pub trimmed: f32,
    /// Axis shift recentering the kept slice over the overlap region
    pub shift: f32,
    /// Off-cut center offset from the recentered kept slice, signed
    /// toward the overshoot
    pub offcut_offset: f32,
}

/// Compute the cut for a layer of `extent` displaced by `delta` from the
/// layer below. `None` means the layers no longer overlap.
pub fn cut_geometry(extent: f32, delta: f32) -> Option<CutPlan> {
    let trimmed = delta.abs();
    let kept = extent - trimmed;
    if kept <= 0.0 {
        return None;
    }
    Some(CutPlan {
        kept,
        trimmed,
        shift: -delta / 2.0,
        offcut_offset: (kept / 2.0 + trimmed / 2.0) * delta.signum(),
    })
}

/// Kept share of the layer as a percentage, rounded to one decimal.
///
/// The rounding happens before the point scaling; scores depend on this
/// exact order of operations.
pub fn kept_percent(extent: f32, trimmed: f32) -> f64 {
    (((extent - trimmed) / extent) as f64 * 100.0 * 10.0).round() / 10.0
}

/// Resolve one drop against the current stack.
pub fn resolve_turn(
    state: &mut GameState,
    scene: &mut Scene,
    world: &mut World,
) -> TurnOutcome {
    let top = state.top_index();
    let axis = state.stack[top].axis;
    let extent = state.stack[top].extent();

    let top_pos = scene.get(state.stack[top].visual).position;
    let prev_pos = scene.get(state.stack[top - 1].visual).position;
    let delta = axis.component(top_pos) - axis.component(prev_pos);

    let Some(plan) = cut_geometry(extent, delta) else {
        state.phase = GamePhase::Ended;
        log::info!("missed: delta {delta:.2} against extent {extent:.2}, game over");
        state.push_event(GameEvent::Missed { score: state.score });
        return TurnOutcome::Missed;
    };

    let percent = kept_percent(extent, plan.trimmed);
    state.score += percent / 100.0 * POINT_VALUE;
    state.last_percent = percent;

    cut_block(state, scene, world, top, extent, &plan);
    spawn_offcut(state, scene, world, &plan);
    spawn_next_layer(state, scene, world);

    log::debug!(
        "placed layer {}: kept {:.2} of {:.2} ({percent}%)",
        state.stack.len() - 1,
        plan.kept,
        extent
    );
    state.push_event(GameEvent::Placed {
        percent,
        score: state.score,
    });
    TurnOutcome::Placed {
        kept: plan.kept,
        trimmed: plan.trimmed,
        percent,
    }
}

/// Shrink the layer at `index` to the kept slice: metadata, visual scale
/// and position, body position and a freshly sized collision shape.
fn cut_block(
    state: &mut GameState,
    scene: &mut Scene,
    world: &mut World,
    index: usize,
    extent: f32,
    plan: &CutPlan,
) {
    let axis = state.stack[index].axis;
    state.stack[index].set_extent(plan.kept);
    let (width, depth) = (state.stack[index].width, state.stack[index].depth);

    let visual = scene.get_mut(state.stack[index].visual);
    axis.set_component(&mut visual.scale, plan.kept / extent);
    let shifted = axis.component(visual.position) + plan.shift;
    axis.set_component(&mut visual.position, shifted);

    let body = world.body_mut(state.stack[index].body);
    let shifted = axis.component(body.position) + plan.shift;
    axis.set_component(&mut body.position, shifted);
    // Shapes cannot be resized in place; swap in a fresh one
    body.replace_shape(BoxShape::from_dims(Vec3::new(width, BOX_HEIGHT, depth)));
}

/// Spawn the falling sliver flush against the kept slice's outer edge.
fn spawn_offcut(state: &mut GameState, scene: &mut Scene, world: &mut World, plan: &CutPlan) {
    let top = state.top_index();
    let axis = state.stack[top].axis;
    let kept_pos = scene.get(state.stack[top].visual).position;

    let mut position = kept_pos;
    axis.set_component(&mut position, axis.component(kept_pos) + plan.offcut_offset);

    let (width, depth) = match axis {
        Axis::X => (plan.trimmed, state.stack[top].depth),
        Axis::Z => (state.stack[top].width, plan.trimmed),
    };
    state.add_overhang(scene, world, position.x, position.z, width, depth);
}

/// Seed the next sliding layer: aligned with the kept slice on its own
/// axis, off-stage on the other, motion axis alternated.
fn spawn_next_layer(state: &mut GameState, scene: &mut Scene, world: &mut World) {
    let top = state.top_index();
    let axis = state.stack[top].axis;
    let kept_pos = scene.get(state.stack[top].visual).position;

    let (x, z) = match axis {
        Axis::X => (kept_pos.x, SPAWN_OFFSET),
        Axis::Z => (SPAWN_OFFSET, kept_pos.z),
    };
    let (width, depth) = (state.stack[top].width, state.stack[top].depth);
    state.add_layer(scene, world, x, z, width, depth, axis.other());
}

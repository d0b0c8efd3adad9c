use hecs::{Entity, World};

use crate::components::{overlaps, Body, Held, Rect, Steered};
use crate::config::{DragConfig, DragPolicy};
use crate::engine::input::PointerInput;

/// What the drag controller did to a body this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEffect {
    /// Not held; integrate normally.
    Free,
    /// Positioned directly under the pointer; skip integration.
    Pinned,
    /// Held and pulled toward the pointer by an added acceleration.
    Steering,
}

/// Run the drag controller for every body and tag the held ones for the
/// physics pass: [`Held`] for pinned bodies, [`Steered`] for steered ones.
///
/// A press grabs at most one body: the first one, in world order, that
/// contains the pointer.
pub fn drag_system(
    world: &mut World,
    pointer: &PointerInput,
    obstacles: &[Rect],
    config: &DragConfig,
    dt: f32,
) {
    let mut pointer = *pointer;
    let mut effects: Vec<(Entity, DragEffect)> = Vec::new();

    for (entity, body) in world.query_mut::<&mut Body>() {
        let was_dragging = body.drag.is_dragging();
        let effect = drag_body(body, &pointer, obstacles, config, dt);
        if !was_dragging && body.drag.is_dragging() {
            pointer.pressed = false;
        }
        effects.push((entity, effect));
    }

    for (entity, effect) in effects {
        let _ = world.remove_one::<Held>(entity);
        let _ = world.remove_one::<Steered>(entity);
        match effect {
            DragEffect::Free => {}
            DragEffect::Pinned => {
                let _ = world.insert_one(entity, Held);
            }
            DragEffect::Steering => {
                let _ = world.insert_one(entity, Steered);
            }
        }
    }
}

/// Advance one body's drag state machine from this frame's pointer input.
///
/// A grab starts on a press edge inside the body. While the pointer stays
/// held the configured [`DragPolicy`] moves the body; a release edge (or a
/// pointer that is no longer held) ends the drag, optionally throwing the
/// body with the pointer's recent velocity.
pub fn drag_body(
    body: &mut Body,
    pointer: &PointerInput,
    obstacles: &[Rect],
    config: &DragConfig,
    dt: f32,
) -> DragEffect {
    let effect = update(body, pointer, obstacles, config, dt);
    body.drag.fsm.tick(dt);
    effect
}

fn update(
    body: &mut Body,
    pointer: &PointerInput,
    obstacles: &[Rect],
    config: &DragConfig,
    dt: f32,
) -> DragEffect {
    if !body.drag.is_dragging() {
        if !(pointer.pressed && body.rect.contains_point(pointer.position)) {
            return DragEffect::Free;
        }
        body.drag.begin(pointer.position, body.rect.top_left());
        log::debug!("drag started at {:?}", pointer.position);
    }

    if pointer.released || !pointer.held {
        release(body, config);
        return DragEffect::Free;
    }

    // Sample pointer speed for a possible throw on release.
    body.drag.pointer_velocity = (pointer.position - body.drag.last_pointer) / dt;
    body.drag.last_pointer = pointer.position;

    let Some(offset) = body.drag.pointer_offset() else {
        return DragEffect::Free;
    };

    match config.policy {
        DragPolicy::Direct => {
            let target = body.rect.at(pointer.position - offset);
            let blocked = config.veto_on_overlap && obstacles.iter().any(|o| overlaps(&target, o));
            if !blocked {
                body.rect = target;
            }
            body.physics.stop();
            DragEffect::Pinned
        }
        DragPolicy::Steer => {
            let grab_point = body.rect.top_left() + offset;
            let direction = (pointer.position - grab_point).normalize_or_zero();
            body.physics.apply_acceleration(direction * config.steer_acceleration);
            DragEffect::Steering
        }
    }
}

fn release(body: &mut Body, config: &DragConfig) {
    if let Some(throw) = &config.throw {
        let velocity =
            (body.drag.pointer_velocity * throw.damping).clamp_length_max(throw.max_speed);
        body.physics.velocity = velocity;
        log::debug!(
            "drag released after {:.3}s, thrown at {:?}",
            body.drag.fsm.elapsed,
            velocity
        );
    } else {
        log::debug!("drag released after {:.3}s", body.drag.fsm.elapsed);
    }
    body.drag.end();
}

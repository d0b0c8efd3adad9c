use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Body, CollisionEvent, Grounded, Held, PhysicsState, Rect, Side, Steered};
use crate::config::SimConfig;
use crate::engine::input::PointerInput;

use super::collision::{resolve, Hit, Resolution, Response};
use super::drag::{drag_body, DragEffect};

/// Fixed step used by hosts that don't measure wall-clock time.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Velocity and rectangle after integrating one step, before collision
/// correction. Nothing is written back to the body yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Provisional {
    pub velocity: Vec2,
    pub rect: Rect,
}

/// Semi-implicit Euler: velocity first, then position with the new velocity.
pub fn integrate(physics: &PhysicsState, rect: &Rect, dt: f32) -> Provisional {
    let velocity = physics.velocity + physics.acceleration * dt;
    Provisional {
        velocity,
        rect: rect.translated(velocity * dt),
    }
}

/// Write a resolved step back into the body, clear the force accumulator
/// and enforce the speed limit.
pub fn commit(body: &mut Body, resolution: &Resolution) {
    body.physics.velocity = resolution.velocity;
    body.rect = resolution.rect;
    body.physics.acceleration = Vec2::ZERO;
    body.physics.cap_velocity();
}

/// Whether a frame was simulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Stepped by `dt` seconds (possibly clamped from the frame delta).
    Advanced { dt: f32 },
    /// Frame delta was zero, negative or not finite; nothing changed.
    Skipped,
}

/// Guard a host-supplied frame delta. Returns `None` for deltas that must
/// not be simulated and clamps long frames to `max_dt`.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("skipping step with degenerate dt {dt}");
        return None;
    }
    if dt > max_dt {
        log::debug!("clamping dt {dt:.4}s to {max_dt:.4}s");
        return Some(max_dt);
    }
    Some(dt)
}

/// A collision resolved during one body step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub hit: Hit,
    pub velocity_before: Vec2,
    pub velocity_after: Vec2,
}

impl Impact {
    pub fn to_event(&self, entity: Entity) -> CollisionEvent {
        CollisionEvent {
            entity,
            obstacle_index: self.hit.obstacle_index,
            obstacle: self.hit.obstacle,
            side: self.hit.contact.side,
            depth: self.hit.contact.depth,
            velocity_before: self.velocity_before,
            velocity_after: self.velocity_after,
        }
    }
}

/// Advance one body by an already-sanitized `dt`: drag controller, forces,
/// integration, collision resolution, commit.
pub fn step_body(
    body: &mut Body,
    dt: f32,
    obstacles: &[Rect],
    pointer: &PointerInput,
    config: &SimConfig,
) -> Option<Impact> {
    let effect = drag_body(body, pointer, obstacles, &config.drag, dt);
    advance_body(body, effect, dt, obstacles, config)
}

/// The integration half of [`step_body`], after the drag controller has
/// decided `effect`. Pinned bodies are left alone.
pub fn advance_body(
    body: &mut Body,
    effect: DragEffect,
    dt: f32,
    obstacles: &[Rect],
    config: &SimConfig,
) -> Option<Impact> {
    if effect == DragEffect::Pinned {
        return None;
    }

    let gravity_on = effect != DragEffect::Steering || config.drag.gravity_while_dragging;
    if gravity_on {
        body.physics.apply_gravity();
    }
    body.physics.apply_drag();

    let velocity_before = body.physics.velocity;
    let provisional = integrate(&body.physics, &body.rect, dt);
    let response = Response {
        axis_priority: config.axis_priority,
        friction_model: config.friction_model,
    };
    let resolution = resolve(
        provisional.rect,
        provisional.velocity,
        obstacles,
        body.physics.friction,
        body.physics.elasticity,
        response,
    );
    commit(body, &resolution);

    resolution.hit.map(|hit| {
        log::debug!(
            "collision with obstacle #{} {:?} on {} side: vel {:?} -> {:?}, pos {:?}",
            hit.obstacle_index,
            hit.obstacle,
            hit.contact.side,
            velocity_before,
            body.physics.velocity,
            body.rect.top_left()
        );
        Impact {
            hit,
            velocity_before,
            velocity_after: body.physics.velocity,
        }
    })
}

/// Integrate every body that is not [`Held`] and resolve it against the
/// obstacles. Run after [`drag_system`](super::drag_system) has tagged this
/// frame's held and steered bodies.
pub fn physics_system(
    world: &mut World,
    obstacles: &[Rect],
    config: &SimConfig,
    dt: f32,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    for (entity, (body, steered)) in world
        .query_mut::<(&mut Body, Option<&Steered>)>()
        .without::<&Held>()
    {
        let effect = if steered.is_some() {
            DragEffect::Steering
        } else {
            DragEffect::Free
        };
        if let Some(impact) = advance_body(body, effect, dt, obstacles, config) {
            events.push(impact.to_event(entity));
        }
    }
    events
}

/// Rebuild the [`Grounded`] markers from this step's collisions: a body is
/// grounded only if it landed on an obstacle's top face.
pub fn grounded_system(world: &mut World, events: &[CollisionEvent]) {
    let grounded: Vec<Entity> = world
        .query_mut::<&Grounded>()
        .into_iter()
        .map(|(e, _)| e)
        .collect();
    for entity in grounded {
        let _ = world.remove_one::<Grounded>(entity);
    }

    for event in events.iter().filter(|e| e.side == Side::Top) {
        let _ = world.insert_one(event.entity, Grounded);
    }
}

/// Outcome of [`step`] for a single body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub tick: Tick,
    pub impact: Option<Impact>,
}

/// One frame for one body, with the frame delta guarded first. Hosts that
/// manage a single body can call this directly instead of going through a
/// [`Simulation`](crate::simulation::Simulation).
pub fn step(
    body: &mut Body,
    dt: f32,
    obstacles: &[Rect],
    pointer: &PointerInput,
    config: &SimConfig,
) -> StepReport {
    match sanitize_dt(dt, config.max_dt) {
        None => StepReport {
            tick: Tick::Skipped,
            impact: None,
        },
        Some(dt) => StepReport {
            tick: Tick::Advanced { dt },
            impact: step_body(body, dt, obstacles, pointer, config),
        },
    }
}

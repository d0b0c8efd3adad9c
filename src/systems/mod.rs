mod collision;
mod contact;
mod drag;
mod physics;

pub use collision::{clamp_to_face, resolve, respond, Hit, Resolution, Response};
pub use contact::{collision_side, Contact};
pub use drag::{drag_body, drag_system, DragEffect};
pub use physics::{
    advance_body, commit, grounded_system, integrate, physics_system, sanitize_dt, step, step_body,
    Impact, Provisional, StepReport, Tick, PHYSICS_DT,
};

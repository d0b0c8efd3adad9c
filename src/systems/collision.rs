use glam::Vec2;

use crate::components::{Rect, Side};
use crate::config::{AxisPriority, FrictionModel};

use super::contact::{collision_side, Contact};

/// Contact-response settings shared by every body in a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Response {
    pub axis_priority: AxisPriority,
    pub friction_model: FrictionModel,
}

/// The obstacle a step collided with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub obstacle_index: usize,
    pub obstacle: Rect,
    pub contact: Contact,
}

/// Corrected velocity and rectangle for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub velocity: Vec2,
    pub rect: Rect,
    pub hit: Option<Hit>,
}

/// Resolve a provisional move against the obstacle list.
///
/// Only the first overlapping obstacle in list order is handled. Bodies
/// wedged between two obstacles at once get corrected against one of them
/// per step.
pub fn resolve(
    provisional: Rect,
    velocity: Vec2,
    obstacles: &[Rect],
    friction: f32,
    elasticity: f32,
    response: Response,
) -> Resolution {
    let first_hit = obstacles.iter().enumerate().find_map(|(i, obstacle)| {
        collision_side(&provisional, obstacle, response.axis_priority).map(|contact| Hit {
            obstacle_index: i,
            obstacle: *obstacle,
            contact,
        })
    });

    let Some(hit) = first_hit else {
        return Resolution {
            velocity,
            rect: provisional,
            hit: None,
        };
    };

    let side = hit.contact.side;
    Resolution {
        velocity: respond(velocity, side, friction, elasticity, response.friction_model),
        rect: clamp_to_face(provisional, side, &hit.obstacle),
        hit: Some(hit),
    }
}

/// Velocity after touching an obstacle's `side` face.
pub fn respond(v: Vec2, side: Side, friction: f32, elasticity: f32, model: FrictionModel) -> Vec2 {
    let keep = 1.0 - friction;
    match (model, side) {
        (FrictionModel::Damped, Side::Left | Side::Right) => {
            Vec2::new(-v.x * elasticity * keep, v.y)
        }
        (FrictionModel::Tangential, Side::Left | Side::Right) => {
            Vec2::new(-v.x * elasticity, v.y * keep)
        }
        // resting contact
        (_, Side::Top) => Vec2::new(v.x * keep, 0.0),
        (FrictionModel::Damped, Side::Bottom) => Vec2::new(v.x, -v.y * elasticity),
        (FrictionModel::Tangential, Side::Bottom) => Vec2::new(v.x * keep, -v.y * elasticity),
    }
}

/// Move `body` along the separation axis until it sits flush against the
/// obstacle's `side` face. The other coordinate is left as is.
pub fn clamp_to_face(body: Rect, side: Side, obstacle: &Rect) -> Rect {
    let mut out = body;
    match side {
        Side::Left => out.x = obstacle.left() - body.width,
        Side::Right => out.x = obstacle.right(),
        Side::Top => out.y = obstacle.top() - body.height,
        Side::Bottom => out.y = obstacle.bottom(),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GROUND: Rect = Rect::new(200.0, 400.0, 800.0, 50.0);

    #[test]
    fn free_move_is_committed_untouched() {
        let provisional = Rect::new(350.0, 210.0, 100.0, 100.0);
        let v = Vec2::new(3.0, 600.0);
        let res = resolve(provisional, v, &[GROUND], 0.5, 0.5, Response::default());
        assert_eq!(res.rect, provisional);
        assert_eq!(res.velocity, v);
        assert!(res.hit.is_none());
    }

    #[test]
    fn landing_stops_fall_and_sits_flush() {
        let provisional = Rect::new(352.0, 303.0, 100.0, 100.0);
        let res = resolve(
            provisional,
            Vec2::new(120.0, 180.0),
            &[GROUND],
            0.25,
            0.5,
            Response::default(),
        );
        assert_eq!(res.rect, Rect::new(352.0, 300.0, 100.0, 100.0));
        assert_eq!(res.velocity, Vec2::new(90.0, 0.0));
        let hit = res.hit.unwrap();
        assert_eq!(hit.contact.side, Side::Top);
        assert_eq!(hit.obstacle_index, 0);
    }

    #[test]
    fn wall_hit_reflects_and_damps() {
        let wall = Rect::new(500.0, 0.0, 20.0, 400.0);
        let provisional = Rect::new(404.0, 100.0, 100.0, 100.0);
        let res = resolve(
            provisional,
            Vec2::new(240.0, 10.0),
            &[wall],
            0.5,
            0.5,
            Response::default(),
        );
        assert_eq!(res.hit.unwrap().contact.side, Side::Left);
        assert_eq!(res.rect.x, 400.0);
        assert_eq!(res.rect.y, 100.0);
        assert_relative_eq!(res.velocity.x, -60.0);
        assert_relative_eq!(res.velocity.y, 10.0);
    }

    #[test]
    fn ceiling_hit_bounces_down() {
        let ceiling = Rect::new(0.0, 0.0, 1000.0, 50.0);
        let provisional = Rect::new(300.0, 46.0, 100.0, 100.0);
        let res = resolve(
            provisional,
            Vec2::new(0.0, -400.0),
            &[ceiling],
            0.1,
            0.5,
            Response::default(),
        );
        assert_eq!(res.hit.unwrap().contact.side, Side::Bottom);
        assert_eq!(res.rect.y, 50.0);
        assert_relative_eq!(res.velocity.y, 200.0);
    }

    #[test]
    fn only_first_obstacle_in_order_is_resolved() {
        let a = Rect::new(0.0, 400.0, 1000.0, 50.0);
        let b = Rect::new(0.0, 380.0, 1000.0, 50.0);
        let provisional = Rect::new(300.0, 305.0, 100.0, 100.0);
        let res = resolve(provisional, Vec2::ZERO, &[a, b], 0.0, 0.0, Response::default());
        let hit = res.hit.unwrap();
        assert_eq!(hit.obstacle_index, 0);
        assert_eq!(res.rect.y, 300.0);
    }

    #[test]
    fn bounce_never_gains_normal_speed() {
        for &e in &[0.0_f32, 0.02, 0.5, 0.99, 1.0] {
            for side in [Side::Left, Side::Right, Side::Bottom] {
                let v = Vec2::new(-350.0, -275.0);
                let out = respond(v, side, 0.0, e, FrictionModel::Damped);
                let (before, after) = if side.is_horizontal() {
                    (v.x.abs(), out.x.abs())
                } else {
                    (v.y.abs(), out.y.abs())
                };
                assert!(after <= before);
                if e < 1.0 {
                    assert!(after < before);
                } else {
                    assert_eq!(after, before);
                }
            }
        }
    }

    #[test]
    fn tangential_model_moves_friction_to_the_face() {
        let v = Vec2::new(200.0, 100.0);
        let wall = respond(v, Side::Left, 0.5, 0.5, FrictionModel::Tangential);
        assert_relative_eq!(wall.x, -100.0);
        assert_relative_eq!(wall.y, 50.0);

        let rising = Vec2::new(200.0, -100.0);
        let ceiling = respond(rising, Side::Bottom, 0.5, 0.5, FrictionModel::Tangential);
        assert_relative_eq!(ceiling.x, 100.0);
        assert_relative_eq!(ceiling.y, 50.0);
    }

    #[test]
    fn right_face_hit_pushes_body_out_to_the_right() {
        let wall = Rect::new(500.0, 0.0, 20.0, 400.0);
        // moving left, 2 px into the wall's right face
        let provisional = Rect::new(518.0, 100.0, 100.0, 100.0);
        let res = resolve(
            provisional,
            Vec2::new(-240.0, 10.0),
            &[wall],
            0.5,
            0.5,
            Response::default(),
        );
        let hit = res.hit.unwrap();
        assert_eq!(hit.contact.side, Side::Right);
        assert_eq!(hit.contact.depth, 2.0);
        assert_eq!(res.rect, Rect::new(520.0, 100.0, 100.0, 100.0));
        assert_eq!(res.velocity, Vec2::new(60.0, 10.0));
    }

    #[test]
    fn tangential_landing_keeps_resting_contact() {
        let response = Response {
            friction_model: FrictionModel::Tangential,
            ..Default::default()
        };
        let provisional = Rect::new(352.0, 303.0, 100.0, 100.0);
        let res = resolve(provisional, Vec2::new(120.0, 180.0), &[GROUND], 0.25, 0.5, response);
        assert_eq!(res.hit.unwrap().contact.side, Side::Top);
        assert_eq!(res.rect, Rect::new(352.0, 300.0, 100.0, 100.0));
        assert_eq!(res.velocity, Vec2::new(90.0, 0.0));
    }
}

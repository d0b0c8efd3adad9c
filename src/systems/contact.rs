use crate::components::{overlap_depth, overlaps, Rect, Side};
use crate::config::AxisPriority;

/// Penetration of a body into one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub side: Side,
    /// Overlap along the separation axis.
    pub depth: f32,
}

/// Classify how `body` penetrates `obstacle`, or `None` if they don't overlap.
///
/// The separation axis is the one with the smaller overlap (minimum
/// translation); `priority` decides exact ties. The side is the obstacle face
/// on the body's side of that axis, judged by comparing centers: a body whose
/// center is strictly left of the obstacle's hit its `Left` face, otherwise
/// `Right`, and likewise `Top`/`Bottom` vertically.
pub fn collision_side(body: &Rect, obstacle: &Rect, priority: AxisPriority) -> Option<Contact> {
    if !overlaps(body, obstacle) {
        return None;
    }

    let depth = overlap_depth(body, obstacle);
    let horizontal = match priority {
        AxisPriority::Horizontal => depth.x <= depth.y,
        AxisPriority::Vertical => depth.x < depth.y,
    };

    let body_center = body.center();
    let obstacle_center = obstacle.center();

    let contact = if horizontal {
        let side = if body_center.x < obstacle_center.x {
            Side::Left
        } else {
            Side::Right
        };
        Contact {
            side,
            depth: depth.x,
        }
    } else {
        let side = if body_center.y < obstacle_center.y {
            Side::Top
        } else {
            Side::Bottom
        };
        Contact {
            side,
            depth: depth.y,
        }
    };
    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apart_is_none() {
        let body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far = Rect::new(100.0, 100.0, 10.0, 10.0);
        assert_eq!(collision_side(&body, &far, AxisPriority::Horizontal), None);
    }

    #[test]
    fn shallow_horizontal_overlap_picks_horizontal_side() {
        // x overlap 5, y overlap 10: horizontal separation, body center 5 < 10
        let body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(5.0, 0.0, 10.0, 10.0);
        for priority in [AxisPriority::Horizontal, AxisPriority::Vertical] {
            let contact = collision_side(&body, &obstacle, priority).unwrap();
            assert_eq!(contact.side, Side::Left);
            assert_eq!(contact.depth, 5.0);
        }
    }

    #[test]
    fn body_right_of_obstacle_hits_right_face() {
        let body = Rect::new(8.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(0.0, 0.0, 10.0, 10.0);
        let contact = collision_side(&body, &obstacle, AxisPriority::Horizontal).unwrap();
        assert_eq!(contact.side, Side::Right);
        assert_eq!(contact.depth, 2.0);
    }

    #[test]
    fn landing_is_top() {
        let body = Rect::new(350.0, 302.0, 100.0, 100.0);
        let ground = Rect::new(200.0, 400.0, 800.0, 50.0);
        let contact = collision_side(&body, &ground, AxisPriority::Horizontal).unwrap();
        assert_eq!(contact.side, Side::Top);
        assert!((contact.depth - 2.0).abs() < 1e-4);
    }

    #[test]
    fn hitting_from_below_is_bottom() {
        let body = Rect::new(400.0, 447.0, 100.0, 100.0);
        let ground = Rect::new(200.0, 400.0, 800.0, 50.0);
        let contact = collision_side(&body, &ground, AxisPriority::Horizontal).unwrap();
        assert_eq!(contact.side, Side::Bottom);
    }

    #[test]
    fn equal_overlap_follows_priority() {
        // corner overlap of 2 x 2
        let body = Rect::new(0.0, 0.0, 10.0, 10.0);
        let obstacle = Rect::new(8.0, 8.0, 10.0, 10.0);
        let h = collision_side(&body, &obstacle, AxisPriority::Horizontal).unwrap();
        let v = collision_side(&body, &obstacle, AxisPriority::Vertical).unwrap();
        assert_eq!(h.side, Side::Left);
        assert_eq!(v.side, Side::Top);
    }
}

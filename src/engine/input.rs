use glam::Vec2;

/// Pointer state for one frame, as the simulation consumes it.
///
/// `pressed` and `released` are edges (true on a single frame). `held` is
/// the level. While `held`, `position` is the drag position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
    pub position: Vec2,
}

impl PointerInput {
    /// No button activity; the pointer just sits at `position`.
    pub fn hover(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn press(position: Vec2) -> Self {
        Self {
            pressed: true,
            held: true,
            released: false,
            position,
        }
    }

    pub fn hold(position: Vec2) -> Self {
        Self {
            held: true,
            position,
            ..Default::default()
        }
    }

    pub fn release(position: Vec2) -> Self {
        Self {
            released: true,
            position,
            ..Default::default()
        }
    }
}

/// Derives press/release edges from raw per-frame button samples, the way a
/// host polling "is the button down" each frame would.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, down: bool, position: Vec2) -> PointerInput {
        let input = PointerInput {
            pressed: down && !self.was_down,
            released: !down && self.was_down,
            held: down,
            position,
        };
        self.was_down = down;
        input
    }
}
